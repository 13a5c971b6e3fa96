use std::net::SocketAddr;
use std::pin::Pin;
use std::sync::Arc;

use monitor_common::{
    futures::{future, stream, Stream, StreamExt as _},
    proto::{
        client_service_server::{ClientService, ClientServiceServer},
        Subscription, TextMessage, TextMessageResponse, WorkerDetails,
    },
    tonic::{self, transport::Server, Code, Request, Response, Status},
};
use parking_lot::Mutex;
use tokio::{net::TcpListener, runtime::Runtime};
use tokio_stream::wrappers::TcpListenerStream;

/// What the status stream does after the configured workers.
#[derive(Clone, Copy, Debug)]
pub(crate) enum Ending {
    Complete,
    Fail(Code),
    Hang,
}

impl Default for Ending {
    fn default() -> Self {
        Ending::Complete
    }
}

#[derive(Clone, Default)]
pub(crate) struct MockService {
    pub received: Arc<Mutex<Vec<TextMessage>>>,
    pub workers: Vec<WorkerDetails>,
    pub ending: Ending,
    pub reject_text: Option<Code>,
}

impl MockService {
    pub fn with_workers(workers: Vec<WorkerDetails>) -> Self {
        MockService {
            workers,
            ..MockService::default()
        }
    }
}

type BoxStatusStream = Pin<Box<dyn Stream<Item = Result<WorkerDetails, Status>> + Send + Sync>>;

#[tonic::async_trait]
impl ClientService for MockService {
    async fn send_text_message(
        &self,
        request: Request<TextMessage>,
    ) -> Result<Response<TextMessageResponse>, Status> {
        let msg = request.into_inner();
        self.received.lock().push(msg.clone());
        if let Some(code) = self.reject_text {
            return Err(Status::new(code, "text worker unavailable"));
        }
        Ok(Response::new(TextMessageResponse {
            success: true,
            message: format!(
                "Text message for '{}' received: {}",
                msg.recipient(),
                msg.message
            ),
        }))
    }

    type StatusStream = BoxStatusStream;

    async fn status(&self, _: Request<()>) -> Result<Response<Self::StatusStream>, Status> {
        let items = stream::iter(self.workers.clone().into_iter().map(Ok));
        let stream: BoxStatusStream = match self.ending {
            Ending::Complete => Box::pin(items),
            Ending::Fail(code) => Box::pin(items.chain(stream::once(future::ready(Err(
                Status::new(code, "worker table unavailable"),
            ))))),
            Ending::Hang => Box::pin(items.chain(stream::pending())),
        };
        Ok(Response::new(stream))
    }
}

/// A `ClientService` served on an ephemeral loopback port for the lifetime
/// of the value.
pub(crate) struct MockServer {
    pub addr: SocketAddr,
    received: Arc<Mutex<Vec<TextMessage>>>,
    _rt: Runtime,
}

impl MockServer {
    pub fn start(service: MockService) -> Self {
        let rt = Runtime::new().unwrap();
        let listener = rt.block_on(TcpListener::bind("127.0.0.1:0")).unwrap();
        let addr = listener.local_addr().unwrap();
        let received = Arc::clone(&service.received);
        rt.spawn(
            Server::builder()
                .add_service(ClientServiceServer::new(service))
                .serve_with_incoming(TcpListenerStream::new(listener)),
        );
        MockServer {
            addr,
            received,
            _rt: rt,
        }
    }

    pub fn calls(&self) -> Vec<TextMessage> {
        self.received.lock().clone()
    }
}

/// A loopback port nothing listens on.
pub(crate) fn closed_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}

pub(crate) fn two_workers() -> Vec<WorkerDetails> {
    vec![
        WorkerDetails {
            id: 1,
            name: "w1".to_owned(),
            worker_subscription: vec![],
        },
        WorkerDetails {
            id: 2,
            name: "w2".to_owned(),
            worker_subscription: vec![Subscription {
                id: 1,
                r#type: "text".to_owned(),
                label: "L".to_owned(),
            }],
        },
    ]
}
