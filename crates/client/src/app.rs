use std::iter::FusedIterator;
use std::time::Duration;

use monitor_common::{
    anyhow, config,
    proto::{
        client_service_client::ClientServiceClient, TextMessage, TextMessageResponse,
        WorkerDetails,
    },
    tonic::{
        transport::{Channel, Endpoint},
        Status, Streaming,
    },
    tracing::{debug, info, instrument, warn},
};
use tokio::runtime::{self, Runtime};

use crate::{
    completion::{Completion, StreamOutcome},
    observer::StatusObserver,
};

/// How long [`ClientApp::shutdown`] waits for the connection to wind down.
pub const SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

/// Blocking facade over the monitor's `ClientService`.
///
/// The facade owns the runtime that drives the connection. Its methods block
/// the calling thread and must not be called from within an async context.
pub struct ClientApp {
    client: ClientServiceClient<Channel>,
    rt: Runtime,
}

impl ClientApp {
    /// Opens a plaintext channel to `host:port`.
    ///
    /// The channel connects lazily; an unreachable server is reported by the
    /// first call, not here.
    pub fn connect(host: &str, port: u16) -> anyhow::Result<Self> {
        let rt = runtime::Builder::new_multi_thread().enable_all().build()?;
        let endpoint = Endpoint::from_shared(config::endpoint(host, port))?;
        let channel = {
            let _enter = rt.enter();
            endpoint.connect_lazy()
        };
        debug!("channel to {}:{} opened", host, port);
        Ok(ClientApp {
            client: ClientServiceClient::new(channel),
            rt,
        })
    }

    #[instrument(skip(self))]
    pub fn send_text_message(
        &mut self,
        message: &str,
        recipient: &str,
    ) -> Option<TextMessageResponse> {
        info!("Will try to send message: {}, to: {}", message, recipient);

        let request = TextMessage::new(message, recipient);
        let resp = match self.rt.block_on(self.client.send_text_message(request)) {
            Ok(resp) => resp.into_inner(),
            Err(status) => {
                warn!("RPC failed: {}", status);
                return None;
            }
        };
        info!("Response: {}, message: {}", resp.success, resp.message);
        Some(resp)
    }

    /// Starts a status stream and returns a blocking iterator over it.
    pub fn status_iter(&mut self) -> Result<StatusIter<'_>, Status> {
        let resp = self.rt.block_on(self.client.status(()))?;
        Ok(StatusIter {
            rt: &self.rt,
            stream: Some(resp.into_inner()),
        })
    }

    /// Queries the server status, logging each worker as it arrives.
    /// Returns the workers seen before the stream ended or failed.
    pub fn status_sync(&mut self) -> Vec<WorkerDetails> {
        info!("Querying status of server using Sync API");

        let mut seen = Vec::new();
        let iter = match self.status_iter() {
            Ok(iter) => iter,
            Err(status) => {
                warn!("RPC failed: {}", status);
                return seen;
            }
        };
        for item in iter {
            match item {
                Ok(details) => {
                    info!("{}", details);
                    seen.push(details);
                }
                Err(status) => {
                    warn!("RPC failed: {}", status);
                    break;
                }
            }
        }
        seen
    }

    /// Queries the server status in the background, reporting to `observer`.
    ///
    /// The returned [`Completion`] fires once the stream has ended, either
    /// normally or with an error.
    pub fn status_async<O: StatusObserver>(&mut self, observer: O) -> Completion {
        info!("Querying status of server using Async API");

        let client = self.client.clone();
        let (signal, rx) = Completion::channel();
        let task = self.rt.spawn(async move {
            let outcome = drive_status(client, observer).await;
            signal.fire(outcome);
        });
        Completion::new(rx, task, self.rt.handle().clone())
    }

    /// Closes the channel, waiting at most [`SHUTDOWN_GRACE`]. Streams still
    /// running in the background are dropped.
    pub fn shutdown(self) {
        let ClientApp { client, rt } = self;
        drop(client);
        rt.shutdown_timeout(SHUTDOWN_GRACE);
        debug!("channel closed");
    }
}

#[instrument(skip_all)]
async fn drive_status<O: StatusObserver>(
    mut client: ClientServiceClient<Channel>,
    mut observer: O,
) -> StreamOutcome {
    let mut stream = match client.status(()).await {
        Ok(resp) => resp.into_inner(),
        Err(status) => {
            observer.on_error(&status);
            return StreamOutcome::Failed(status);
        }
    };
    loop {
        match stream.message().await {
            Ok(Some(details)) => observer.on_next(details),
            Ok(None) => {
                observer.on_completed();
                return StreamOutcome::Completed;
            }
            Err(status) => {
                observer.on_error(&status);
                return StreamOutcome::Failed(status);
            }
        }
    }
}

/// Blocking iterator over a status stream.
///
/// Yields each worker once in delivery order. After the stream ends or an
/// error has been yielded, the iterator is exhausted for good.
pub struct StatusIter<'a> {
    rt: &'a Runtime,
    stream: Option<Streaming<WorkerDetails>>,
}

impl Iterator for StatusIter<'_> {
    type Item = Result<WorkerDetails, Status>;

    fn next(&mut self) -> Option<Self::Item> {
        let stream = self.stream.as_mut()?;
        match self.rt.block_on(stream.message()) {
            Ok(Some(details)) => Some(Ok(details)),
            Ok(None) => {
                self.stream = None;
                None
            }
            Err(status) => {
                self.stream = None;
                Some(Err(status))
            }
        }
    }
}

impl FusedIterator for StatusIter<'_> {}
