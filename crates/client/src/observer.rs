use monitor_common::{
    proto::WorkerDetails,
    tonic::Status,
    tracing::{info, warn},
};

/// Callbacks for a status stream consumed in asynchronous mode.
///
/// Callbacks run on a runtime worker thread. `on_next` is called once per
/// item in delivery order, followed by exactly one of `on_error` or
/// `on_completed`.
pub trait StatusObserver: Send + 'static {
    fn on_next(&mut self, details: WorkerDetails);

    fn on_error(&mut self, status: &Status);

    fn on_completed(&mut self);
}

/// Logs every worker and its subscriptions.
#[derive(Debug, Default)]
pub struct LoggingObserver;

impl StatusObserver for LoggingObserver {
    fn on_next(&mut self, details: WorkerDetails) {
        info!("{}", details);
        for sub in &details.worker_subscription {
            info!("{}", sub);
        }
    }

    fn on_error(&mut self, status: &Status) {
        warn!("RPC error: {}", status.message());
    }

    fn on_completed(&mut self) {
        info!("Completed");
    }
}
