#![deny(rust_2018_idioms)]

use std::time::Duration;

use monitor_client::{ClientApp, LoggingObserver, WaitOutcome};
use monitor_common::{
    anyhow, config,
    tracing::{self, warn},
};

const STATUS_TIMEOUT: Duration = Duration::from_secs(60);

fn main() -> anyhow::Result<()> {
    tracing::init()?;

    let mut client = ClientApp::connect(&config::host(), config::port()?)?;

    client.send_text_message("Hello World!", "");
    client.status_sync();

    match client.status_async(LoggingObserver).wait(STATUS_TIMEOUT) {
        WaitOutcome::Completed | WaitOutcome::Failed(_) => {}
        WaitOutcome::TimedOut(_) => warn!("status stream not finished within 1 minute"),
    }

    client.shutdown();
    Ok(())
}
