use futures::prelude::*;

use monitor_common::{
    config,
    proto::client_service_client::ClientServiceClient,
    tracing::{self, info},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing::init()?;

    let address = config::address()?;
    info!("connecting to {}", address);
    let mut client = ClientServiceClient::connect(address).await?;

    let mut resp = client.status(()).await?;

    let stream = resp.get_mut();

    while let Some(details) = stream.try_next().await? {
        println!("{:?}", details);
    }

    Ok(())
}
