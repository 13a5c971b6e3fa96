use monitor_common::{
    config,
    proto::{client_service_client::ClientServiceClient, TextMessage},
    tracing::{self, info},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing::init()?;

    let mut args = std::env::args().skip(1);
    let message = args.next().unwrap_or_else(|| "Hello World!".to_owned());
    let recipient = args.next().unwrap_or_default();

    let address = config::address()?;
    info!("connecting to {}", address);
    let mut client = ClientServiceClient::connect(address).await?;

    let resp = client
        .send_text_message(TextMessage::new(message, recipient))
        .await?
        .into_inner();

    println!("{:?}", resp);

    Ok(())
}
