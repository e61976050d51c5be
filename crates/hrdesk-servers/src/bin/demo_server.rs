use anyhow::Context;
use hrdesk_servers::{demo::DemoServer, transport, ServersConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServersConfig::load().context("Failed to load configuration")?;
    hrdesk_config::init_logging(&config.logging);

    transport::serve_stdio(DemoServer::new()).await
}
