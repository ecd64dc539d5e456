use std::sync::Arc;

use anyhow::Context;
use poem::listener::TcpListener;

use biteship_nodes::api::build_app;
use biteship_nodes::biteship::BiteshipClient;
use biteship_nodes::config::Config;
use biteship_nodes::logging::init;
use biteship_nodes::node::NodeRegistry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init();

    let config = Config::from_env();

    let client = Arc::new(
        BiteshipClient::new(&config).context("Failed to create Biteship client")?,
    );
    let registry = Arc::new(NodeRegistry::with_defaults());
    tracing::info!("Registered nodes: {}", registry.names().join(", "));

    let server_url = format!("http://localhost:{}", config.port);
    let app = build_app(client, registry, &server_url);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting biteship-nodes on {} ({} environment)", addr, config.environment);

    poem::Server::new(TcpListener::bind(addr)).run(app).await?;

    Ok(())
}
