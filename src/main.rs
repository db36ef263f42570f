use anyhow::{Context, Result};
use clap::Parser;
use distributed_counter::config::{Args, NodeConfig};
use distributed_counter::node::Node;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Exits the process if NODE_ID is missing
    let args = Args::parse();

    init_logging(&args.log_level, args.json_logs);

    let config = NodeConfig::from_args(&args);
    tracing::info!("Starting node {}", config.node_id);
    if config.seeds.is_empty() {
        tracing::info!("Starting as seed node (founder)");
    } else {
        tracing::info!("Seed peers: {:?}", config.seeds);
    }

    let listener = tokio::net::TcpListener::bind(config.node_id.as_str())
        .await
        .with_context(|| format!("failed to bind {}", config.node_id))?;

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
        tracing::info!("Shutdown signal received");
    };

    Node::new(config).run(listener, shutdown).await
}

fn init_logging(level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true))
            .init();
    }
}
