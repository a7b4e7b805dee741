use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;

use node_dash::config::ConfigStore;
use node_dash::http::{AppState, HttpServer};
use node_dash::observability::logging;
use node_dash::pool::AddressPool;

#[derive(Parser)]
#[command(name = "node-dash", version, about = "Rotating node subscription dashboard")]
struct Cli {
    /// Directory holding config.json
    #[arg(long, default_value = "node-dash-data")]
    data_dir: PathBuf,

    /// Override the configured dashboard port for this run
    #[arg(long)]
    web_port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    logging::init();

    tracing::info!("node-dash v{} starting", env!("CARGO_PKG_VERSION"));

    if let Err(error) = std::fs::create_dir_all(&cli.data_dir) {
        // Persistence is best-effort; the store runs from memory either way.
        tracing::warn!(data_dir = %cli.data_dir.display(), %error, "Could not create data directory");
    }

    let store = Arc::new(ConfigStore::load_or_default(cli.data_dir.join("config.json")));
    let pool = Arc::new(AddressPool::new());

    // Synchronous initial refresh so the pool is never observed empty.
    let config = store.snapshot().await;
    pool.refresh(&config.source_url, &config.prefix_filter).await;

    // Failing to bind is the only fatal error.
    let web_port = cli.web_port.unwrap_or(config.web_port);
    let listener = TcpListener::bind(("0.0.0.0", web_port)).await?;

    tracing::info!(
        web_port,
        data_dir = %cli.data_dir.display(),
        source_url = %config.source_url,
        "Dashboard ready"
    );

    let server = HttpServer::new(AppState { store, pool });
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
