//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use tokio::io::AsyncWriteExt;
use tokio::net::TcpListener;

use node_dash::config::{Config, ConfigStore};
use node_dash::http::{AppState, HttpServer};
use node_dash::pool::AddressPool;

/// Start a mock address source that returns a fixed line-oriented body.
pub async fn start_address_source(addr: SocketAddr, body: &'static str) {
    let listener = TcpListener::bind(addr).await.unwrap();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    tokio::spawn(async move {
                        let response = format!(
                            "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });
}

/// Write `config` to a fresh per-test data dir and return the config path.
pub fn write_config(test_name: &str, config: &Config) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("node-dash-it-{}-{}", test_name, std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("config.json");
    std::fs::write(&path, serde_json::to_vec_pretty(config).unwrap()).unwrap();
    path
}

/// Load the store from `config_path`, do the startup refresh, and serve the
/// dashboard on `addr`.
pub async fn start_app(addr: SocketAddr, config_path: PathBuf) {
    let store = Arc::new(ConfigStore::load_or_default(config_path));
    let pool = Arc::new(AddressPool::new());

    let config = store.snapshot().await;
    pool.refresh(&config.source_url, &config.prefix_filter).await;

    let server = HttpServer::new(AppState { store, pool });
    let listener = TcpListener::bind(addr).await.unwrap();
    tokio::spawn(async move {
        let _ = server.run(listener).await;
    });
}

/// Client without proxy or pooling surprises.
pub fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
