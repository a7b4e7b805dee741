//! HTTP server setup and handlers.
//!
//! # Responsibilities
//! - Create the Axum router with the dashboard routes
//! - Wire up middleware (tracing, request timeout)
//! - Share the config store and address pool with every handler
//! - Serve until a shutdown signal arrives
//!
//! # Routes
//! - `GET /`       — dashboard page (static asset)
//! - `GET /config` — read-locked config copy for the dashboard form
//! - `GET /sub`    — staleness-gated refresh, then synthesized descriptors
//! - `POST /save`  — apply the form update, then force a pool refresh

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use axum::{
    extract::State,
    response::Html,
    routing::{get, post},
    Form, Json, Router,
};
use tokio::net::TcpListener;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::{Config, ConfigStore};
use crate::http::form::update_from_form;
use crate::pool::AddressPool;
use crate::synth::{synthesize, NodeDescriptor};

const DASHBOARD_HTML: &str = include_str!("../../assets/dashboard.html");

/// Total budget per request; comfortably covers the 10s fetch in `/save`.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Application state injected into handlers.
///
/// Handlers receive the two shared resources as explicit handles; nothing
/// in this crate reads them through globals.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<ConfigStore>,
    pub pool: Arc<AddressPool>,
}

/// HTTP server for the node dashboard.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    pub fn new(state: AppState) -> Self {
        Self {
            router: Self::build_router(state),
        }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState) -> Router {
        Router::new()
            .route("/", get(dashboard))
            .route("/config", get(get_config))
            .route("/sub", get(get_subscription))
            .route("/save", post(save_config))
            .with_state(state)
            .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

async fn dashboard() -> Html<&'static str> {
    Html(DASHBOARD_HTML)
}

/// Read-locked deep copy for rendering; the live header map is never
/// handed out.
async fn get_config(State(state): State<AppState>) -> Json<Config> {
    Json(state.store.snapshot().await)
}

/// The subscription endpoint. Never fails: unrecoverable conditions
/// (no usable credential, no addresses) yield an empty array.
async fn get_subscription(State(state): State<AppState>) -> Json<Vec<NodeDescriptor>> {
    if state.pool.is_stale().await {
        let config = state.store.snapshot().await;
        state
            .pool
            .refresh(&config.source_url, &config.prefix_filter)
            .await;
    }

    // Owned snapshots; both locks are released before synthesis copies.
    let config = state.store.snapshot().await;
    let addresses = state.pool.addresses().await;
    Json(synthesize(&config, &addresses, SystemTime::now()))
}

/// Apply a dashboard save, then force a synchronous refresh so the next
/// subscription reflects both the new config and a fresh fetch attempt.
async fn save_config(
    State(state): State<AppState>,
    Form(fields): Form<HashMap<String, String>>,
) -> Json<serde_json::Value> {
    let update = update_from_form(&fields);
    tracing::info!(rows = update.credentials.len(), "Applying config update");
    state.store.apply_update(update).await;

    let config = state.store.snapshot().await;
    state
        .pool
        .refresh(&config.source_url, &config.prefix_filter)
        .await;

    Json(serde_json::json!({ "status": "ok" }))
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received");
}
