//! Rotating node subscription dashboard.
//!
//! Serves a pool of node descriptors (server address + credential +
//! transport metadata) assembled from operator-configured credential/domain
//! pairs and a periodically refreshed external address list.
//!
//! # Architecture Overview
//!
//! ```text
//!                 ┌──────────────────────────────────────────────┐
//!                 │                  NODE-DASH                   │
//!                 │                                              │
//!  GET /sub ──────┼─▶ http/server ──▶ pool (staleness-gated      │
//!                 │        │               refresh, fail-soft)   │
//!                 │        ▼                                     │
//!                 │   config store ──▶ synth engine ──▶ JSON     │
//!                 │   (RwLock +        (hour rotation,           │
//!                 │    JSON persist)    owned copies)            │
//!                 │                                              │
//!  POST /save ────┼─▶ http/form ──▶ config store ──▶ forced      │
//!                 │   (indexed rows)  (write lock,    refresh    │
//!                 │                    persist)      (sync)      │
//!                 └──────────────────────────────────────────────┘
//! ```
//!
//! Both shared resources (config, address pool) live behind their own
//! reader/writer lock and are passed into handlers as `Arc` handles.

// Core subsystems
pub mod config;
pub mod http;
pub mod pool;
pub mod synth;

// Cross-cutting concerns
pub mod observability;

pub use config::{Config, ConfigStore};
pub use http::{AppState, HttpServer};
pub use pool::AddressPool;
