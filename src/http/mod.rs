//! HTTP surface of the dashboard.
//!
//! # Data Flow
//! ```text
//! browser form POST (urlencoded, indexed rows)
//!     → form.rs (decode to ConfigUpdate + Vec<CredentialEntry>)
//!     → config store apply_update (write lock, persist)
//!     → forced pool refresh (synchronous)
//!
//! subscription GET
//!     → server.rs (staleness check → optional refresh)
//!     → synth engine (owned snapshots)
//!     → JSON descriptor array
//! ```

pub mod form;
pub mod server;

pub use server::{AppState, HttpServer};
