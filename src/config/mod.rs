//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config.json (may be missing or corrupt)
//!     → store.rs load_or_default (parse, zero-value fallback)
//!     → schema.rs apply_defaults (fill zero-valued fields)
//!     → persist (storage mirrors memory from the first run)
//!     → held behind RwLock, shared via Arc to all handlers
//!
//! On dashboard save:
//!     http/form.rs parses the indexed rows
//!     → store.rs apply_update (write lock, mutate, persist, unlock)
//!     → caller forces an address-pool refresh
//! ```
//!
//! # Design Decisions
//! - Mutation goes through `ConfigStore` only; no raw field access escapes
//!   this module's lock discipline
//! - All fields default so a minimal or damaged file still loads
//! - Defaulting is zero-value gated and idempotent

pub mod schema;
pub mod store;

pub use schema::{Config, CredentialEntry, NodeTemplate, TlsTemplate, TransportTemplate, UtlsTemplate};
pub use store::{ConfigStore, ConfigUpdate, PersistError};
