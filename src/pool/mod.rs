//! Address pool subsystem.
//!
//! # Data Flow
//! ```text
//! external address source (HTTP, line-oriented)
//!     → cache.rs refresh (10s-timeout GET, no lock held)
//!     → filter.rs (trim, drop blanks, prefix allow-list)
//!     → install under write lock (fail-soft: never clears a good pool)
//!     → read-locked copies handed to the synthesis engine
//! ```
//!
//! # Design Decisions
//! - Refresh is pulled, not scheduled: the snapshot path refreshes when the
//!   pool is stale, and a config save forces one synchronously
//! - Once populated, the pool only ever changes to another non-empty list

pub mod cache;
pub mod filter;

pub use cache::{AddressPool, FetchError, LOOPBACK_PLACEHOLDER, STALE_AFTER};
