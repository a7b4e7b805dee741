//! Node synthesis subsystem.
//!
//! # Data Flow
//! ```text
//! config snapshot + pooled addresses + now
//!     → engine.rs active_credential (hour mod len, fallback scan)
//!     → engine.rs synthesize (one descriptor per address)
//!     → descriptor.rs NodeDescriptor (owned copies, serialized to /sub)
//! ```

pub mod descriptor;
pub mod engine;

pub use descriptor::NodeDescriptor;
pub use engine::{active_credential, synthesize};
