//! Observability subsystem.
//!
//! Structured log events from all subsystems flow through `tracing`;
//! logging.rs owns subscriber setup.

pub mod logging;
