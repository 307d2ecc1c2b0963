//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber once per process
//! - Respect `RUST_LOG`, defaulting to `info`
//!
//! # Design Decisions
//! - The routing core only emits events (degraded patterns, evaluator
//!   failures); subscriber wiring stays here so libraries and tests can opt
//!   in without duplicating setup

use tracing_subscriber::EnvFilter;

/// Install the global subscriber. Safe to call more than once; later calls
/// are no-ops.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
