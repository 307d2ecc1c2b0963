//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events via tracing)
//!
//! Consumers:
//!     → log aggregation (stdout, file, remote)
//! ```
//!
//! # Design Decisions
//! - Structured events carry the offending pattern/expression as fields
//! - Configuration errors are warnings, never fatal: a degraded rule logs
//!   once at build time and silently never matches afterwards

pub mod logging;
