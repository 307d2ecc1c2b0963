//! Endpoint dispatch consumers.
//!
//! # Data Flow
//! ```text
//! Configuration (build time):
//!     action/module declarations
//!     → grouped by HTTP method into routing pools
//!
//! Request:
//!     method + path
//!     → pool lookup via routing::matcher
//!     → verification callback stores named captures in the RequestContext
//!     → processor looked up by registered name and fired
//!     → processor refusal continues the search (business-level veto)
//! ```
//!
//! # Design Decisions
//! - Processor registries are explicit objects owned by the host, never
//!   process-wide globals
//! - An unknown processor name is logged and treated as a veto, not an error

pub mod actions;
pub mod context;
pub mod modules;

pub use actions::{ActionDispatcher, ProcessorRegistry};
pub use context::RequestContext;
pub use modules::{ModuleDispatcher, ModuleRegistry};
