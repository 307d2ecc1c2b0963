//! Security subsystem.
//!
//! # Design Decisions
//! - Origin decisions reuse the routing pattern language; one matcher, one
//!   set of semantics across path rules and host lists
//! - Header injection itself happens in the calling layer; this subsystem
//!   only answers "does this origin belong to the configured list"

pub mod origins;

pub use origins::OriginList;
