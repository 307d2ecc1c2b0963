//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Configuration (build time):
//!     pattern declarations
//!     → pattern.rs (compile to MaskInfo)
//!     → pool.rs (per-method registries)
//!     → table.rs (publish, atomic swap on reload)
//!
//! Request (steady state):
//!     request path
//!     → rewrite.rs (first-segment rewrite lookup)
//!     → matcher.rs (fixed-part reject, structural match, captures)
//!     → consumer callback
//! ```
//!
//! # Design Decisions
//! - Compilation never fails; bad rules degrade and log
//! - Pools are immutable after publish, matching takes no locks
//! - First registered, first tried

pub mod matcher;
pub mod pattern;
pub mod pool;
pub mod rewrite;
pub mod table;

pub use matcher::{mask_matches, matches, search, MatchOutcome};
pub use pattern::{compile, compile_set, CaseSensitivity, MaskInfo, MaskPart};
pub use pool::{MethodPools, PoolEntry, UrlPool};
pub use rewrite::{RewriteMap, RewriteRule};
pub use table::Shared;
