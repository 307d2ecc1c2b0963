//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → GatewayConfig (validated, immutable)
//!     → gateway.rs builds routing tables from it
//!
//! On reload:
//!     load new config → build new tables → routing::Shared::publish
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a full rebuild
//! - All fields have defaults to allow minimal configs
//! - Bad pattern syntax is not a config error: the compiler degrades it

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{ActionConfig, GatewayConfig, HostConfig, ModuleConfig, RewriteConfig};
pub use validation::{validate_config, ValidationError};
