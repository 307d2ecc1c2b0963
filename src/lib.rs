//! Routing core of a configurable HTTP micro-gateway.
//!
//! Declarative path patterns (quantified wildcards, slash-aware and
//! slash-unaware globs, embedded regular expressions, named captures,
//! conditional blocks) are compiled once at configuration time and resolved
//! against request paths at request time, shared by URL rewriting, action
//! and module dispatch, and CORS origin lists.

pub mod config;
pub mod dispatch;
pub mod expression;
pub mod gateway;
pub mod observability;
pub mod routing;
pub mod security;

pub use config::{GatewayConfig, load_config, parse_config};
pub use dispatch::{ActionDispatcher, ModuleDispatcher, ModuleRegistry, ProcessorRegistry, RequestContext};
pub use expression::{ConditionEvaluator, NoConditions};
pub use gateway::{GatewayTable, HostTable};
pub use routing::{MaskInfo, MethodPools, RewriteMap, Shared, UrlPool};
pub use security::OriginList;
