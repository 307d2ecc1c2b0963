//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Catch empty declarations that would silently never route
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Pattern syntax itself is NOT validated here: the compiler degrades bad
//!   patterns by design instead of rejecting the whole config

use thiserror::Error;

use super::schema::GatewayConfig;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("action '{0}' has an empty url")]
    ActionWithoutUrl(String),
    #[error("module '{0}' has an empty url")]
    ModuleWithoutUrl(String),
    #[error("rewrite rule has an empty 'from' path")]
    RewriteWithoutSource,
    #[error("host '{0}' appears in more than one host server")]
    DuplicateHost(String),
}

/// Validate the whole configuration, collecting every error.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let mut seen_hosts = std::collections::HashSet::new();

    let servers = std::iter::once(&config.server).chain(config.host_servers.iter());
    for server in servers {
        for action in &server.actions {
            if action.url.trim().is_empty() {
                errors.push(ValidationError::ActionWithoutUrl(action.name.clone()));
            }
        }
        for module in &server.modules {
            if module.url.trim().is_empty() {
                errors.push(ValidationError::ModuleWithoutUrl(module.name.clone()));
            }
        }
        for rewrite in &server.rewrites {
            if rewrite.from.trim().is_empty() {
                errors.push(ValidationError::RewriteWithoutSource);
            }
        }
    }
    for server in &config.host_servers {
        for host in server.hosts.split_whitespace() {
            if !seen_hosts.insert(host.to_string()) {
                errors.push(ValidationError::DuplicateHost(host.to_string()));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
