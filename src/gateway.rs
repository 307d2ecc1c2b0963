//! Per-host routing tables.
//!
//! # Data Flow
//! ```text
//! GatewayConfig
//!     → HostTable::build per server entry
//!       (rewrite map, action/module pools, origin list)
//!     → GatewayTable (default table + host name lookup)
//!     → routing::Shared for publication
//! ```
//!
//! # Design Decisions
//! - All hosts named by one entry share a single built table
//! - An unknown host falls back to the default table
//! - A pattern compile cache is shared across the whole build so repeated
//!   declarations compile once

use std::collections::HashMap;
use std::sync::Arc;

use tracing::warn;

use crate::config::schema::{GatewayConfig, HostConfig};
use crate::dispatch::{ActionDispatcher, ModuleDispatcher};
use crate::routing::rewrite::RewriteMap;
use crate::security::origins::{OriginList, PatternCache};

/// Routing state for one (set of) host(s), immutable once built.
#[derive(Debug)]
pub struct HostTable {
    pub rewrites: RewriteMap,
    pub actions: Option<ActionDispatcher>,
    pub modules: Option<ModuleDispatcher>,
    pub origins: Option<OriginList>,
}

impl HostTable {
    fn build(config: &HostConfig, cache: &PatternCache) -> Self {
        let mut rewrites = RewriteMap::new();
        for rule in &config.rewrites {
            if rule.from.trim().is_empty() {
                // already reported by validation
                continue;
            }
            rewrites.add(&rule.from, &rule.to);
        }
        Self {
            rewrites,
            actions: ActionDispatcher::from_actions(&config.actions),
            modules: ModuleDispatcher::from_modules(&config.modules),
            origins: OriginList::parse_cached(cache, &config.access_control_allow_origin),
        }
    }
}

/// The complete built routing state: one default table plus host overrides.
#[derive(Debug)]
pub struct GatewayTable {
    pub default_host: HostTable,
    hosts: HashMap<String, Arc<HostTable>>,
}

impl GatewayTable {
    /// Build all tables from validated configuration. Single-threaded by
    /// design; publish the result via [`crate::routing::Shared`].
    pub fn build(config: &GatewayConfig) -> Self {
        let cache = PatternCache::new();
        let default_host = HostTable::build(&config.server, &cache);
        let mut hosts: HashMap<String, Arc<HostTable>> = HashMap::new();
        for (index, server) in config.host_servers.iter().enumerate() {
            let names: Vec<&str> = server.hosts.split_whitespace().collect();
            if names.is_empty() {
                warn!(index, "host server entry has no hosts and is skipped");
                continue;
            }
            let table = Arc::new(HostTable::build(server, &cache));
            for name in names {
                if hosts.contains_key(name) {
                    warn!(host = %name, "duplicated host, keeping the first entry");
                    continue;
                }
                hosts.insert(name.to_string(), Arc::clone(&table));
            }
        }
        Self {
            default_host,
            hosts,
        }
    }

    /// The table serving `host`, falling back to the default table.
    pub fn host(&self, host: &str) -> &HostTable {
        self.hosts
            .get(host)
            .map(Arc::as_ref)
            .unwrap_or(&self.default_host)
    }
}
