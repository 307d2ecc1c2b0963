//! Configuration schema definitions.
//!
//! This module defines the routing-relevant configuration structure for the
//! gateway. All types derive Serde traits for deserialization from config
//! files; every field has a default so minimal configs load.

use serde::{Deserialize, Serialize};

/// Root configuration: one default server plus host-specific overrides.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Default server, used when no host-specific entry matches.
    pub server: HostConfig,

    /// Host-specific servers; each applies to the hosts it names.
    pub host_servers: Vec<HostConfig>,
}

/// Routing configuration for one (set of) host(s).
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct HostConfig {
    /// Whitespace-separated host names this entry serves. Ignored on the
    /// default server.
    pub hosts: String,

    /// URL rewrite rules, applied before dispatch.
    pub rewrites: Vec<RewriteConfig>,

    /// Action endpoints, grouped by method at build time.
    pub actions: Vec<ActionConfig>,

    /// Endpoint modules, grouped by method at build time.
    pub modules: Vec<ModuleConfig>,

    /// Allowed CORS origins (whitespace-separated pattern declaration,
    /// `*` allows any). Empty disables the list.
    pub access_control_allow_origin: String,
}

/// One rewrite rule. A trailing `*` on `from` requests a prefix rewrite.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RewriteConfig {
    pub from: String,
    pub to: String,
}

/// One action endpoint.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ActionConfig {
    /// Action identifier for logging.
    pub name: String,

    /// URL pattern declaration the action answers.
    pub url: String,

    /// HTTP method; empty means GET.
    pub method: String,

    /// Processor type name, resolved in the host's `ProcessorRegistry`.
    #[serde(rename = "type")]
    pub kind: String,
}

/// One endpoint module binding a registered handler name to a URL pattern.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ModuleConfig {
    /// Registered handler name, resolved in the host's `ModuleRegistry`.
    pub name: String,

    /// URL pattern declaration the module answers.
    pub url: String,

    /// HTTP method; empty means GET.
    pub method: String,
}
