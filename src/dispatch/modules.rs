//! Endpoint-module dispatch.
//!
//! Modules extend the gateway with named handlers bound to URL patterns; the
//! machinery mirrors action dispatch but resolves the handler by the module's
//! own name instead of a shared type name.

use std::collections::HashMap;

use tracing::warn;

use super::context::RequestContext;
use crate::config::schema::ModuleConfig;
use crate::expression::ConditionEvaluator;
use crate::routing::matcher;
use crate::routing::pool::MethodPools;

/// Handler invoked for a matched endpoint module. Returns false to decline.
pub type ModuleHandler = Box<dyn Fn(&mut RequestContext) -> bool + Send + Sync>;

/// Module handlers keyed by module name.
#[derive(Default)]
pub struct ModuleRegistry {
    handlers: HashMap<String, ModuleHandler>,
}

impl ModuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler under `name`; duplicates are logged and kept out.
    pub fn register<F>(&mut self, name: &str, handler: F) -> bool
    where
        F: Fn(&mut RequestContext) -> bool + Send + Sync + 'static,
    {
        if self.handlers.contains_key(name) {
            warn!(module = %name, "endpoint module already registered");
            return false;
        }
        self.handlers.insert(name.to_string(), Box::new(handler));
        true
    }

    fn fire(&self, module: &ModuleConfig, ctx: &mut RequestContext) -> bool {
        match self.handlers.get(&module.name) {
            Some(handler) => handler(ctx),
            None => {
                warn!(module = %module.name, url = %module.url, "endpoint module has no handler");
                false
            }
        }
    }
}

/// Per-method module tables built once from configuration.
#[derive(Debug, Clone)]
pub struct ModuleDispatcher {
    pools: MethodPools<ModuleConfig>,
}

impl ModuleDispatcher {
    pub fn from_modules(modules: &[ModuleConfig]) -> Option<Self> {
        if modules.is_empty() {
            return None;
        }
        let mut pools = MethodPools::new();
        for module in modules {
            pools.register(&module.method, &module.url, module.clone());
        }
        Some(Self { pools })
    }

    pub fn dispatch(
        &self,
        registry: &ModuleRegistry,
        ctx: &mut RequestContext,
        eval: &dyn ConditionEvaluator,
    ) -> bool {
        let Some(pool) = self.pools.pool(&ctx.method) else {
            return false;
        };
        let path = ctx.path.clone();
        matcher::search(pool, &path, eval, |module, captures| {
            ctx.set_url_params(captures.clone());
            registry.fire(module, ctx)
        })
        .is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expression::NoConditions;

    fn module(name: &str, method: &str, url: &str) -> ModuleConfig {
        ModuleConfig {
            name: name.to_string(),
            url: url.to_string(),
            method: method.to_string(),
        }
    }

    #[test]
    fn dispatch_by_module_name() {
        let mut registry = ModuleRegistry::new();
        registry.register("health", |ctx| {
            ctx.path == "/health"
        });
        let dispatcher = ModuleDispatcher::from_modules(&[module("health", "", "/health")]).unwrap();

        let mut ctx = RequestContext::new("GET", "/health");
        assert!(dispatcher.dispatch(&registry, &mut ctx, &NoConditions));
        let mut ctx = RequestContext::new("GET", "/other");
        assert!(!dispatcher.dispatch(&registry, &mut ctx, &NoConditions));
    }

    #[test]
    fn missing_handler_declines_the_request() {
        let registry = ModuleRegistry::new();
        let dispatcher = ModuleDispatcher::from_modules(&[module("ghost", "", "/g")]).unwrap();
        let mut ctx = RequestContext::new("GET", "/g");
        assert!(!dispatcher.dispatch(&registry, &mut ctx, &NoConditions));
    }
}
