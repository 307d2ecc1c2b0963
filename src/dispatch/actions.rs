//! Action endpoint dispatch.
//!
//! # Responsibilities
//! - Keep the registry of action processors by type name
//! - Group configured actions into per-method URL pools
//! - Resolve a request to the first matching action and fire it

use std::collections::HashMap;

use tracing::warn;

use super::context::RequestContext;
use crate::config::schema::ActionConfig;
use crate::expression::ConditionEvaluator;
use crate::routing::matcher;
use crate::routing::pool::MethodPools;

/// Processor invoked for a matched action. Returns false to decline the
/// request, which lets the matcher continue searching.
pub type ActionProcessor = Box<dyn Fn(&ActionConfig, &mut RequestContext) -> bool + Send + Sync>;

/// Action processors keyed by the `type` name actions refer to.
#[derive(Default)]
pub struct ProcessorRegistry {
    processors: HashMap<String, ActionProcessor>,
}

impl ProcessorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a processor under `name`. Returns false (and logs) if the
    /// name is already taken; the existing processor is kept.
    pub fn register<F>(&mut self, name: &str, processor: F) -> bool
    where
        F: Fn(&ActionConfig, &mut RequestContext) -> bool + Send + Sync + 'static,
    {
        if self.processors.contains_key(name) {
            warn!(processor = %name, "action processor already registered");
            return false;
        }
        self.processors.insert(name.to_string(), Box::new(processor));
        true
    }

    /// Fire `action`'s processor. An unknown type name is logged and counts
    /// as a refusal.
    pub fn fire(&self, action: &ActionConfig, ctx: &mut RequestContext) -> bool {
        match self.processors.get(&action.kind) {
            Some(processor) => processor(action, ctx),
            None => {
                warn!(
                    action = %action.name,
                    url = %action.url,
                    kind = %action.kind,
                    "action has unknown processor type"
                );
                false
            }
        }
    }
}

/// Per-method action tables built once from configuration.
#[derive(Debug, Clone)]
pub struct ActionDispatcher {
    pools: MethodPools<ActionConfig>,
}

impl ActionDispatcher {
    /// Group `actions` by method into URL pools. Returns `None` when there is
    /// nothing to dispatch, so hosts can skip the layer entirely.
    pub fn from_actions(actions: &[ActionConfig]) -> Option<Self> {
        if actions.is_empty() {
            return None;
        }
        let mut pools = MethodPools::new();
        for action in actions {
            pools.register(&action.method, &action.url, action.clone());
        }
        Some(Self { pools })
    }

    /// Resolve and fire the first action accepting the request. Captures of
    /// the winning pattern are stored into `ctx` before the processor runs.
    pub fn dispatch(
        &self,
        registry: &ProcessorRegistry,
        ctx: &mut RequestContext,
        eval: &dyn ConditionEvaluator,
    ) -> bool {
        let Some(pool) = self.pools.pool(&ctx.method) else {
            return false;
        };
        let path = ctx.path.clone();
        matcher::search(pool, &path, eval, |action, captures| {
            ctx.set_url_params(captures.clone());
            registry.fire(action, ctx)
        })
        .is_some()
    }
}
