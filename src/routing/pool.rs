//! URL pool / registry.
//!
//! # Responsibilities
//! - Map compiled pattern sets to opaque handler values, per HTTP method
//! - Preserve registration order as match-priority order
//!
//! # Design Decisions
//! - Build-time only: pools are fully constructed, then published read-only;
//!   no locking is needed on the request path
//! - No deduplication; first registered, first tried
//! - Handlers are a caller-chosen type parameter, the pool never looks inside

use std::collections::HashMap;

use super::pattern::{self, MaskInfo};

/// One registered entry: the compiled alternatives of a declaration plus the
/// handler they resolve to.
#[derive(Debug, Clone)]
pub struct PoolEntry<H> {
    pub masks: Vec<MaskInfo>,
    pub handler: H,
}

/// An ordered collection of pattern-set/handler pairs for one HTTP method.
#[derive(Debug, Clone, Default)]
pub struct UrlPool<H> {
    entries: Vec<PoolEntry<H>>,
}

impl<H> UrlPool<H> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Compile `declaration` into a pattern set and append it. Registration
    /// order is the order the matcher tries entries in.
    pub fn register(&mut self, declaration: &str, handler: H) {
        self.entries.push(PoolEntry {
            masks: pattern::compile_set(declaration),
            handler,
        });
    }

    pub fn entries(&self) -> &[PoolEntry<H>] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Per-method pools. Methods are normalized to uppercase; an empty or blank
/// method registers under `GET`.
#[derive(Debug, Clone, Default)]
pub struct MethodPools<H> {
    pools: HashMap<String, UrlPool<H>>,
}

impl<H> MethodPools<H> {
    pub fn new() -> Self {
        Self {
            pools: HashMap::new(),
        }
    }

    pub fn register(&mut self, method: &str, declaration: &str, handler: H) {
        let method = normalize_method(method);
        self.pools
            .entry(method)
            .or_insert_with(UrlPool::new)
            .register(declaration, handler);
    }

    /// The pool for a request method, if any route was registered for it.
    pub fn pool(&self, method: &str) -> Option<&UrlPool<H>> {
        self.pools.get(&normalize_method(method))
    }

    pub fn is_empty(&self) -> bool {
        self.pools.is_empty()
    }
}

fn normalize_method(method: &str) -> String {
    let method = method.trim();
    if method.is_empty() {
        "GET".to_string()
    } else {
        method.to_uppercase()
    }
}
