//! Origin-list matching for CORS host lists.
//!
//! A list is one whitespace-separated declaration of origin patterns (OR
//! semantics, same mini-language as path rules). The calling layer uses the
//! verdict to decide whether to echo the request's Origin header.

use std::sync::Arc;

use crate::expression::{Cache, ConditionEvaluator};
use crate::routing::pattern::MaskInfo;
use crate::routing::{matcher, pattern};

/// Compile cache shared across hosts: identical declarations share one
/// parsed pattern set.
pub type PatternCache = Cache<Vec<MaskInfo>>;

/// A compiled list of allowed origins.
#[derive(Debug, Clone)]
pub struct OriginList {
    masks: Arc<Vec<MaskInfo>>,
    allow_any: bool,
}

impl OriginList {
    /// Compile a declaration; `None` when it is blank (list not configured).
    pub fn parse(declaration: &str) -> Option<Self> {
        Self::build(declaration, Arc::new(pattern::compile_set(declaration)))
    }

    /// Like [`parse`](Self::parse), but byte-identical declarations reuse the
    /// cached pattern set.
    pub fn parse_cached(cache: &PatternCache, declaration: &str) -> Option<Self> {
        Self::build(
            declaration,
            cache.get_or_compute(declaration, pattern::compile_set),
        )
    }

    fn build(declaration: &str, masks: Arc<Vec<MaskInfo>>) -> Option<Self> {
        if masks.is_empty() {
            return None;
        }
        let allow_any = declaration.split_whitespace().any(|token| token == "*");
        Some(Self { masks, allow_any })
    }

    /// The list contains a literal `*`: every origin is acceptable and the
    /// caller may skip per-request comparison.
    pub fn allows_any(&self) -> bool {
        self.allow_any
    }

    /// Whether `origin` belongs to the list, member order, first verdict.
    pub fn matches(&self, origin: &str, eval: &dyn ConditionEvaluator) -> bool {
        self.allow_any
            || self
                .masks
                .iter()
                .any(|mask| matcher::matches(mask, origin, eval))
    }
}
