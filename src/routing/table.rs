//! Published routing state.
//!
//! # Design Decisions
//! - Immutable-after-publish is the whole concurrency strategy: builders run
//!   single-threaded, readers take no locks
//! - Reconfiguration builds a complete replacement and swaps one pointer;
//!   in-flight matches finish against the table they loaded
//! - No generation counting: no reader holds a table across a suspend point

use arc_swap::ArcSwap;
use std::sync::Arc;

/// A published, atomically swappable value.
///
/// Wraps whatever aggregate the host builds at configuration time (per-host
/// tables, method pools, rewrite maps).
#[derive(Debug)]
pub struct Shared<T> {
    inner: ArcSwap<T>,
}

impl<T> Shared<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: ArcSwap::from_pointee(value),
        }
    }

    /// Snapshot the currently published value.
    pub fn load(&self) -> Arc<T> {
        self.inner.load_full()
    }

    /// Publish a replacement built from fresh configuration. Readers started
    /// before the swap keep their snapshot.
    pub fn publish(&self, value: T) {
        self.inner.store(Arc::new(value));
    }
}
