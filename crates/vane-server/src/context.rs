use vane_clock::LamportClock;
use vane_store::{FileSlot, FreshnessPolicy, MemorySlot, RecordStore};

use crate::config::ServerConfig;

/// Shared per-process state: one clock, one slot.
///
/// Built once at startup and handed by `Arc` into every request handler.
/// No request owns either member; the clock is mutated only through its two
/// atomic operations and the slot only under its lock.
pub struct AggregatorContext {
    pub clock: LamportClock,
    pub store: Box<dyn RecordStore>,
}

impl AggregatorContext {
    /// Context over an in-memory slot with the given staleness policy.
    pub fn in_memory(policy: FreshnessPolicy) -> Self {
        Self::with_store(Box::new(MemorySlot::with_policy(policy)))
    }

    /// Context over an arbitrary store backend.
    pub fn with_store(store: Box<dyn RecordStore>) -> Self {
        Self {
            clock: LamportClock::new(),
            store,
        }
    }

    /// Build the context a config describes: file-backed when `data_path`
    /// is set, in-memory otherwise.
    pub fn from_config(config: &ServerConfig) -> Self {
        let policy = FreshnessPolicy::new(config.staleness);
        match &config.data_path {
            Some(path) => Self::with_store(Box::new(FileSlot::open(path, policy))),
            None => Self::in_memory(policy),
        }
    }
}

impl std::fmt::Debug for AggregatorContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AggregatorContext")
            .field("clock", &self.clock.current())
            .finish()
    }
}
