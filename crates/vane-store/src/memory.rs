use std::sync::RwLock;
use std::time::Instant;

use crate::error::StoreResult;
use crate::freshness::FreshnessPolicy;
use crate::record::Record;
use crate::traits::{ReadOutcome, RecordStore};

/// The occupied state of the slot: the record plus its last-refresh time.
///
/// `last_refreshed` is wall-clock-adjacent (`Instant`), used only for the
/// staleness decision, never for ordering.
struct Slot {
    record: Record,
    last_refreshed: Instant,
}

/// In-memory single-slot store.
///
/// The slot is held behind an `RwLock`. Plain inspection (is the slot
/// empty?) takes the shared lock; every step that mutates -- writing,
/// evicting a stale record, re-stamping, refreshing -- takes the exclusive
/// lock. Because `std` read locks cannot be upgraded, the read path drops
/// the shared lock, re-acquires exclusively, and re-validates the slot
/// before mutating, so no update is ever lost to the gap between locks.
pub struct MemorySlot {
    slot: RwLock<Option<Slot>>,
    policy: FreshnessPolicy,
}

impl MemorySlot {
    /// Create an empty slot with the default 30-second staleness policy.
    pub fn new() -> Self {
        Self::with_policy(FreshnessPolicy::default())
    }

    /// Create an empty slot with an explicit staleness policy.
    pub fn with_policy(policy: FreshnessPolicy) -> Self {
        Self {
            slot: RwLock::new(None),
            policy,
        }
    }

    /// `true` if no record is currently stored.
    pub fn is_empty(&self) -> bool {
        self.slot.read().expect("lock poisoned").is_none()
    }
}

impl Default for MemorySlot {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordStore for MemorySlot {
    fn write(&self, payload: &[u8], clock: u64) -> StoreResult<()> {
        // Validate before touching the lock: a malformed payload must leave
        // the slot untouched, and parsing needs no synchronization.
        let mut record = Record::parse(payload)?;
        record.stamp(clock);

        let mut slot = self.slot.write().expect("lock poisoned");
        *slot = Some(Slot {
            record,
            last_refreshed: Instant::now(),
        });
        Ok(())
    }

    fn read(&self, clock: u64) -> StoreResult<ReadOutcome> {
        {
            let slot = self.slot.read().expect("lock poisoned");
            if slot.is_none() {
                return Ok(ReadOutcome::Empty);
            }
            // A non-empty read always mutates: it refreshes the slot, and may
            // re-stamp or evict. Fall through to the exclusive lock.
        }

        let mut guard = self.slot.write().expect("lock poisoned");
        let now = Instant::now();
        match guard.as_mut() {
            // The record vanished between the two locks.
            None => Ok(ReadOutcome::Empty),
            Some(slot) if self.policy.is_stale(slot.last_refreshed, now) => {
                tracing::debug!(
                    stamped_clock = slot.record.stamped_clock(),
                    "evicting stale record"
                );
                *guard = None;
                Ok(ReadOutcome::Empty)
            }
            Some(slot) => {
                // Keep the persisted stamp caught up with server-observed
                // events even when no write occurred.
                if clock > slot.record.stamped_clock() {
                    slot.record.stamp(clock);
                }
                slot.last_refreshed = now;
                Ok(ReadOutcome::Fresh(slot.record.clone()))
            }
        }
    }

    fn evict(&self) -> StoreResult<bool> {
        let mut slot = self.slot.write().expect("lock poisoned");
        Ok(slot.take().is_some())
    }
}

impl std::fmt::Debug for MemorySlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemorySlot")
            .field("occupied", &!self.is_empty())
            .field("policy", &self.policy)
            .finish()
    }
}
