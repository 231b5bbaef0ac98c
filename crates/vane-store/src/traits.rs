use crate::error::StoreResult;
use crate::record::Record;

/// Outcome of a read against the shared slot.
///
/// An empty or stale slot is a first-class outcome, not an error: consumers
/// poll the aggregator and "nothing to report" is a normal answer.
#[derive(Clone, Debug, PartialEq)]
pub enum ReadOutcome {
    /// The slot holds a fresh record.
    Fresh(Record),
    /// The slot is empty, or held a stale record that was just evicted.
    Empty,
}

/// Single-slot shared record store.
///
/// All implementations must satisfy these invariants:
/// - At most one record exists at a time; a successful write replaces it
///   wholesale (no field-level merge).
/// - A failed write is a no-op: the slot is left exactly as it was.
/// - Staleness is evaluated lazily, inside `read` only. No implementation
///   may introduce a background sweep.
/// - The mutating step of a read (re-stamp, refresh, evict) is serialized
///   with writes; two writes never interleave.
/// - All I/O errors are propagated, never silently ignored.
pub trait RecordStore: Send + Sync {
    /// Validate `payload` and replace the slot's record, stamped with
    /// `clock` and refreshed to now.
    ///
    /// Returns [`StoreError::InvalidPayload`](crate::StoreError::InvalidPayload)
    /// without mutating the slot if the payload is not a JSON object.
    fn write(&self, payload: &[u8], clock: u64) -> StoreResult<()>;

    /// Read the slot against the server's current logical clock.
    ///
    /// An empty slot returns [`ReadOutcome::Empty`]. A record past the
    /// staleness threshold is evicted and reported as `Empty`. Otherwise the
    /// record is re-stamped with `clock` when `clock` exceeds its stored
    /// stamp, its refresh time is reset, and it is returned as
    /// [`ReadOutcome::Fresh`].
    fn read(&self, clock: u64) -> StoreResult<ReadOutcome>;

    /// Drop the stored record, if any. Returns `true` if one was present.
    fn evict(&self) -> StoreResult<bool>;
}
