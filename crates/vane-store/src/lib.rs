//! Single-slot shared record store for the vane aggregation service.
//!
//! The aggregator holds at most one [`Record`] at a time: an opaque,
//! validated JSON object submitted by a publisher, stamped with the logical
//! clock value at which it was last written or re-validated. A new write
//! fully replaces the stored record; there is no field-level merge.
//!
//! # Storage Backends
//!
//! All backends implement the [`RecordStore`] trait:
//!
//! - [`MemorySlot`] -- `RwLock`-guarded in-memory slot for tests and embedding
//! - [`FileSlot`] -- single JSON file replaced wholesale on each write
//!
//! # Design Rules
//!
//! 1. Exactly one record exists at a time; writes replace it wholesale.
//! 2. Failed writes are no-ops: a malformed payload never mutates the slot.
//! 3. Staleness is checked lazily, only on read. There is no background
//!    sweep; a record that is never read again is never evicted.
//! 4. A read that needs to mutate (re-stamp, refresh, evict) performs that
//!    step under the same exclusive lock as writes.
//! 5. All I/O errors are propagated, never silently ignored.

pub mod error;
pub mod file;
pub mod freshness;
pub mod memory;
pub mod record;
pub mod traits;

// Re-export primary types at crate root for ergonomic imports.
pub use error::{StoreError, StoreResult};
pub use file::FileSlot;
pub use freshness::{FreshnessPolicy, DEFAULT_STALENESS};
pub use memory::MemorySlot;
pub use record::{Record, CLOCK_FIELD};
pub use traits::{ReadOutcome, RecordStore};
