use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use std::time::Instant;

use crate::error::StoreResult;
use crate::freshness::FreshnessPolicy;
use crate::record::Record;
use crate::traits::{ReadOutcome, RecordStore};

/// File-backed single-slot store.
///
/// The record lives in one JSON file that is replaced wholesale on every
/// successful write -- no append-only log, no multi-record index. Freshness
/// is a process property: the last-refresh time is tracked in memory next to
/// the same `RwLock` that serializes file access, and a file found on disk
/// at open counts as refreshed at that moment.
pub struct FileSlot {
    path: PathBuf,
    state: RwLock<SlotState>,
    policy: FreshnessPolicy,
}

struct SlotState {
    /// `Some` while a record is present; eviction clears it and removes the
    /// file.
    last_refreshed: Option<Instant>,
}

impl FileSlot {
    /// Open a file-backed slot at `path`.
    ///
    /// An existing file is adopted as the current record, refreshed as of
    /// now. The file itself is not created until the first write.
    pub fn open(path: impl Into<PathBuf>, policy: FreshnessPolicy) -> Self {
        let path = path.into();
        let last_refreshed = path.exists().then(Instant::now);
        Self {
            path,
            state: RwLock::new(SlotState { last_refreshed }),
            policy,
        }
    }

    /// The backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn remove_file(&self) -> StoreResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            // Already gone is fine; the slot is empty either way.
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

impl RecordStore for FileSlot {
    fn write(&self, payload: &[u8], clock: u64) -> StoreResult<()> {
        // Validate and encode before taking the lock; a malformed payload
        // must never touch the file.
        let mut record = Record::parse(payload)?;
        record.stamp(clock);
        let bytes = record.to_bytes()?;

        let mut state = self.state.write().expect("lock poisoned");
        fs::write(&self.path, &bytes)?;
        state.last_refreshed = Some(Instant::now());
        Ok(())
    }

    fn read(&self, clock: u64) -> StoreResult<ReadOutcome> {
        {
            let state = self.state.read().expect("lock poisoned");
            if state.last_refreshed.is_none() {
                return Ok(ReadOutcome::Empty);
            }
        }

        // Same upgrade discipline as the in-memory slot: drop the shared
        // lock, re-acquire exclusively, re-validate.
        let mut state = self.state.write().expect("lock poisoned");
        let now = Instant::now();
        let Some(last_refreshed) = state.last_refreshed else {
            return Ok(ReadOutcome::Empty);
        };
        if self.policy.is_stale(last_refreshed, now) {
            tracing::debug!(path = %self.path.display(), "evicting stale record file");
            self.remove_file()?;
            state.last_refreshed = None;
            return Ok(ReadOutcome::Empty);
        }

        let bytes = fs::read(&self.path)?;
        let mut record = Record::parse(&bytes)?;
        if clock > record.stamped_clock() {
            record.stamp(clock);
            // Write the caught-up stamp back so the durable image always
            // carries the highest clock the server associated with it.
            fs::write(&self.path, record.to_bytes()?)?;
        }
        state.last_refreshed = Some(now);
        Ok(ReadOutcome::Fresh(record))
    }

    fn evict(&self) -> StoreResult<bool> {
        let mut state = self.state.write().expect("lock poisoned");
        let was_present = state.last_refreshed.is_some();
        if was_present {
            self.remove_file()?;
            state.last_refreshed = None;
        }
        Ok(was_present)
    }
}

impl std::fmt::Debug for FileSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileSlot")
            .field("path", &self.path)
            .field("policy", &self.policy)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use serde_json::json;
    use std::time::Duration;

    fn slot_in(dir: &tempfile::TempDir, policy: FreshnessPolicy) -> FileSlot {
        FileSlot::open(dir.path().join("record.json"), policy)
    }

    fn fresh(outcome: ReadOutcome) -> Record {
        match outcome {
            ReadOutcome::Fresh(record) => record,
            ReadOutcome::Empty => panic!("expected a fresh record"),
        }
    }

    #[test]
    fn read_before_any_write_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = slot_in(&dir, FreshnessPolicy::default());
        assert_eq!(store.read(1).unwrap(), ReadOutcome::Empty);
        assert!(!store.path().exists());
    }

    #[test]
    fn write_then_read_round_trips_through_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = slot_in(&dir, FreshnessPolicy::default());
        store.write(br#"{"id":"IDS60901","air_temp":13.3}"#, 4).unwrap();
        assert!(store.path().exists());

        let record = fresh(store.read(4).unwrap());
        assert_eq!(record.get("id"), Some(&json!("IDS60901")));
        assert_eq!(record.stamped_clock(), 4);
    }

    #[test]
    fn existing_file_is_adopted_on_open() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("record.json");
        fs::write(&path, br#"{"id":"persisted","lamport_clock":6}"#).unwrap();

        let store = FileSlot::open(&path, FreshnessPolicy::default());
        let record = fresh(store.read(1).unwrap());
        assert_eq!(record.get("id"), Some(&json!("persisted")));
        assert_eq!(record.stamped_clock(), 6);
    }

    #[test]
    fn restamp_is_written_back_to_disk() {
        let dir = tempfile::tempdir().unwrap();
        let store = slot_in(&dir, FreshnessPolicy::default());
        store.write(br#"{"id":"x"}"#, 2).unwrap();

        let record = fresh(store.read(8).unwrap());
        assert_eq!(record.stamped_clock(), 8);

        let on_disk = Record::parse(&fs::read(store.path()).unwrap()).unwrap();
        assert_eq!(on_disk.stamped_clock(), 8);
    }

    #[test]
    fn stale_record_file_is_removed_on_read() {
        let dir = tempfile::tempdir().unwrap();
        let store = slot_in(&dir, FreshnessPolicy::new(Duration::from_millis(20)));
        store.write(br#"{"id":"x"}"#, 1).unwrap();

        std::thread::sleep(Duration::from_millis(60));
        assert_eq!(store.read(2).unwrap(), ReadOutcome::Empty);
        assert!(!store.path().exists());
        assert_eq!(store.read(3).unwrap(), ReadOutcome::Empty);
    }

    #[test]
    fn invalid_write_leaves_the_file_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let store = slot_in(&dir, FreshnessPolicy::default());
        store.write(br#"{"id":"keep"}"#, 1).unwrap();
        let before = fs::read(store.path()).unwrap();

        let err = store.write(b"new:data", 2).unwrap_err();
        assert!(matches!(err, StoreError::InvalidPayload(_)));
        assert_eq!(fs::read(store.path()).unwrap(), before);
    }

    #[test]
    fn evict_removes_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = slot_in(&dir, FreshnessPolicy::default());
        store.write(br#"{"id":"x"}"#, 1).unwrap();
        assert!(store.evict().unwrap());
        assert!(!store.path().exists());
        assert!(!store.evict().unwrap());
    }
}
