//! Lamport logical clock for the vane aggregation service.
//!
//! Every process in the system (the aggregator and each publisher or
//! consumer client) owns one [`LamportClock`]. The clock advances on every
//! message sent or received, which gives the system a total, causally
//! consistent ordering of events without synchronized wall clocks.

use std::sync::atomic::{AtomicU64, Ordering};

/// A process-wide Lamport clock.
///
/// A single non-negative counter, initialized to zero, never persisted.
/// Both mutating operations are linearizable: concurrent callers each
/// observe a strictly increasing sequence and no two calls ever return the
/// same value.
///
/// # Clock Rules
///
/// - **Local event** (a message with no attached clock): `tick()`,
///   i.e. `counter += 1`.
/// - **Receive** (a message carrying a clock value `r`): `observe(r)`,
///   i.e. `counter = max(r, counter) + 1`.
/// - **Guarantee**: if event A causally precedes event B, A's value is
///   strictly less than B's.
#[derive(Debug, Default)]
pub struct LamportClock {
    counter: AtomicU64,
}

impl LamportClock {
    /// Create a new clock starting at zero.
    pub const fn new() -> Self {
        Self {
            counter: AtomicU64::new(0),
        }
    }

    /// Advance the clock for a local event and return the new value.
    pub fn tick(&self) -> u64 {
        self.counter.fetch_add(1, Ordering::AcqRel) + 1
    }

    /// Fold a received clock value into the local clock, returning the new
    /// value `max(received, current) + 1`.
    ///
    /// The returned value is strictly greater than both `received` and every
    /// value previously returned by this clock.
    pub fn observe(&self, received: u64) -> u64 {
        // The closure never returns None, so fetch_update always succeeds.
        let previous = self
            .counter
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |current| {
                Some(received.max(current) + 1)
            })
            .unwrap_or_else(|current| current);
        received.max(previous) + 1
    }

    /// The current clock value, without advancing it.
    ///
    /// Readers may observe any value >= the last value they caused, never a
    /// smaller one.
    pub fn current(&self) -> u64 {
        self.counter.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_zero() {
        let clock = LamportClock::new();
        assert_eq!(clock.current(), 0);
    }

    #[test]
    fn tick_is_strictly_monotonic() {
        let clock = LamportClock::new();
        let mut prev = clock.tick();
        for _ in 0..1000 {
            let next = clock.tick();
            assert!(next > prev, "clock must be strictly monotonic: {prev} >= {next}");
            prev = next;
        }
    }

    #[test]
    fn observe_dominates_received_value() {
        let clock = LamportClock::new();
        assert_eq!(clock.observe(5), 6); // max(5, 0) + 1
        assert_eq!(clock.current(), 6);
    }

    #[test]
    fn observe_dominates_local_value() {
        let clock = LamportClock::new();
        for _ in 0..10 {
            clock.tick();
        }
        // Local clock (10) is ahead of the received value.
        assert_eq!(clock.observe(3), 11);
    }

    #[test]
    fn observe_exceeds_every_prior_value() {
        let clock = LamportClock::new();
        let mut prev = 0;
        for received in [0, 7, 2, 100, 99, 101] {
            let next = clock.observe(received);
            assert!(next > received);
            assert!(next > prev);
            prev = next;
        }
    }

    #[test]
    fn current_does_not_advance() {
        let clock = LamportClock::new();
        clock.tick();
        let a = clock.current();
        let b = clock.current();
        assert_eq!(a, b);
    }

    #[test]
    fn concurrent_calls_return_unique_values() {
        use std::sync::Arc;
        use std::thread;

        let clock = Arc::new(LamportClock::new());
        let mut handles = Vec::new();

        for i in 0..8u64 {
            let clock = Arc::clone(&clock);
            handles.push(thread::spawn(move || {
                let mut values = Vec::with_capacity(200);
                for n in 0..100 {
                    values.push(clock.tick());
                    values.push(clock.observe(i * 100 + n));
                }
                values
            }));
        }

        let mut all_values: Vec<u64> = Vec::new();
        for handle in handles {
            all_values.extend(handle.join().unwrap());
        }

        // No two mutating calls may return the same value.
        let len = all_values.len();
        all_values.sort_unstable();
        all_values.dedup();
        assert_eq!(all_values.len(), len, "all returned values must be unique");
    }

    #[test]
    fn per_thread_sequences_are_increasing() {
        use std::sync::Arc;
        use std::thread;

        let clock = Arc::new(LamportClock::new());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let clock = Arc::clone(&clock);
                thread::spawn(move || {
                    let mut prev = 0;
                    for _ in 0..250 {
                        let next = clock.tick();
                        assert!(next > prev);
                        prev = next;
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().expect("thread should not panic");
        }
    }
}
