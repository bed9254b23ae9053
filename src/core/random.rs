//! Random shift source
//!
//! Date-shifting rules draw their day offsets from a [`ShiftSource`] so the
//! generator can be swapped for a deterministic stub in tests. Production
//! uses one process-wide entropy-seeded generator shared behind a mutex.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;

/// Source of random integer draws for date-shifting rules
///
/// Implementations must be safe to share across threads; the batch may be
/// parallelized across files in the future and every file draws from the
/// same source.
pub trait ShiftSource: Send + Sync {
    /// Returns a value in `[min, max)`: min inclusive, max exclusive
    fn next_in(&self, min: i64, max: i64) -> i64;
}

/// Process-wide generator used in production
///
/// Seeded from OS entropy once at construction. Draws are serialized
/// through a mutex; the lock is held only for the duration of a single
/// `gen_range` call.
pub struct SystemShiftSource {
    rng: Mutex<StdRng>,
}

impl SystemShiftSource {
    /// Creates a new entropy-seeded source
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }
}

impl Default for SystemShiftSource {
    fn default() -> Self {
        Self::new()
    }
}

impl ShiftSource for SystemShiftSource {
    fn next_in(&self, min: i64, max: i64) -> i64 {
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| {
            // A panic while holding the lock cannot corrupt the generator
            // state in a way that matters for drawing offsets.
            poisoned.into_inner()
        });
        rng.gen_range(min..max)
    }
}

/// Deterministic stub returning a fixed value, for tests
pub struct FixedShiftSource(pub i64);

impl ShiftSource for FixedShiftSource {
    fn next_in(&self, _min: i64, _max: i64) -> i64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_source_respects_bounds() {
        let source = SystemShiftSource::new();
        for _ in 0..1000 {
            let value = source.next_in(1, 365);
            assert!((1..365).contains(&value));
        }
    }

    #[test]
    fn test_fixed_source_returns_fixed_value() {
        let source = FixedShiftSource(10);
        assert_eq!(source.next_in(1, 365), 10);
        assert_eq!(source.next_in(0, 2), 10);
    }

    #[test]
    fn test_system_source_is_shareable() {
        use std::sync::Arc;

        let source = Arc::new(SystemShiftSource::new());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let source = Arc::clone(&source);
                std::thread::spawn(move || {
                    for _ in 0..100 {
                        let value = source.next_in(1, 365);
                        assert!((1..365).contains(&value));
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
    }
}
