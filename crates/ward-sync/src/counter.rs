//! Shared counters with linearized updates.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Mutex, PoisonError};

/// A signed counter that many threads may adjust concurrently.
///
/// Implementations must apply each [`adjust`](SharedCounter::adjust) as one
/// indivisible update: no two adjustments may observe the same prior value.
pub trait SharedCounter: Send + Sync {
    /// Add `delta` to the counter.
    fn adjust(&self, delta: i64);

    /// Read the current value.
    fn value(&self) -> i64;

    /// Add one.
    fn increment(&self) {
        self.adjust(1);
    }

    /// Subtract one.
    fn decrement(&self) {
        self.adjust(-1);
    }
}

/// Counter backed by a single `AtomicI64`.
///
/// Each adjustment is one `fetch_add`. Wrapping on overflow matches the
/// atomic's semantics; callers that need checked arithmetic should use
/// [`MutexCounter`].
#[derive(Debug, Default)]
pub struct AtomicCounter {
    value: AtomicI64,
}

// Compile-time assertion: AtomicCounter must be Send + Sync.
const _: fn() = || {
    fn assert<T: Send + Sync>() {}
    assert::<AtomicCounter>();
};

impl AtomicCounter {
    /// Create a counter starting at `initial`.
    pub fn new(initial: i64) -> Self {
        Self {
            value: AtomicI64::new(initial),
        }
    }
}

impl SharedCounter for AtomicCounter {
    fn adjust(&self, delta: i64) {
        self.value.fetch_add(delta, Ordering::AcqRel);
    }

    fn value(&self) -> i64 {
        self.value.load(Ordering::Acquire)
    }
}

/// Counter backed by a `Mutex<i64>`.
///
/// A poisoned lock is recovered: the guarded value is a plain integer
/// that is never left half-written.
#[derive(Debug, Default)]
pub struct MutexCounter {
    value: Mutex<i64>,
}

// Compile-time assertion: MutexCounter must be Send + Sync.
const _: fn() = || {
    fn assert<T: Send + Sync>() {}
    assert::<MutexCounter>();
};

impl MutexCounter {
    /// Create a counter starting at `initial`.
    pub fn new(initial: i64) -> Self {
        Self {
            value: Mutex::new(initial),
        }
    }
}

impl SharedCounter for MutexCounter {
    fn adjust(&self, delta: i64) {
        let mut guard = self.value.lock().unwrap_or_else(PoisonError::into_inner);
        *guard = guard.wrapping_add(delta);
    }

    fn value(&self) -> i64 {
        *self.value.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    fn hammer(counter: Arc<dyn SharedCounter>) -> i64 {
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let counter = Arc::clone(&counter);
                thread::spawn(move || {
                    for _ in 0..10_000 {
                        if i % 2 == 0 {
                            counter.increment();
                        } else {
                            counter.decrement();
                        }
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        counter.value()
    }

    #[test]
    fn atomic_counter_balances() {
        assert_eq!(hammer(Arc::new(AtomicCounter::default())), 0);
    }

    #[test]
    fn mutex_counter_balances() {
        assert_eq!(hammer(Arc::new(MutexCounter::default())), 0);
    }

    #[test]
    fn initial_value_and_adjust() {
        let a = AtomicCounter::new(5);
        a.adjust(-7);
        assert_eq!(a.value(), -2);
        let m = MutexCounter::new(5);
        m.adjust(10);
        assert_eq!(m.value(), 15);
    }

    #[test]
    fn poisoned_mutex_is_recovered() {
        let counter = Arc::new(MutexCounter::new(1));
        let c = Arc::clone(&counter);
        let _ = thread::spawn(move || {
            let _guard = c.value.lock().unwrap();
            panic!("poison the lock");
        })
        .join();
        assert!(counter.value.is_poisoned());
        counter.increment();
        assert_eq!(counter.value(), 2);
    }
}
