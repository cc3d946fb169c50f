use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};
use tracing::debug;

/// Process-wide counter shown on the Home page.
///
/// Clones share the same value. A fresh store is created with each
/// [`AppState`](crate::state::AppState) and dropped with it.
#[derive(Debug, Clone, Default)]
pub struct CounterStore {
    count: Arc<AtomicI64>,
}

impl CounterStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> i64 {
        self.count.load(Ordering::Relaxed)
    }

    /// Adds one and returns the new value.
    pub fn increment(&self) -> i64 {
        let next = self.count.fetch_add(1, Ordering::Relaxed) + 1;
        debug!(count = next, "counter incremented");
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_increments_from_zero() {
        let store = CounterStore::new();
        assert_eq!(store.count(), 0);
        for _ in 0..3 {
            store.increment();
        }
        assert_eq!(store.count(), 3);
    }

    #[test]
    fn clones_share_state() {
        let store = CounterStore::new();
        let handle = store.clone();
        handle.increment();
        assert_eq!(store.increment(), 2);
        assert_eq!(handle.count(), 2);
    }
}
