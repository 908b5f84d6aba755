//! In-flight mutation guard.
//!
//! One status mutation per `(event, academy)` pair at a time. A second
//! attempt while the first is still running is rejected instead of queued.

use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

#[derive(Clone)]
pub struct SubmissionGate<K = String>
where
    K: Eq + Hash + Clone,
{
    in_flight: Arc<DashMap<K, ()>>,
}

impl<K> Default for SubmissionGate<K>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self {
            in_flight: Arc::new(DashMap::new()),
        }
    }
}

impl<K> fmt::Debug for SubmissionGate<K>
where
    K: Eq + Hash + Clone,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubmissionGate")
            .field("in_flight", &self.in_flight.len())
            .finish()
    }
}

impl<K> SubmissionGate<K>
where
    K: Eq + Hash + Clone,
{
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims `key`, or returns `None` while another permit holds it.
    #[must_use]
    pub fn try_acquire(&self, key: K) -> Option<SubmissionPermit<K>> {
        match self.in_flight.entry(key.clone()) {
            Entry::Occupied(_) => None,
            Entry::Vacant(slot) => {
                slot.insert(());
                Some(SubmissionPermit {
                    in_flight: Arc::clone(&self.in_flight),
                    key,
                })
            }
        }
    }

    #[must_use]
    pub fn is_busy(&self, key: &K) -> bool {
        self.in_flight.contains_key(key)
    }
}

/// Releases its key on drop, including when the holding future is cancelled.
pub struct SubmissionPermit<K = String>
where
    K: Eq + Hash + Clone,
{
    in_flight: Arc<DashMap<K, ()>>,
    key: K,
}

impl<K> Drop for SubmissionPermit<K>
where
    K: Eq + Hash + Clone,
{
    fn drop(&mut self) {
        self.in_flight.remove(&self.key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_acquire_is_rejected() {
        let gate: SubmissionGate = SubmissionGate::new();
        let permit = gate.try_acquire("e1:a1".to_string());
        assert!(permit.is_some());
        assert!(gate.try_acquire("e1:a1".to_string()).is_none());
        assert!(gate.is_busy(&"e1:a1".to_string()));
    }

    #[test]
    fn test_drop_releases_key() {
        let gate: SubmissionGate = SubmissionGate::new();
        {
            let _permit = gate.try_acquire("e1:a1".to_string());
        }
        assert!(!gate.is_busy(&"e1:a1".to_string()));
        assert!(gate.try_acquire("e1:a1".to_string()).is_some());
    }

    #[test]
    fn test_keys_are_independent() {
        let gate: SubmissionGate = SubmissionGate::new();
        let _a = gate.try_acquire("e1:a1".to_string());
        assert!(gate.try_acquire("e1:a2".to_string()).is_some());
    }

    #[tokio::test]
    async fn test_cancelled_task_releases_key() {
        let gate: SubmissionGate = SubmissionGate::new();
        let held = gate.clone();
        let task = tokio::spawn(async move {
            let _permit = held.try_acquire("e1:a1".to_string());
            std::future::pending::<()>().await;
        });
        tokio::task::yield_now().await;
        task.abort();
        let _ = task.await;
        assert!(!gate.is_busy(&"e1:a1".to_string()));
    }
}
