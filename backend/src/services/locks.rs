//! Per-division generation locks.
//!
//! Schedule generation for one sport/division must not interleave with
//! another generation for the same division. Each division gets its own
//! async mutex so unrelated divisions never wait on each other.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::OwnedMutexGuard;

use crate::models::SportId;

type DivisionKey = (SportId, String);
type LockMap = HashMap<DivisionKey, Arc<tokio::sync::Mutex<()>>>;

/// Registry of division locks shared by every request handler.
///
/// Entries only live while some request holds or waits on them.
#[derive(Clone, Default)]
pub struct DivisionLocks {
    locks: Arc<Mutex<LockMap>>,
}

/// Exclusive hold on one division, released on drop.
pub struct DivisionGuard {
    guard: Option<OwnedMutexGuard<()>>,
    locks: Arc<Mutex<LockMap>>,
}

impl Drop for DivisionGuard {
    fn drop(&mut self) {
        // Release first so the map holds the last reference to an idle lock.
        self.guard.take();
        self.locks
            .lock()
            .retain(|_, lock| Arc::strong_count(lock) > 1);
    }
}

impl DivisionLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to `(sport_id, division)`.
    pub async fn acquire(&self, sport_id: SportId, division: &str) -> DivisionGuard {
        let lock = {
            let mut locks = self.locks.lock();
            locks
                .entry((sport_id, division.to_string()))
                .or_default()
                .clone()
        };
        DivisionGuard {
            guard: Some(lock.lock_owned().await),
            locks: Arc::clone(&self.locks),
        }
    }

    /// Number of divisions currently held or waited on.
    pub fn len(&self) -> usize {
        self.locks.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_same_division_is_exclusive() {
        let locks = DivisionLocks::new();
        let guard = locks.acquire(SportId(1), "competitive").await;

        let contender = {
            let locks = locks.clone();
            tokio::spawn(async move {
                let _guard = locks.acquire(SportId(1), "competitive").await;
            })
        };
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!contender.is_finished());

        drop(guard);
        tokio::time::timeout(Duration::from_secs(1), contender)
            .await
            .unwrap()
            .unwrap();
    }

    #[tokio::test]
    async fn test_divisions_are_independent() {
        let locks = DivisionLocks::new();
        let _a = locks.acquire(SportId(1), "competitive").await;
        let _b = tokio::time::timeout(
            Duration::from_secs(1),
            locks.acquire(SportId(1), "recreational"),
        )
        .await
        .unwrap();
        let _c = tokio::time::timeout(
            Duration::from_secs(1),
            locks.acquire(SportId(2), "competitive"),
        )
        .await
        .unwrap();
        assert_eq!(locks.len(), 3);
    }

    #[tokio::test]
    async fn test_released_divisions_are_evicted() {
        let locks = DivisionLocks::new();
        for i in 0..16 {
            let _guard = locks.acquire(SportId(1), &format!("x{i}")).await;
        }
        assert!(locks.is_empty());

        let held = locks.acquire(SportId(1), "competitive").await;
        let contender = {
            let locks = locks.clone();
            tokio::spawn(async move {
                let _guard = locks.acquire(SportId(1), "competitive").await;
            })
        };
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(locks.len(), 1);

        // The waiter keeps the entry alive until it is done too.
        drop(held);
        tokio::time::timeout(Duration::from_secs(1), contender)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(locks.len(), 0);
    }
}
