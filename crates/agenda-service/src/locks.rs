//! Per-staff serialization of check-then-insert sequences.
//!
//! Only serializes callers inside one process. Several processes writing to the same
//! database are not coordinated by this registry.
//!
//! Entries nobody holds or waits on are dropped on the next acquire, so the registry only
//! tracks staff members with a booking in flight.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

#[derive(Debug, Default)]
pub struct StaffLocks {
    locks: Mutex<HashMap<i64, Arc<AsyncMutex<()>>>>,
}

impl StaffLocks {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// ## Summary
    /// Waits until no other caller holds the lock of `staff_id` and returns a guard that
    /// releases it on drop.
    #[tracing::instrument(skip(self))]
    pub async fn acquire(&self, staff_id: i64) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
            locks.retain(|_, lock| Arc::strong_count(lock) > 1);
            Arc::clone(locks.entry(staff_id).or_default())
        };

        let guard = lock.lock_owned().await;
        tracing::trace!("Staff lock acquired");
        guard
    }

    #[cfg(test)]
    fn tracked(&self) -> usize {
        self.locks.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}
