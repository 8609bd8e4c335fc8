//! Per-date serialisation of booking creation.
//!
//! The conflict check and the insert of a booking must not interleave with
//! another booking creation for the same calendar date. Creations for
//! different dates proceed in parallel.

use std::sync::Arc;

use chrono::NaiveDate;
use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Registry of one async mutex per booking date.
///
/// Cloning shares the registry, so every clone of a repository serialises
/// against the same locks.
#[derive(Debug, Clone, Default)]
pub struct DateLocks {
    inner: Arc<DashMap<NaiveDate, Arc<Mutex<()>>>>,
}

impl DateLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to `date`. Held until the guard is dropped.
    pub async fn acquire(&self, date: NaiveDate) -> OwnedMutexGuard<()> {
        // Clone the Arc out so the shard lock is released before awaiting.
        let lock = self.inner.entry(date).or_default().clone();
        lock.lock_owned().await
    }

    /// Drop the locks of dates before `today`; no booking can be created
    /// for them any more.
    pub fn prune_before(&self, today: NaiveDate) {
        self.inner.retain(|date, _| *date >= today);
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
