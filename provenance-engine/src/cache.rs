use std::{collections::HashMap, sync::Arc, time::Duration};

use async_trait::async_trait;
use provenance_core::{BucketKey, ZoneAssignment, ZoneCache};
use tokio::{sync::RwLock, time::Instant};
use tracing::debug;

#[derive(Debug, Clone)]
struct Entry {
    assignment: ZoneAssignment,
    inserted: Instant,
}

/// Process local zone cache keyed by coordinate bucket.
///
/// Entries older than `ttl` are treated as missing and pruned on the next write.
/// A zero `ttl` disables caching.
#[derive(Debug, Clone)]
pub struct InMemoryZoneCache {
    inner: Arc<RwLock<HashMap<BucketKey, Entry>>>,
    ttl: Duration,
}

impl InMemoryZoneCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }

    fn is_fresh(&self, entry: &Entry) -> bool {
        entry.inserted.elapsed() < self.ttl
    }
}

#[async_trait]
impl ZoneCache for InMemoryZoneCache {
    async fn get(&self, key: &BucketKey) -> Option<ZoneAssignment> {
        let guard = self.inner.read().await;
        guard
            .get(key)
            .filter(|e| self.is_fresh(e))
            .map(|e| e.assignment.clone())
    }

    async fn set(&self, key: BucketKey, assignment: ZoneAssignment) {
        if self.ttl.is_zero() {
            return;
        }

        let mut guard = self.inner.write().await;

        let before = guard.len();
        guard.retain(|_, e| self.is_fresh(e));
        if guard.len() != before {
            debug!(pruned = before - guard.len(), "pruned stale zone cache entries");
        }

        guard.insert(
            key,
            Entry {
                assignment,
                inserted: Instant::now(),
            },
        );
    }
}
