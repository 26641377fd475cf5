use async_trait::async_trait;

use crate::{BucketKey, CoreResult, Coordinate, HaulId, ZoneAssignment};

/// Remote "nearest seaport" zone service.
#[async_trait]
pub trait NearestZoneLookup: Send + Sync {
    async fn nearest_zone(&self, coordinate: &Coordinate) -> CoreResult<String>;
}

/// Persistence predicates used by the traceability allocator. Answers are a
/// snapshot and can go stale between read and write.
#[async_trait]
pub trait TraceabilityStore: Send + Sync {
    async fn record_exists_by_code(&self, haul_id: &HaulId, code: &str) -> CoreResult<bool>;
    async fn existing_code_count(&self, haul_id: &HaulId) -> CoreResult<u32>;
}

/// Short lived zone cache, implementations decide on staleness.
#[async_trait]
pub trait ZoneCache: Send + Sync {
    async fn get(&self, key: &BucketKey) -> Option<ZoneAssignment>;
    async fn set(&self, key: BucketKey, assignment: ZoneAssignment);
}
