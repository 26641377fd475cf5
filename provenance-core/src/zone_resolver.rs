use std::{future::Future, sync::Arc, time::Duration};

use serde::Deserialize;
use snafu::ResultExt;
use tracing::{info, instrument, warn};

use crate::{
    BucketKey, Coordinate, NearestZoneLookup, ZoneAssignment, ZoneCache, ZoneLookupError,
    ZoneSource, classify_grid,
    zone_lookup_error::{EmptyZoneNameSnafu, ZoneLookupTimeoutSnafu, ZoneLookupUnavailableSnafu},
};

pub const DEFAULT_LOOKUP_TIMEOUT: Duration = Duration::from_secs(5);
pub const DEFAULT_BUCKET_PRECISION: u8 = 2;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct ResolveOptions {
    /// Skip the cache and ask the lookup service for a fresh zone.
    #[serde(default)]
    pub refresh: bool,
}

/// Resolves the zone of a catch position.
///
/// Cache, then the external nearest-seaport lookup, then the fishing ground grid.
/// The grid is total so resolution always yields an assignment. The external
/// lookup is attempted at most once per call and is bounded by `lookup_timeout`.
#[derive(Clone)]
pub struct ZoneResolver {
    lookup: Arc<dyn NearestZoneLookup>,
    cache: Arc<dyn ZoneCache>,
    lookup_timeout: Duration,
    bucket_precision: u8,
}

impl ZoneResolver {
    pub fn new(lookup: Arc<dyn NearestZoneLookup>, cache: Arc<dyn ZoneCache>) -> Self {
        Self {
            lookup,
            cache,
            lookup_timeout: DEFAULT_LOOKUP_TIMEOUT,
            bucket_precision: DEFAULT_BUCKET_PRECISION,
        }
    }

    pub fn with_lookup_timeout(mut self, timeout: Duration) -> Self {
        self.lookup_timeout = timeout;
        self
    }

    pub fn with_bucket_precision(mut self, precision: u8) -> Self {
        self.bucket_precision = precision;
        self
    }

    #[instrument(skip(self))]
    pub async fn resolve(&self, coordinate: Coordinate, options: ResolveOptions) -> ZoneAssignment {
        if !coordinate.is_finite() {
            warn!("non finite coordinate, skipping cache and lookup");
            return grid_fallback(coordinate);
        }

        let key = BucketKey::new(&coordinate, self.bucket_precision);

        if !options.refresh {
            if let Some(cached) = self.cache.get(&key).await {
                return cached.with_source(ZoneSource::Cache, coordinate);
            }
        }

        match self.lookup_zone(&coordinate).await {
            Ok(zone) => {
                let assignment = ZoneAssignment::new(zone, ZoneSource::ExternalLookup, coordinate);
                self.cache.set(key, assignment.clone()).await;
                assignment
            }
            Err(e) => {
                warn!("falling back to fishing ground grid: {e:?}");
                grid_fallback(coordinate)
            }
        }
    }

    /// Like [`Self::resolve`], but abandons the in-flight lookup and returns `None`
    /// once `cancel` completes.
    pub async fn resolve_until<F>(
        &self,
        coordinate: Coordinate,
        options: ResolveOptions,
        cancel: F,
    ) -> Option<ZoneAssignment>
    where
        F: Future<Output = ()>,
    {
        tokio::select! {
            biased;
            _ = cancel => {
                info!("zone resolution cancelled");
                None
            }
            assignment = self.resolve(coordinate, options) => Some(assignment),
        }
    }

    async fn lookup_zone(&self, coordinate: &Coordinate) -> Result<String, ZoneLookupError> {
        let zone = tokio::time::timeout(self.lookup_timeout, self.lookup.nearest_zone(coordinate))
            .await
            .map_err(|_| {
                ZoneLookupTimeoutSnafu {
                    timeout: self.lookup_timeout,
                }
                .build()
            })?
            .context(ZoneLookupUnavailableSnafu)?;

        let zone = zone.trim();
        if zone.is_empty() {
            return EmptyZoneNameSnafu.fail();
        }

        Ok(zone.to_string())
    }
}

fn grid_fallback(coordinate: Coordinate) -> ZoneAssignment {
    let grid = classify_grid(&coordinate);
    ZoneAssignment::new(grid.cell_code, ZoneSource::GridFallback, coordinate)
}
