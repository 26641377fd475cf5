use std::sync::Arc;

use provenance_core::{
    NearestZoneLookup, TraceabilityCodeAllocator, TraceabilityStore, ZoneCache, ZoneResolver,
};
use seaport_client::SeaportZoneClient;
use snafu::ResultExt;
use tracing::{info, warn};

use crate::{
    CatchStamper, InMemoryZoneCache, Result, Settings, error::ZoneLookupClientSnafu,
};

pub struct App {
    stamper: CatchStamper,
}

impl App {
    /// Wires the seaport lookup client and an in-memory zone cache from `settings`.
    pub fn build(settings: &Settings, store: Arc<dyn TraceabilityStore>) -> Result<Self> {
        let lookup =
            SeaportZoneClient::new(&settings.zone_lookup).context(ZoneLookupClientSnafu)?;
        let cache = InMemoryZoneCache::new(settings.zone_cache.ttl);

        Ok(Self::build_with(
            settings,
            Arc::new(lookup),
            Arc::new(cache),
            store,
        ))
    }

    pub fn build_with(
        settings: &Settings,
        lookup: Arc<dyn NearestZoneLookup>,
        cache: Arc<dyn ZoneCache>,
        store: Arc<dyn TraceabilityStore>,
    ) -> Self {
        let resolver = ZoneResolver::new(lookup, cache)
            .with_lookup_timeout(settings.zone_lookup.timeout)
            .with_bucket_precision(settings.zone_cache.bucket_precision);

        let calibration = settings.camera.as_ref().and_then(|c| c.calibration());
        match (&settings.camera, &calibration) {
            (Some(camera), None) => {
                warn!(?camera, "camera settings cannot be calibrated, measurements disabled")
            }
            (None, _) => info!("no camera configured, measurements disabled"),
            (Some(_), Some(_)) => {}
        }

        let stamper = CatchStamper::new(
            resolver,
            TraceabilityCodeAllocator,
            store,
            calibration,
            settings.home_port,
        );

        info!(environment = %settings.environment, "provenance engine built");

        Self { stamper }
    }

    pub fn stamper(&self) -> &CatchStamper {
        &self.stamper
    }

    pub fn into_stamper(self) -> CatchStamper {
        self.stamper
    }
}
