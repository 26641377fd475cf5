use std::{
    collections::{HashMap, HashSet},
    sync::{
        Arc, Mutex,
        atomic::{AtomicU32, Ordering},
    },
    time::Duration,
};

use async_trait::async_trait;
use chrono::NaiveDate;
use provenance_core::{
    CoreResult, Coordinate, HaulContext, HaulId, NearestZoneLookup, TraceabilityCode,
    TraceabilityStore, core_error::StoreSnafu,
};
use provenance_engine::{
    CameraSettings, CatchCapture, CatchStamper, Environment, InMemoryZoneCache, Settings,
    ZoneCacheSettings, startup::App, telemetry::init_tracing,
};
use seaport_client::SeaportSettings;

pub const VUNG_TAU: Coordinate = Coordinate::new(10.346, 107.084);
pub const TONKIN: Coordinate = Coordinate::new(21.0, 107.0);

/// In-memory stand-in for the catch record table.
#[derive(Default)]
pub struct MemoryStore {
    codes: Mutex<HashMap<HaulId, HashSet<String>>>,
}

impl MemoryStore {
    pub fn insert(&self, haul_id: HaulId, code: &TraceabilityCode) {
        self.codes
            .lock()
            .unwrap()
            .entry(haul_id)
            .or_default()
            .insert(code.to_string());
    }
}

#[async_trait]
impl TraceabilityStore for MemoryStore {
    async fn record_exists_by_code(&self, haul_id: &HaulId, code: &str) -> CoreResult<bool> {
        Ok(self
            .codes
            .lock()
            .unwrap()
            .get(haul_id)
            .is_some_and(|v| v.contains(code)))
    }
    async fn existing_code_count(&self, haul_id: &HaulId) -> CoreResult<u32> {
        Ok(self
            .codes
            .lock()
            .unwrap()
            .get(haul_id)
            .map(|v| v.len() as u32)
            .unwrap_or(0))
    }
}

pub struct ScriptedLookup {
    zone: Option<&'static str>,
    pub calls: AtomicU32,
}

impl ScriptedLookup {
    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl NearestZoneLookup for ScriptedLookup {
    async fn nearest_zone(&self, _coordinate: &Coordinate) -> CoreResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.zone {
            Some(v) => Ok(v.to_string()),
            None => StoreSnafu {
                message: "nearest zone service unreachable",
            }
            .fail(),
        }
    }
}

pub struct TestHelper {
    pub stamper: CatchStamper,
    pub store: Arc<MemoryStore>,
    pub lookup: Arc<ScriptedLookup>,
}

pub fn test_settings(base_url: &str) -> Settings {
    Settings {
        environment: Environment::Test,
        home_port: VUNG_TAU,
        zone_lookup: SeaportSettings {
            base_url: base_url.to_string(),
            timeout: Duration::from_secs(2),
            max_retries: 0,
        },
        zone_cache: ZoneCacheSettings {
            ttl: Duration::from_secs(600),
            bucket_precision: 2,
        },
        camera: Some(CameraSettings {
            sensor_width_px: 1280.0,
            fov_degrees: 60.0,
            focal_length_factor: 0.5,
        }),
    }
}

impl TestHelper {
    /// `zone` is what the nearest zone service answers, `None` simulates an outage.
    pub fn new(zone: Option<&'static str>) -> Self {
        Self::with_settings(zone, test_settings("http://unused"))
    }

    pub fn with_settings(zone: Option<&'static str>, settings: Settings) -> Self {
        init_tracing("provenance-engine-test", Environment::Test);

        let store = Arc::new(MemoryStore::default());
        let lookup = Arc::new(ScriptedLookup {
            zone,
            calls: AtomicU32::new(0),
        });

        let app = App::build_with(
            &settings,
            lookup.clone(),
            Arc::new(InMemoryZoneCache::new(settings.zone_cache.ttl)),
            store.clone(),
        );

        Self {
            stamper: app.into_stamper(),
            store,
            lookup,
        }
    }
}

pub fn haul(haul_id: i64) -> HaulContext {
    HaulContext {
        haul_id: HaulId(haul_id),
        species_code: "SNP".into(),
        trip_code: "TRIP-2024-0101".into(),
        haul_number: 0,
        capture_date: NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
    }
}

pub fn capture(haul_id: i64, device_position: Option<Coordinate>) -> CatchCapture {
    CatchCapture {
        device_position,
        haul: haul(haul_id),
        existing_codes: vec![],
        detection: None,
        refresh_zone: false,
    }
}
