use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display};

use crate::Coordinate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, AsRefStr)]
pub enum ZoneSource {
    ExternalLookup,
    Cache,
    GridFallback,
}

/// Zone stamped onto a catch record, never recomputed once persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneAssignment {
    zone_label: String,
    source: ZoneSource,
    coordinate: Coordinate,
}

impl ZoneAssignment {
    pub fn new(zone_label: impl Into<String>, source: ZoneSource, coordinate: Coordinate) -> Self {
        Self {
            zone_label: zone_label.into(),
            source,
            coordinate,
        }
    }

    pub fn zone_label(&self) -> &str {
        &self.zone_label
    }

    pub fn source(&self) -> ZoneSource {
        self.source
    }

    pub fn coordinate(&self) -> Coordinate {
        self.coordinate
    }

    pub(crate) fn with_source(self, source: ZoneSource, coordinate: Coordinate) -> Self {
        Self {
            source,
            coordinate,
            ..self
        }
    }
}

/// Coarse location bucket used as the zone cache key. Coordinates are rounded to
/// `precision` decimal places, 2 decimals is roughly a 1km cell at the equator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BucketKey {
    lat: i64,
    lng: i64,
    precision: u8,
}

impl BucketKey {
    pub fn new(coordinate: &Coordinate, precision: u8) -> Self {
        let precision = precision.min(9);
        let scale = 10f64.powi(precision as i32);

        Self {
            lat: (coordinate.latitude * scale).round() as i64,
            lng: (coordinate.longitude * scale).round() as i64,
            precision,
        }
    }

    pub fn precision(&self) -> u8 {
        self.precision
    }
}

impl std::fmt::Display for BucketKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{}:{}@{}", self.lat, self.lng, self.precision))
    }
}
