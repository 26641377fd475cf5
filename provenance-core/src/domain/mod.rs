use geo::{Intersects, Rect, coord};
use serde::{Deserialize, Serialize};

use crate::{BoundingBoxError, bounding_box_error::InvertedSnafu};

mod annotations;
mod coastal_region;
mod detection;
mod fishing_ground;
mod measurement;
mod traceability;
mod zone;

pub use annotations::*;
pub use coastal_region::*;
pub use detection::*;
pub use fishing_ground::*;
pub use measurement::*;
pub use traceability::*;
pub use zone::*;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }
}

impl From<Coordinate> for geo::Coord {
    fn from(v: Coordinate) -> Self {
        coord! { x: v.longitude, y: v.latitude }
    }
}

/// Axis aligned latitude/longitude box, inclusive on every edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundingBox {
    min_lat: f64,
    max_lat: f64,
    min_lng: f64,
    max_lng: f64,
}

impl BoundingBox {
    pub fn new(
        min_lat: f64,
        max_lat: f64,
        min_lng: f64,
        max_lng: f64,
    ) -> Result<Self, BoundingBoxError> {
        let finite = [min_lat, max_lat, min_lng, max_lng]
            .iter()
            .all(|v| v.is_finite());

        if !finite || min_lat > max_lat || min_lng > max_lng {
            return InvertedSnafu {
                min_lat,
                max_lat,
                min_lng,
                max_lng,
            }
            .fail();
        }

        Ok(Self {
            min_lat,
            max_lat,
            min_lng,
            max_lng,
        })
    }

    /// Only used for the compile time region and ground tables, all of which satisfy min <= max.
    pub(crate) const fn new_unchecked(
        min_lat: f64,
        max_lat: f64,
        min_lng: f64,
        max_lng: f64,
    ) -> Self {
        Self {
            min_lat,
            max_lat,
            min_lng,
            max_lng,
        }
    }

    pub fn min_lat(&self) -> f64 {
        self.min_lat
    }

    pub fn max_lat(&self) -> f64 {
        self.max_lat
    }

    pub fn min_lng(&self) -> f64 {
        self.min_lng
    }

    pub fn max_lng(&self) -> f64 {
        self.max_lng
    }

    pub fn contains(&self, coordinate: &Coordinate) -> bool {
        self.as_rect()
            .intersects(&geo::Coord::from(*coordinate))
    }

    /// Position of `coordinate` inside the box as `(lat_ratio, lng_ratio)`.
    /// Degenerate axes yield a ratio of 0.
    pub fn ratios(&self, coordinate: &Coordinate) -> (f64, f64) {
        let ratio = |v: f64, min: f64, max: f64| {
            let span = max - min;
            if span > 0.0 { (v - min) / span } else { 0.0 }
        };

        (
            ratio(coordinate.latitude, self.min_lat, self.max_lat),
            ratio(coordinate.longitude, self.min_lng, self.max_lng),
        )
    }

    fn as_rect(&self) -> Rect {
        Rect::new(
            coord! { x: self.min_lng, y: self.min_lat },
            coord! { x: self.max_lng, y: self.max_lat },
        )
    }
}

impl<'de> Deserialize<'de> for BoundingBox {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            min_lat: f64,
            max_lat: f64,
            min_lng: f64,
            max_lng: f64,
        }

        let Raw {
            min_lat,
            max_lat,
            min_lng,
            max_lng,
        } = Raw::deserialize(deserializer)?;

        BoundingBox::new(min_lat, max_lat, min_lng, max_lng).map_err(serde::de::Error::custom)
    }
}
