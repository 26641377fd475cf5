use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

use crate::{BoundingBox, Coordinate};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, AsRefStr, EnumString,
)]
pub enum CoastalRegionCode {
    A,
    B,
    C,
    D,
    /// Outside every traditional coastal region.
    X,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoastalRegion {
    pub code: CoastalRegionCode,
    pub name: &'static str,
    pub description: &'static str,
    /// `None` only for the outside sentinel.
    pub bounds: Option<BoundingBox>,
}

/// Classification order, first match wins.
pub static COASTAL_REGIONS: [CoastalRegion; 4] = [
    CoastalRegion {
        code: CoastalRegionCode::A,
        name: "Cà Mau – Kiên Giang",
        description: "Gulf of Thailand coast from Cà Mau cape to the Cambodian border",
        bounds: Some(BoundingBox::new_unchecked(8.3, 10.5, 103.5, 105.3)),
    },
    CoastalRegion {
        code: CoastalRegionCode::B,
        name: "Bà Rịa-Vũng Tàu – Bạc Liêu",
        description: "Southeastern coast and the Mekong delta mouths",
        bounds: Some(BoundingBox::new_unchecked(8.5, 10.8, 105.3, 107.6)),
    },
    CoastalRegion {
        code: CoastalRegionCode::C,
        name: "Nam Trung Bộ",
        description: "South central coast from Bình Thuận to Quảng Nam",
        bounds: Some(BoundingBox::new_unchecked(10.8, 16.2, 107.6, 109.6)),
    },
    CoastalRegion {
        code: CoastalRegionCode::D,
        name: "Bắc Bộ – Bắc Trung Bộ",
        description: "North central coast and the Gulf of Tonkin shore",
        bounds: Some(BoundingBox::new_unchecked(16.2, 21.7, 105.5, 108.2)),
    },
];

pub static OUTSIDE_COASTAL_REGIONS: CoastalRegion = CoastalRegion {
    code: CoastalRegionCode::X,
    name: "Outside Traditional Coastal Regions",
    description: "Position is not covered by any administrative coastal region",
    bounds: None,
};

pub fn classify_region(coordinate: &Coordinate) -> &'static CoastalRegion {
    COASTAL_REGIONS
        .iter()
        .find(|r| r.bounds.is_some_and(|b| b.contains(coordinate)))
        .unwrap_or(&OUTSIDE_COASTAL_REGIONS)
}
