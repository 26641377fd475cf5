use serde::Serialize;

use crate::{BoundingBox, Coordinate};

pub const OUTSIDE_GROUND_NAME: &str = "Outside Vietnam Waters";
pub const OUTSIDE_GROUND_CODE: &str = "XX00";
pub const OUTSIDE_GROUND_SHORT_NAME: &str = "XX";

/// How the cells of a fishing ground are laid out, numbered row-major from the
/// south-west corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GridShape {
    /// `floor(sqrt(cell_count))` rows and columns.
    Square,
    Rows { rows: u32, cols: u32 },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FishingGround {
    pub name: &'static str,
    pub short_name: &'static str,
    pub bounds: BoundingBox,
    pub cell_count: u32,
    pub code_prefix: char,
    pub area_km2: f64,
    pub shape: GridShape,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridZoneResult {
    pub ground_name: String,
    pub cell_code: String,
    /// `None` for positions outside every fishing ground.
    pub cell_number: Option<u32>,
    pub region_short_name: String,
    pub coordinate: Coordinate,
    pub area_km2: f64,
}

/// Classification order, first match wins.
pub static FISHING_GROUNDS: [FishingGround; 4] = [
    FishingGround {
        name: "Ngư Trường Vịnh Bắc Bộ",
        short_name: "VBB",
        bounds: BoundingBox::new_unchecked(20.0, 22.0, 106.0, 108.0),
        cell_count: 20,
        code_prefix: 'V',
        area_km2: 126_250.0,
        shape: GridShape::Square,
    },
    FishingGround {
        name: "Ngư Trường Miền Trung",
        short_name: "MT",
        bounds: BoundingBox::new_unchecked(11.0, 20.0, 107.5, 112.0),
        cell_count: 25,
        code_prefix: 'T',
        area_km2: 350_000.0,
        shape: GridShape::Square,
    },
    FishingGround {
        name: "Ngư Trường Đông Nam Bộ",
        short_name: "DNB",
        bounds: BoundingBox::new_unchecked(6.0, 11.0, 105.0, 110.0),
        cell_count: 16,
        code_prefix: 'D',
        area_km2: 280_000.0,
        shape: GridShape::Square,
    },
    FishingGround {
        name: "Ngư Trường Tây Nam Bộ",
        short_name: "TNB",
        bounds: BoundingBox::new_unchecked(6.0, 11.0, 101.0, 105.0),
        cell_count: 15,
        code_prefix: 'K',
        area_km2: 126_300.0,
        shape: GridShape::Rows { rows: 3, cols: 5 },
    },
];

impl FishingGround {
    pub fn grid_dimensions(&self) -> (u32, u32) {
        match self.shape {
            GridShape::Square => {
                let size = (self.cell_count as f64).sqrt().floor() as u32;
                (size.max(1), size.max(1))
            }
            GridShape::Rows { rows, cols } => (rows.max(1), cols.max(1)),
        }
    }

    /// Cell number in `[1, cell_count]` for a coordinate already known to be inside the ground.
    pub fn cell_number(&self, coordinate: &Coordinate) -> u32 {
        let (rows, cols) = self.grid_dimensions();
        let (lat_ratio, lng_ratio) = self.bounds.ratios(coordinate);

        let lat_grid = (lat_ratio * rows as f64).floor() as i64;
        let lng_grid = (lng_ratio * cols as f64).floor() as i64;

        let zone = lat_grid * cols as i64 + lng_grid + 1;

        zone.clamp(1, self.cell_count.max(1) as i64) as u32
    }

    pub fn cell_code(&self, cell_number: u32) -> String {
        format!("{}{cell_number:02}", self.code_prefix)
    }
}

pub fn classify_grid(coordinate: &Coordinate) -> GridZoneResult {
    match FISHING_GROUNDS
        .iter()
        .find(|g| g.bounds.contains(coordinate))
    {
        Some(ground) => {
            let number = ground.cell_number(coordinate);
            GridZoneResult {
                ground_name: ground.name.to_string(),
                cell_code: ground.cell_code(number),
                cell_number: Some(number),
                region_short_name: ground.short_name.to_string(),
                coordinate: *coordinate,
                area_km2: ground.area_km2,
            }
        }
        None => GridZoneResult {
            ground_name: OUTSIDE_GROUND_NAME.to_string(),
            cell_code: OUTSIDE_GROUND_CODE.to_string(),
            cell_number: None,
            region_short_name: OUTSIDE_GROUND_SHORT_NAME.to_string(),
            coordinate: *coordinate,
            area_km2: 0.0,
        },
    }
}
