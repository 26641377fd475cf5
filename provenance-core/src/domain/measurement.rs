use serde::{Deserialize, Serialize};

use crate::{
    Detection, MeasurementError, SizeCategory,
    measurement_error::{CalibrationMissingSnafu, InvalidBoundingBoxSnafu},
};

pub const MIN_DISTANCE_CM: f64 = 10.0;
pub const MAX_DISTANCE_CM: f64 = 300.0;
pub const DEFAULT_FOV_DEGREES: f64 = 60.0;
pub const DEFAULT_FOCAL_LENGTH_FACTOR: f64 = 0.5;
pub const DEFAULT_REFERENCE_DISTANCE_CM: f64 = 50.0;
/// Empirical length-girth-weight divisor, not a validated model.
pub const WEIGHT_DIVISOR: f64 = 800.0;
pub const SIMILAR_TRIANGLES_METHOD: &str = "similar_triangles";

/// Per camera session calibration.
///
/// The focal length is derived from the sensor width and an *assumed* field of
/// view, it is not calibrated against a known reference object. Estimates built
/// on it are rough approximations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalibrationProfile {
    focal_length_px: f64,
    reference_distance_cm: f64,
    reference_pixel_width: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementEstimate {
    pub distance_cm: f64,
    pub real_length_cm: f64,
    pub real_girth_cm: f64,
    pub estimated_weight_kg: f64,
    pub method: String,
    pub confidence: f64,
}

impl CalibrationProfile {
    /// `focal_length_px = sensor_width_px * focal_length_factor / tan(fov / 2)`.
    /// Returns `None` for non-positive widths or a field of view outside `(0, 180)` degrees.
    pub fn derive(sensor_width_px: f64, fov_degrees: f64, focal_length_factor: f64) -> Option<Self> {
        if !(sensor_width_px.is_finite() && sensor_width_px > 0.0) {
            return None;
        }
        if !(fov_degrees > 0.0 && fov_degrees < 180.0) {
            return None;
        }
        if !(focal_length_factor.is_finite() && focal_length_factor > 0.0) {
            return None;
        }

        let half_fov = fov_degrees.to_radians() / 2.0;
        Self::from_focal_length(sensor_width_px * focal_length_factor / half_fov.tan())
    }

    pub fn from_focal_length(focal_length_px: f64) -> Option<Self> {
        if !(focal_length_px.is_finite() && focal_length_px > 0.0) {
            return None;
        }

        Some(Self {
            focal_length_px,
            reference_distance_cm: DEFAULT_REFERENCE_DISTANCE_CM,
            reference_pixel_width: SizeCategory::Medium.reference_width_cm() * focal_length_px
                / DEFAULT_REFERENCE_DISTANCE_CM,
        })
    }

    pub fn focal_length_px(&self) -> f64 {
        self.focal_length_px
    }

    pub fn reference_distance_cm(&self) -> f64 {
        self.reference_distance_cm
    }

    /// Pixel width of a medium reference fish held at `reference_distance_cm`.
    pub fn reference_pixel_width(&self) -> f64 {
        self.reference_pixel_width
    }
}

pub fn estimate(
    detection: &Detection,
    calibration: Option<&CalibrationProfile>,
) -> Result<MeasurementEstimate, MeasurementError> {
    let Some(calibration) = calibration else {
        return CalibrationMissingSnafu.fail();
    };

    let width_px = detection.width_px();
    let height_px = detection.height_px();

    if !(width_px.is_finite() && width_px > 0.0 && height_px.is_finite() && height_px > 0.0) {
        return InvalidBoundingBoxSnafu {
            width_px,
            height_px,
        }
        .fail();
    }

    let focal = calibration.focal_length_px;
    let reference_width_cm = detection.size_category.reference_width_cm();

    let raw_distance = reference_width_cm * focal / width_px;
    let distance_cm = raw_distance.clamp(MIN_DISTANCE_CM, MAX_DISTANCE_CM);

    let real_length_cm = height_px * distance_cm / focal;
    let real_girth_cm = 2.0 * width_px * distance_cm / focal;
    let estimated_weight_kg = real_length_cm * real_girth_cm.powi(2) / WEIGHT_DIVISOR;

    let confidence = if detection.confidence.is_nan() {
        0.0
    } else {
        detection.confidence.clamp(0.0, 1.0)
    };
    let confidence = if distance_cm != raw_distance {
        confidence / 2.0
    } else {
        confidence
    };

    Ok(MeasurementEstimate {
        distance_cm,
        real_length_cm,
        real_girth_cm,
        estimated_weight_kg,
        method: SIMILAR_TRIANGLES_METHOD.to_string(),
        confidence,
    })
}
