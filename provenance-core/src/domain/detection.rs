use serde::{Deserialize, Deserializer, Serialize};
use strum::{AsRefStr, Display, EnumString};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Display, AsRefStr, EnumString,
)]
#[strum(ascii_case_insensitive, serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SizeCategory {
    Small,
    #[default]
    Medium,
    Large,
}

impl SizeCategory {
    /// Unrecognized labels from the inference service fall back to `Medium`.
    pub fn from_label(label: &str) -> Self {
        label.trim().parse().unwrap_or_default()
    }

    /// Typical real world body width used as the similar-triangles reference.
    pub fn reference_width_cm(&self) -> f64 {
        match self {
            SizeCategory::Small => 8.0,
            SizeCategory::Medium => 15.0,
            SizeCategory::Large => 25.0,
        }
    }
}

impl<'de> Deserialize<'de> for SizeCategory {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let label = String::deserialize(deserializer)?;
        Ok(SizeCategory::from_label(&label))
    }
}

/// Output of the external fish detection service, pixel coordinates `[x1, y1, x2, y2]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub bounding_box: [f64; 4],
    pub confidence: f64,
    #[serde(default)]
    pub size_category: SizeCategory,
}

impl Detection {
    pub fn width_px(&self) -> f64 {
        (self.bounding_box[2] - self.bounding_box[0]).abs()
    }

    pub fn height_px(&self) -> f64 {
        (self.bounding_box[3] - self.bounding_box[1]).abs()
    }
}
