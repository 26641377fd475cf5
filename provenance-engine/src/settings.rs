use std::time::Duration;

use config::{Config, ConfigError, File};
use provenance_core::{
    CalibrationProfile, Coordinate, DEFAULT_BUCKET_PRECISION, DEFAULT_FOCAL_LENGTH_FACTOR,
    DEFAULT_FOV_DEGREES,
};
use seaport_client::SeaportSettings;
use serde::Deserialize;
use strum::{AsRefStr, Display, EnumString};

pub const ENVIRONMENT_VARIABLE: &str = "APP_ENVIRONMENT";
pub const ENVIRONMENT_PREFIX: &str = "PROVENANCE";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Display, AsRefStr, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum Environment {
    Local,
    Development,
    Production,
    Test,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub environment: Environment,
    /// Substituted when the device position is unavailable.
    pub home_port: Coordinate,
    pub zone_lookup: SeaportSettings,
    pub zone_cache: ZoneCacheSettings,
    pub camera: Option<CameraSettings>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ZoneCacheSettings {
    #[serde(with = "humantime_serde")]
    pub ttl: Duration,
    #[serde(default = "default_bucket_precision")]
    pub bucket_precision: u8,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CameraSettings {
    pub sensor_width_px: f64,
    #[serde(default = "default_fov_degrees")]
    pub fov_degrees: f64,
    #[serde(default = "default_focal_length_factor")]
    pub focal_length_factor: f64,
}

impl Settings {
    /// Reads `config/{environment}.yml`, overridden by `PROVENANCE__*` environment variables.
    pub fn new() -> Result<Self, ConfigError> {
        let environment = match std::env::var(ENVIRONMENT_VARIABLE) {
            Ok(v) => v.parse::<Environment>().map_err(|_| {
                ConfigError::Message(format!("invalid {ENVIRONMENT_VARIABLE} '{v}'"))
            })?,
            Err(_) => Environment::Local,
        };

        Self::from_file(environment.file_name(), environment)
    }

    pub fn from_file(path: &str, environment: Environment) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name(path).required(environment != Environment::Test))
            .add_source(
                config::Environment::with_prefix(ENVIRONMENT_PREFIX)
                    .prefix_separator("__")
                    .separator("__"),
            )
            .set_override("environment", environment.as_ref())?
            .build()?
            .try_deserialize()
    }
}

impl Environment {
    pub fn file_name(&self) -> &'static str {
        match self {
            Environment::Local => "config/local.yml",
            Environment::Development => "config/development.yml",
            Environment::Production => "config/production.yml",
            Environment::Test => "config/test.yml",
        }
    }
}

impl CameraSettings {
    /// `None` when the configured sensor or field of view cannot produce a focal length.
    pub fn calibration(&self) -> Option<CalibrationProfile> {
        CalibrationProfile::derive(
            self.sensor_width_px,
            self.fov_degrees,
            self.focal_length_factor,
        )
    }
}

fn default_bucket_precision() -> u8 {
    DEFAULT_BUCKET_PRECISION
}

fn default_fov_degrees() -> f64 {
    DEFAULT_FOV_DEGREES
}

fn default_focal_length_factor() -> f64 {
    DEFAULT_FOCAL_LENGTH_FACTOR
}
