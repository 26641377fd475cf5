#![deny(warnings)]
#![deny(rust_2018_idioms)]

pub mod cache;
pub mod error;
pub mod settings;
pub mod stamper;
pub mod startup;
pub mod telemetry;

pub use cache::InMemoryZoneCache;
pub use error::{Error, Result};
pub use settings::{CameraSettings, Environment, Settings, ZoneCacheSettings};
pub use stamper::{
    CatchCapture, CatchProvenance, CatchStamper, Measurement, PositionSource, UnavailableReason,
};
