use snafu::{Location, Snafu};

use crate::HaulId;

pub type CoreResult<T> = std::result::Result<T, Error>;

type Opaque = Box<dyn std::error::Error + Send + Sync + 'static>;

pub trait IsTimeout {
    fn is_timeout(&self) -> bool;
}

#[derive(Snafu, Debug)]
#[snafu(module(core_error), visibility(pub))]
pub enum Error {
    #[snafu(display("Operation timed out"))]
    Timeout {
        #[snafu(implicit)]
        location: Location,
        opaque: Opaque,
    },
    #[snafu(display("An unexpected error occured"))]
    Unexpected {
        #[snafu(implicit)]
        location: Location,
        opaque: Opaque,
    },
    #[snafu(display("Storage operation failed: '{message}'"))]
    Store {
        #[snafu(implicit)]
        location: Location,
        message: String,
    },
}

impl IsTimeout for Error {
    fn is_timeout(&self) -> bool {
        matches!(self, Error::Timeout { .. })
    }
}

#[derive(Snafu, Debug)]
#[snafu(module, visibility(pub))]
pub enum AllocationError {
    /// `last_candidate` is `None` when the initial sequence was already past the
    /// two digit limit and nothing was checked.
    #[snafu(display(
        "Could not allocate a unique traceability code for haul '{haul_id}' after {attempts} attempts, last candidate: {last_candidate:?}"
    ))]
    AllocationExhausted {
        #[snafu(implicit)]
        location: Location,
        haul_id: HaulId,
        attempts: u32,
        last_candidate: Option<String>,
    },
    #[snafu(display("Haul number '{haul_number}' does not fit the two digit haul field"))]
    InvalidHaulNumber {
        #[snafu(implicit)]
        location: Location,
        haul_number: u32,
    },
    #[snafu(display("Failed to count existing traceability codes for haul '{haul_id}'"))]
    CodeCount {
        #[snafu(implicit)]
        location: Location,
        haul_id: HaulId,
        source: Error,
    },
    #[snafu(display("Failed to check traceability code '{code}' for existence"))]
    Store {
        #[snafu(implicit)]
        location: Location,
        code: String,
        source: Error,
    },
}

#[derive(Snafu, Debug, Clone)]
#[snafu(module, visibility(pub))]
pub enum MeasurementError {
    #[snafu(display("No camera calibration available for this session"))]
    CalibrationMissing {
        #[snafu(implicit)]
        location: Location,
    },
    #[snafu(display("Invalid bounding box, width: '{width_px}', height: '{height_px}'"))]
    InvalidBoundingBox {
        #[snafu(implicit)]
        location: Location,
        width_px: f64,
        height_px: f64,
    },
}

#[derive(Snafu, Debug, Clone)]
#[snafu(module, visibility(pub))]
pub enum BoundingBoxError {
    #[snafu(display(
        "Invalid bounding box, lat: [{min_lat}, {max_lat}], lng: [{min_lng}, {max_lng}]"
    ))]
    Inverted {
        #[snafu(implicit)]
        location: Location,
        min_lat: f64,
        max_lat: f64,
        min_lng: f64,
        max_lng: f64,
    },
}

#[derive(Snafu, Debug, Clone)]
#[snafu(module, visibility(pub))]
pub enum AnnotationError {
    #[snafu(display("Malformed annotation on line {line}: '{content}'"))]
    MalformedLine {
        #[snafu(implicit)]
        location: Location,
        line: usize,
        content: String,
    },
    #[snafu(display("Empty key on line {line}"))]
    EmptyKey {
        #[snafu(implicit)]
        location: Location,
        line: usize,
    },
}

#[derive(Snafu, Debug)]
#[snafu(module, visibility(pub))]
pub enum ZoneLookupError {
    #[snafu(display("Nearest zone lookup unavailable"))]
    ZoneLookupUnavailable {
        #[snafu(implicit)]
        location: Location,
        source: Error,
    },
    #[snafu(display("Nearest zone lookup timed out after {timeout:?}"))]
    ZoneLookupTimeout {
        #[snafu(implicit)]
        location: Location,
        timeout: std::time::Duration,
    },
    #[snafu(display("Nearest zone lookup returned an empty zone name"))]
    EmptyZoneName {
        #[snafu(implicit)]
        location: Location,
    },
}
