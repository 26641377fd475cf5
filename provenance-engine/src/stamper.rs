use std::sync::Arc;

use provenance_core::{
    CalibrationProfile, CoastalRegionCode, Coordinate, Detection, HaulContext,
    MeasurementError, MeasurementEstimate, ResolveOptions, TraceabilityCode,
    TraceabilityCodeAllocator, TraceabilityStore, ZoneAssignment, ZoneResolver, classify_region,
    estimate,
};
use serde::Serialize;
use snafu::ResultExt;
use strum::{AsRefStr, Display};
use tracing::{info, instrument, warn};

use crate::{Result, error::AllocationSnafu};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display, AsRefStr)]
pub enum PositionSource {
    Device,
    HomePort,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display, AsRefStr)]
pub enum UnavailableReason {
    NoDetection,
    CalibrationMissing,
    InvalidBoundingBox,
}

/// Measurement attached to a catch record. Absence is explicit, never a zero estimate.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Measurement {
    Estimated(MeasurementEstimate),
    Unavailable { reason: UnavailableReason },
}

impl Measurement {
    pub fn estimate(&self) -> Option<&MeasurementEstimate> {
        match self {
            Measurement::Estimated(v) => Some(v),
            Measurement::Unavailable { .. } => None,
        }
    }
}

impl From<MeasurementError> for UnavailableReason {
    fn from(value: MeasurementError) -> Self {
        match value {
            MeasurementError::CalibrationMissing { .. } => UnavailableReason::CalibrationMissing,
            MeasurementError::InvalidBoundingBox { .. } => UnavailableReason::InvalidBoundingBox,
        }
    }
}

/// A single catch event as seen by the capture workflow.
#[derive(Debug, Clone)]
pub struct CatchCapture {
    /// `None` when the device position was unavailable (permission denied, timeout, no signal).
    pub device_position: Option<Coordinate>,
    pub haul: HaulContext,
    pub existing_codes: Vec<TraceabilityCode>,
    pub detection: Option<Detection>,
    pub refresh_zone: bool,
}

/// Provenance stamped onto a catch record before it is persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatchProvenance {
    pub position: Coordinate,
    pub position_source: PositionSource,
    pub coastal_region: CoastalRegionCode,
    pub zone: ZoneAssignment,
    pub measurement: Measurement,
    pub traceability_code: TraceabilityCode,
}

#[derive(Clone)]
pub struct CatchStamper {
    resolver: ZoneResolver,
    allocator: TraceabilityCodeAllocator,
    store: Arc<dyn TraceabilityStore>,
    calibration: Option<CalibrationProfile>,
    home_port: Coordinate,
}

impl CatchStamper {
    pub fn new(
        resolver: ZoneResolver,
        allocator: TraceabilityCodeAllocator,
        store: Arc<dyn TraceabilityStore>,
        calibration: Option<CalibrationProfile>,
        home_port: Coordinate,
    ) -> Self {
        Self {
            resolver,
            allocator,
            store,
            calibration,
            home_port,
        }
    }

    /// Starts a new camera session, calibration stays fixed for the session.
    pub fn with_calibration(self, calibration: Option<CalibrationProfile>) -> Self {
        Self {
            calibration,
            ..self
        }
    }

    pub fn calibration(&self) -> Option<&CalibrationProfile> {
        self.calibration.as_ref()
    }

    pub fn effective_position(&self, device_position: Option<Coordinate>) -> (Coordinate, PositionSource) {
        match device_position {
            Some(v) if v.is_finite() => (v, PositionSource::Device),
            Some(_) => {
                warn!("device reported a non finite position, using home port");
                (self.home_port, PositionSource::HomePort)
            }
            None => (self.home_port, PositionSource::HomePort),
        }
    }

    pub fn measure(&self, detection: Option<&Detection>) -> Measurement {
        let Some(detection) = detection else {
            return Measurement::Unavailable {
                reason: UnavailableReason::NoDetection,
            };
        };

        match estimate(detection, self.calibration.as_ref()) {
            Ok(v) => Measurement::Estimated(v),
            Err(e) => {
                info!("no measurement available: {e}");
                Measurement::Unavailable { reason: e.into() }
            }
        }
    }

    /// Fails only when no unique traceability code could be allocated, in which
    /// case the catch must not be persisted.
    #[instrument(skip_all, fields(haul_id = %capture.haul.haul_id))]
    pub async fn stamp(&self, capture: CatchCapture) -> Result<CatchProvenance> {
        let CatchCapture {
            device_position,
            haul,
            existing_codes,
            detection,
            refresh_zone,
        } = capture;

        let (position, position_source) = self.effective_position(device_position);
        let coastal_region = classify_region(&position).code;

        let zone = self
            .resolver
            .resolve(
                position,
                ResolveOptions {
                    refresh: refresh_zone,
                },
            )
            .await;

        let measurement = self.measure(detection.as_ref());

        let traceability_code = self
            .allocator
            .allocate(&haul, &existing_codes, self.store.as_ref())
            .await
            .context(AllocationSnafu)?;

        info!(
            %traceability_code,
            zone = zone.zone_label(),
            zone_source = %zone.source(),
            %coastal_region,
            %position_source,
            "stamped catch"
        );

        Ok(CatchProvenance {
            position,
            position_source,
            coastal_region,
            zone,
            measurement,
            traceability_code,
        })
    }
}
