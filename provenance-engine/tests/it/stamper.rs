use provenance_core::{
    CoastalRegionCode, Coordinate, Detection, HaulId, SizeCategory, TraceabilityCode,
    ZoneSource,
};
use provenance_engine::{Error, Measurement, PositionSource, UnavailableReason};

use super::helper::{TONKIN, TestHelper, VUNG_TAU, capture, haul};

#[tokio::test]
async fn test_stamp_uses_device_position_and_external_zone() {
    let helper = TestHelper::new(Some("Hải Phòng"));

    let provenance = helper
        .stamper
        .stamp(capture(1, Some(TONKIN)))
        .await
        .unwrap();

    assert_eq!(provenance.position, TONKIN);
    assert_eq!(provenance.position_source, PositionSource::Device);
    assert_eq!(provenance.coastal_region, CoastalRegionCode::D);
    assert_eq!(provenance.zone.zone_label(), "Hải Phòng");
    assert_eq!(provenance.zone.source(), ZoneSource::ExternalLookup);
    assert_eq!(provenance.traceability_code.as_ref(), "SNP010100070101");
}

#[tokio::test]
async fn test_missing_device_position_falls_back_to_home_port() {
    let helper = TestHelper::new(Some("Vũng Tàu"));

    let provenance = helper.stamper.stamp(capture(1, None)).await.unwrap();

    assert_eq!(provenance.position, VUNG_TAU);
    assert_eq!(provenance.position_source, PositionSource::HomePort);
    assert_eq!(provenance.coastal_region, CoastalRegionCode::B);
}

#[tokio::test]
async fn test_non_finite_device_position_falls_back_to_home_port() {
    let helper = TestHelper::new(Some("Vũng Tàu"));

    let provenance = helper
        .stamper
        .stamp(capture(1, Some(Coordinate::new(f64::NAN, 107.0))))
        .await
        .unwrap();

    assert_eq!(provenance.position_source, PositionSource::HomePort);
}

#[tokio::test]
async fn test_zone_service_outage_uses_grid_cell() {
    let helper = TestHelper::new(None);

    let provenance = helper
        .stamper
        .stamp(capture(1, Some(TONKIN)))
        .await
        .unwrap();

    assert_eq!(provenance.zone.zone_label(), "V11");
    assert_eq!(provenance.zone.source(), ZoneSource::GridFallback);
}

#[tokio::test]
async fn test_second_catch_nearby_is_served_from_cache() {
    let helper = TestHelper::new(Some("Hải Phòng"));

    helper
        .stamper
        .stamp(capture(1, Some(TONKIN)))
        .await
        .unwrap();
    let second = helper
        .stamper
        .stamp(capture(1, Some(Coordinate::new(21.002, 107.001))))
        .await
        .unwrap();

    assert_eq!(second.zone.source(), ZoneSource::Cache);
    assert_eq!(helper.lookup.calls(), 1);
}

#[tokio::test]
async fn test_refresh_zone_asks_the_service_again() {
    let helper = TestHelper::new(Some("Hải Phòng"));

    helper
        .stamper
        .stamp(capture(1, Some(TONKIN)))
        .await
        .unwrap();

    let mut refreshed = capture(1, Some(TONKIN));
    refreshed.refresh_zone = true;
    let provenance = helper.stamper.stamp(refreshed).await.unwrap();

    assert_eq!(provenance.zone.source(), ZoneSource::ExternalLookup);
    assert_eq!(helper.lookup.calls(), 2);
}

#[tokio::test]
async fn test_sequence_continues_from_existing_codes() {
    let helper = TestHelper::new(Some("Hải Phòng"));
    let existing: Vec<TraceabilityCode> = vec!["SNP010100070101".into(), "SNP010100070102".into()];
    for code in &existing {
        helper.store.insert(HaulId(7), code);
    }

    let mut capture = capture(7, Some(TONKIN));
    capture.existing_codes = existing;

    let provenance = helper.stamper.stamp(capture).await.unwrap();

    assert_eq!(provenance.traceability_code.as_ref(), "SNP010100070103");
}

#[tokio::test]
async fn test_exhausted_allocation_is_a_hard_error() {
    let helper = TestHelper::new(Some("Hải Phòng"));
    let prefix = haul(9).code_prefix();
    for sequence in 1..=5 {
        helper
            .store
            .insert(HaulId(9), &TraceabilityCode::compose(&prefix, sequence));
    }

    // The caller's snapshot is stale and knows about none of the written codes.
    let err = helper
        .stamper
        .stamp(capture(9, Some(TONKIN)))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Allocation { .. }));
}

#[tokio::test]
async fn test_measurement_is_attached_when_detection_present() {
    let helper = TestHelper::new(Some("Hải Phòng"));

    let mut capture = capture(1, Some(TONKIN));
    capture.detection = Some(Detection {
        bounding_box: [100.0, 20.0, 200.0, 180.0],
        confidence: 0.9,
        size_category: SizeCategory::Medium,
    });

    let provenance = helper.stamper.stamp(capture).await.unwrap();
    let estimate = provenance.measurement.estimate().unwrap();

    assert!((estimate.real_length_cm - 24.0).abs() < 1e-6);
    assert!((estimate.estimated_weight_kg - 27.0).abs() < 1e-6);
}

#[tokio::test]
async fn test_degenerate_detection_is_no_measurement() {
    let helper = TestHelper::new(Some("Hải Phòng"));

    let mut capture = capture(1, Some(TONKIN));
    capture.detection = Some(Detection {
        bounding_box: [100.0, 20.0, 100.0, 180.0],
        confidence: 0.9,
        size_category: SizeCategory::Small,
    });

    let provenance = helper.stamper.stamp(capture).await.unwrap();

    assert_eq!(
        provenance.measurement,
        Measurement::Unavailable {
            reason: UnavailableReason::InvalidBoundingBox
        }
    );
}

#[tokio::test]
async fn test_session_without_calibration_is_no_measurement() {
    let helper = TestHelper::new(Some("Hải Phòng"));
    let stamper = helper.stamper.clone().with_calibration(None);

    let mut capture = capture(1, Some(TONKIN));
    capture.detection = Some(Detection {
        bounding_box: [100.0, 20.0, 200.0, 180.0],
        confidence: 0.9,
        size_category: SizeCategory::Large,
    });

    let provenance = stamper.stamp(capture).await.unwrap();

    assert_eq!(
        provenance.measurement,
        Measurement::Unavailable {
            reason: UnavailableReason::CalibrationMissing
        }
    );
    assert!(provenance.measurement.estimate().is_none());
}

#[tokio::test]
async fn test_capture_without_detection_is_no_measurement() {
    let helper = TestHelper::new(Some("Hải Phòng"));

    let provenance = helper
        .stamper
        .stamp(capture(1, Some(TONKIN)))
        .await
        .unwrap();

    assert_eq!(
        provenance.measurement,
        Measurement::Unavailable {
            reason: UnavailableReason::NoDetection
        }
    );
}
