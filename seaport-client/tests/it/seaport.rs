use std::time::Duration;

use provenance_core::{Coordinate, IsTimeout, NearestZoneLookup};
use seaport_client::{Error, StatusCode};
use serde_json::json;
use wiremock::{
    Mock, ResponseTemplate,
    matchers::{method, path, query_param},
};

use super::helper::TestHelper;

#[tokio::test]
async fn test_nearest_zone_returns_zone_name() {
    let helper = TestHelper::new(Duration::from_secs(5), 0).await;

    Mock::given(method("GET"))
        .and(path("/nearest-zone"))
        .and(query_param("lat", "21.0"))
        .and(query_param("lng", "107.5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "zone_name": "Hải Phòng" })))
        .expect(1)
        .mount(&helper.server)
        .await;

    let zone = helper
        .client
        .nearest_zone(&Coordinate::new(21.0, 107.5))
        .await
        .unwrap();

    assert_eq!(zone, "Hải Phòng");
}

#[tokio::test]
async fn test_server_error_is_reported_with_status() {
    let helper = TestHelper::new(Duration::from_secs(5), 0).await;

    Mock::given(method("GET"))
        .and(path("/nearest-zone"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .expect(1)
        .mount(&helper.server)
        .await;

    let err = helper
        .client
        .nearest_zone_name(&Coordinate::new(10.0, 106.0))
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(StatusCode::SERVICE_UNAVAILABLE));
    assert!(matches!(err, Error::FailedRequest { ref body, .. } if body == "maintenance"));
}

#[tokio::test]
async fn test_slow_service_surfaces_as_timeout() {
    let helper = TestHelper::new(Duration::from_millis(100), 0).await;

    Mock::given(method("GET"))
        .and(path("/nearest-zone"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "zone_name": "Vũng Tàu" }))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&helper.server)
        .await;

    let err = helper
        .client
        .nearest_zone(&Coordinate::new(10.3, 107.1))
        .await
        .unwrap_err();

    assert!(err.is_timeout());
}

#[tokio::test]
async fn test_malformed_body_is_an_unexpected_error() {
    let helper = TestHelper::new(Duration::from_secs(5), 0).await;

    Mock::given(method("GET"))
        .and(path("/nearest-zone"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "port": "Vũng Tàu" })))
        .mount(&helper.server)
        .await;

    let err = helper
        .client
        .nearest_zone(&Coordinate::new(10.3, 107.1))
        .await
        .unwrap_err();

    assert!(matches!(err, provenance_core::Error::Unexpected { .. }));
}

#[tokio::test]
async fn test_transient_failures_are_retried_when_enabled() {
    let helper = TestHelper::new(Duration::from_secs(5), 2).await;

    Mock::given(method("GET"))
        .and(path("/nearest-zone"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .expect(1)
        .mount(&helper.server)
        .await;

    Mock::given(method("GET"))
        .and(path("/nearest-zone"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "zone_name": "Nha Trang" })))
        .expect(1)
        .mount(&helper.server)
        .await;

    let zone = helper
        .client
        .nearest_zone(&Coordinate::new(12.2, 109.2))
        .await
        .unwrap();

    assert_eq!(zone, "Nha Trang");
}
