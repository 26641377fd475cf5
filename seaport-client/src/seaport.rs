use std::time::Duration;

use async_trait::async_trait;
use provenance_core::{CoreResult, Coordinate, NearestZoneLookup};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::{HttpClient, Result};

#[derive(Debug, Clone, Deserialize)]
pub struct SeaportSettings {
    pub base_url: String,
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,
    #[serde(default)]
    pub max_retries: u32,
}

/// Client for the nearest seaport zone service.
///
/// `GET {base_url}/nearest-zone?lat={lat}&lng={lng}` → `{"zone_name": "..."}`
#[derive(Debug, Clone)]
pub struct SeaportZoneClient {
    client: HttpClient,
    base_url: String,
}

#[derive(Debug, Serialize)]
struct NearestZoneQuery {
    lat: f64,
    lng: f64,
}

#[derive(Debug, Deserialize)]
struct NearestZoneResponse {
    zone_name: String,
}

impl SeaportZoneClient {
    pub fn new(settings: &SeaportSettings) -> Result<Self> {
        let client = HttpClient::builder()
            .timeout(settings.timeout)
            .max_retries(settings.max_retries)
            .build()?;

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        })
    }

    #[instrument(skip(self))]
    pub async fn nearest_zone_name(&self, coordinate: &Coordinate) -> Result<String> {
        let response: NearestZoneResponse = self
            .client
            .get(format!("{}/nearest-zone", self.base_url))
            .query(&NearestZoneQuery {
                lat: coordinate.latitude,
                lng: coordinate.longitude,
            })
            .send()
            .await?
            .json()
            .await?;

        Ok(response.zone_name)
    }
}

#[async_trait]
impl NearestZoneLookup for SeaportZoneClient {
    async fn nearest_zone(&self, coordinate: &Coordinate) -> CoreResult<String> {
        Ok(self.nearest_zone_name(coordinate).await?)
    }
}
