use std::time::Duration;

use seaport_client::{SeaportSettings, SeaportZoneClient};
use wiremock::MockServer;

pub struct TestHelper {
    pub server: MockServer,
    pub client: SeaportZoneClient,
}

impl TestHelper {
    pub async fn new(timeout: Duration, max_retries: u32) -> Self {
        let server = MockServer::start().await;

        let client = SeaportZoneClient::new(&SeaportSettings {
            base_url: format!("{}/", server.uri()),
            timeout,
            max_retries,
        })
        .unwrap();

        Self { server, client }
    }
}
