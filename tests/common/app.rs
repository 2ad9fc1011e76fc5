//! Application fixture
//!
//! Builds the full router around a [`MemoryStore`], a temporary upload
//! directory and a wiremock server standing in for the Centrifugo API.

use std::sync::Arc;

use axum_test::TestServer;
use dtalks::backend::auth::passwords::MIN_BCRYPT_COST;
use dtalks::backend::server::{build_app, Config};
use dtalks::backend::store::MemoryStore;
use serde_json::{json, Value};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TEST_SECRET_KEY: &str = "test-session-secret";
pub const TEST_GATEWAY_SECRET: &str = "test-gateway-secret";

pub struct TestApp {
    pub server: TestServer,
    pub store: Arc<MemoryStore>,
    pub gateway: MockServer,
    pub uploads: TempDir,
}

impl TestApp {
    /// App whose gateway accepts every call
    pub async fn new() -> Self {
        Self::with_gateway_status(200).await
    }

    /// App whose gateway answers every call with `status`
    pub async fn with_gateway_status(status: u16) -> Self {
        let gateway = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api"))
            .respond_with(ResponseTemplate::new(status).set_body_json(json!({ "result": {} })))
            .mount(&gateway)
            .await;

        let uploads = tempfile::tempdir().expect("Failed to create upload dir");
        let config = Config {
            secret_key: TEST_SECRET_KEY.to_string(),
            centrifugo_api_url: gateway.uri(),
            centrifugo_api_key: "test-api-key".to_string(),
            centrifugo_secret: TEST_GATEWAY_SECRET.to_string(),
            upload_dir: uploads.path().to_path_buf(),
            bcrypt_cost: MIN_BCRYPT_COST,
            ..Config::default()
        };

        let store = Arc::new(MemoryStore::new());
        let app = build_app(config, store.clone())
            .await
            .expect("Failed to build app");
        let server = TestServer::new(app).expect("Failed to start test server");

        Self {
            server,
            store,
            gateway,
            uploads,
        }
    }

    /// Bodies of every `publish` call the gateway received
    pub async fn published(&self) -> Vec<Value> {
        self.gateway_calls("publish").await
    }

    /// Bodies of every gateway call with the given method
    pub async fn gateway_calls(&self, api_method: &str) -> Vec<Value> {
        self.gateway
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter_map(|request| request.body_json::<Value>().ok())
            .filter(|body| body["method"] == api_method)
            .collect()
    }
}
