//! Shared wiremock fixtures for unit tests.
#![allow(clippy::unwrap_used)]

use chrono::Utc;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::client::{SdClient, SdClientBuilder};

/// Token reply issued now.
pub fn token_body(token: &str) -> String {
    serde_json::json!({
        "code": 0,
        "message": "OK",
        "serverID": "test",
        "datetime": Utc::now().to_rfc3339(),
        "token": token,
    })
    .to_string()
}

/// Mounts a token endpoint that must be hit `expected` times.
pub async fn mount_token(server: &MockServer, token: &str, expected: u64) {
    Mock::given(method("POST"))
        .and(path("/20141201/token"))
        .respond_with(ResponseTemplate::new(200).set_body_string(token_body(token)))
        .expect(expected)
        .mount(server)
        .await;
}

/// Builder pointed at `server`.
pub fn test_builder(server: &MockServer) -> SdClientBuilder {
    SdClient::builder()
        .base_url(Url::parse(&server.uri()).unwrap())
        .user_agent("sdjson-test/0.0.0")
        .credentials("user", "secret")
}

/// Connected client pointed at `server`.
pub async fn connect(server: &MockServer) -> SdClient {
    test_builder(server).connect().await.unwrap()
}
