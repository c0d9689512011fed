#![allow(dead_code)]

use std::{fs, path::PathBuf};

use httpmock::Method::GET;
use httpmock::{Mock, MockServer};
use tcmb_rs::TcmbClient;
use url::Url;

pub const KEY: &str = "TESTKEY";

pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures")
}

pub fn read_fixture(name: &str) -> String {
    fs::read_to_string(fixtures_dir().join(name)).unwrap()
}

/// The request the builder issues to validate the key.
pub fn mock_key_check(server: &MockServer) -> Mock<'_> {
    server.mock(|when, then| {
        when.method(GET).path(format!("/categories/key={KEY}"));
        then.status(200)
            .header("content-type", "application/json")
            .body(read_fixture("categories.json"));
    })
}

pub fn base_url(server: &MockServer) -> Url {
    Url::parse(&server.base_url()).unwrap()
}

/// A validated client pointed at the mock server.
pub async fn client(server: &MockServer) -> TcmbClient {
    let check = mock_key_check(server);
    let client = TcmbClient::builder()
        .api_key(KEY)
        .base_url(base_url(server))
        .build()
        .await
        .unwrap();
    check.assert();
    client
}
