use httpmock::Method::GET;
use httpmock::MockServer;
use tcmb_rs::{KeyPlacement, TcmbClient, TcmbError};

use crate::common::{KEY, base_url, mock_key_check, read_fixture};

#[tokio::test]
async fn build_validates_key_once() {
    let server = MockServer::start();
    let check = mock_key_check(&server);

    let client = TcmbClient::builder()
        .api_key(KEY)
        .base_url(base_url(&server))
        .build()
        .await
        .unwrap();
    check.assert_hits(1);

    assert!(client.check_api_key().await.unwrap());
    check.assert_hits(2);
}

#[tokio::test]
async fn missing_key_fails_before_any_request() {
    let server = MockServer::start();
    let check = mock_key_check(&server);

    let err = TcmbClient::builder()
        .api_key_env("TCMB_RS_TEST_SURELY_UNSET_VARIABLE")
        .base_url(base_url(&server))
        .build()
        .await
        .unwrap_err();

    assert!(matches!(err, TcmbError::MissingCredential), "got {err:?}");
    check.assert_hits(0);
}

#[tokio::test]
async fn empty_key_counts_as_missing() {
    let err = TcmbClient::builder()
        .api_key("")
        .api_key_env("TCMB_RS_TEST_SURELY_UNSET_VARIABLE")
        .build_unchecked()
        .unwrap_err();
    assert!(matches!(err, TcmbError::MissingCredential));
}

#[tokio::test]
async fn free_check_without_key_is_missing_credential() {
    let err = tcmb_rs::check_api_key(None).await.unwrap_err();
    assert!(matches!(err, TcmbError::MissingCredential));
}

#[tokio::test]
async fn rejected_key_is_invalid_credential() {
    let server = MockServer::start();
    let check = server.mock(|when, then| {
        when.method(GET).path("/categories/key=BADKEY");
        then.status(500)
            .header("content-type", "text/html")
            .body(read_fixture("error_page.html"));
    });

    let err = TcmbClient::builder()
        .api_key("BADKEY")
        .base_url(base_url(&server))
        .build()
        .await
        .unwrap_err();
    check.assert();

    match err {
        TcmbError::InvalidCredential { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message.as_deref(), Some("Bir hata oluştu. An error occurred."));
        }
        other => panic!("expected InvalidCredential, got {other:?}"),
    }
}

#[tokio::test]
async fn header_placement_moves_key_out_of_the_url() {
    let server = MockServer::start();
    let check = server.mock(|when, then| {
        when.method(GET).path("/categories/").header("key", KEY);
        then.status(200)
            .header("content-type", "application/json")
            .body(read_fixture("categories.json"));
    });
    let listing = server.mock(|when, then| {
        when.method(GET).path("/categories/type=json").header("key", KEY);
        then.status(200)
            .header("content-type", "application/json")
            .body(read_fixture("categories.json"));
    });

    let client = TcmbClient::builder()
        .api_key(KEY)
        .key_placement(KeyPlacement::Header)
        .base_url(base_url(&server))
        .build()
        .await
        .unwrap();
    check.assert();

    let cats = client.categories_metadata().await.unwrap();
    listing.assert();
    assert_eq!(cats.len(), 2);
}

#[tokio::test]
async fn debug_output_redacts_key() {
    let client = TcmbClient::builder()
        .api_key("super-secret")
        .build_unchecked()
        .unwrap();
    let dbg = format!("{client:?}");
    assert!(!dbg.contains("super-secret"));
}
