use httpmock::Method::GET;
use httpmock::MockServer;
use tcmb_rs::TcmbError;

use crate::common::{KEY, client, read_fixture};

#[tokio::test]
async fn error_title_page_is_invalid_series_code() {
    let server = MockServer::start();
    let client = client(&server).await;

    let mock = server.mock(|when, then| {
        when.method(GET).path(format!(
            "/series=TP.NOPE&startDate=01-01-2024&endDate=31-01-2024&type=json&key={KEY}&decimalSeperator=."
        ));
        then.status(200)
            .header("content-type", "text/html")
            .body(read_fixture("series_not_found.html"));
    });

    let err = client
        .read("TP.NOPE")
        .start("01-01-2024")
        .end("31-01-2024")
        .fetch()
        .await
        .unwrap_err();
    mock.assert();
    assert!(matches!(err, TcmbError::InvalidSeriesCode), "got {err:?}");
}

#[tokio::test]
async fn unmarked_non_json_reraises_parse_error() {
    let server = MockServer::start();
    let client = client(&server).await;

    let mock = server.mock(|when, then| {
        when.method(GET).path(format!("/serieList/code=TP.X&type=json&key={KEY}"));
        then.status(200).body("<html>bakım çalışması</html>");
    });

    let err = client.series_metadata(Some("TP.X"), None).await.unwrap_err();
    mock.assert();
    assert!(matches!(err, TcmbError::Json(_)), "got {err:?}");
}

#[tokio::test]
async fn server_error_on_read_is_invalid_credential() {
    let server = MockServer::start();
    let client = client(&server).await;

    let mock = server.mock(|when, then| {
        when.method(GET).path(format!("/serieList/code=TP.X&type=json&key={KEY}"));
        then.status(500).body(read_fixture("error_page.html"));
    });

    let err = client.series_metadata(Some("TP.X"), None).await.unwrap_err();
    mock.assert();
    assert!(
        matches!(err, TcmbError::InvalidCredential { status: 500, .. }),
        "got {err:?}"
    );
}
