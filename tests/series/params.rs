use httpmock::Method::GET;
use httpmock::MockServer;
use tcmb_rs::TcmbError;

use crate::common::{KEY, client, read_fixture};

#[tokio::test]
async fn extra_param_overrides_in_place() {
    let server = MockServer::start();
    let client = client(&server).await;

    let mock = server.mock(|when, then| {
        when.method(GET).path(format!(
            "/series=TP.DK.USD.A.YTL&startDate=01-01-2024&endDate=08-01-2024&type=json&key={KEY}\
             &frequency=2&decimalSeperator=.&lang=en"
        ));
        then.status(200)
            .header("content-type", "application/json")
            .body(read_fixture("series_usd.json"));
    });

    let frame = client
        .read("TP.DK.USD.A.YTL")
        .start("01.01.2024")
        .end("2024.01.08")
        .freq_code(5)
        .param("frequency", "2")
        .param("lang", "en")
        .fetch()
        .await
        .unwrap();
    mock.assert();
    assert_eq!(frame.len(), 3);
}

#[tokio::test]
async fn custom_separator_is_sent_and_honoured() {
    let server = MockServer::start();
    let client = client(&server).await;

    let body = r#"{"totalCount":1,"items":[
        {"Tarih":"2023","TP_X":"1234,5","UNIXTIME":{"$numberLong":"1672520400"}}
    ]}"#;
    let mock = server.mock(|when, then| {
        when.method(GET).path(format!(
            "/series=TP.X&startDate=01-01-2023&endDate=31-12-2023&type=json&key={KEY}&decimalSeperator=,"
        ));
        then.status(200)
            .header("content-type", "application/json")
            .body(body);
    });

    let frame = client
        .read("TP.X")
        .start("01-01-2023")
        .end("31-12-2023")
        .separator(",")
        .fetch()
        .await
        .unwrap();
    mock.assert();
    assert_eq!(frame.column("TP_X").unwrap(), &[1234.5][..]);
}

#[tokio::test]
async fn extra_headers_are_sent() {
    let server = MockServer::start();
    let client = client(&server).await;

    let mock = server.mock(|when, then| {
        when.method(GET)
            .path(format!(
                "/series=TP.DK.USD.A.YTL&startDate=01-01-2024&endDate=08-01-2024&type=json&key={KEY}&decimalSeperator=."
            ))
            .header("x-trace", "abc");
        then.status(200)
            .header("content-type", "application/json")
            .body(read_fixture("series_usd.json"));
    });

    client
        .read("TP.DK.USD.A.YTL")
        .start("01-01-2024")
        .end("08-01-2024")
        .header("x-trace", "abc")
        .fetch()
        .await
        .unwrap();
    mock.assert();
}

#[tokio::test]
async fn empty_code_list_is_rejected() {
    let server = MockServer::start();
    let client = client(&server).await;

    let err = client
        .read(Vec::<String>::new())
        .start("01-01-2024")
        .fetch()
        .await
        .unwrap_err();
    assert!(matches!(err, TcmbError::ArgumentValidation(_)), "got {err:?}");
}

#[tokio::test]
async fn values_that_would_cut_the_url_are_refused() {
    let server = MockServer::start();
    let client = client(&server).await;

    let any = server.mock(|when, then| {
        when.method(GET);
        then.status(200).body("{}");
    });

    let err = client
        .read("TP.DK.USD.A.YTL")
        .start("01-01-2024")
        .param("lang", "en#top")
        .fetch()
        .await
        .unwrap_err();
    assert!(matches!(err, TcmbError::ArgumentValidation(_)), "got {err:?}");

    // explicit lists are never expanded, so a `?` stays in the code
    let err = client
        .read(vec!["TP.API.REP.TL.A??"])
        .start("01-01-2024")
        .fetch()
        .await
        .unwrap_err();
    assert!(matches!(err, TcmbError::ArgumentValidation(_)), "got {err:?}");
    any.assert_hits(0);
}
