use httpmock::Method::GET;
use httpmock::MockServer;
use tcmb_rs::{CodeSource, SeriesIndex, TcmbError};

use crate::common::{KEY, client};

const TWO_SERIES: &str = r#"{"totalCount":1,"items":[
    {"Tarih":"2024-1","TP_API_REP_TL_A12":"1.0","TP_API_REP_TL_A23":"2.0","UNIXTIME":{"$numberLong":"1704056400"}}
]}"#;

fn items() -> Vec<String> {
    [
        "TP.API.REP.TL.A12",
        "TP.API.REP.TL.A23",
        "TP.API.REP.TL.G1",
        "TP.API.REP.TL.G1530",
        "TP.API.REP.TL.G214",
    ]
    .map(String::from)
    .to_vec()
}

#[tokio::test]
async fn pattern_expands_against_items_before_request() {
    let server = MockServer::start();
    let client = client(&server).await;

    let mock = server.mock(|when, then| {
        when.method(GET).path(format!(
            "/series=TP.API.REP.TL.A12-TP.API.REP.TL.A23&startDate=01-01-2024&endDate=31-01-2024\
             &type=json&key={KEY}&decimalSeperator=."
        ));
        then.status(200)
            .header("content-type", "application/json")
            .body(TWO_SERIES);
    });

    let frame = client
        .read("TP.API.REP.TL.A??")
        .start("01-01-2024")
        .end("31-01-2024")
        .code_source(CodeSource::Items(items()))
        .fetch()
        .await
        .unwrap();
    mock.assert();
    assert_eq!(
        frame.column_names().collect::<Vec<_>>(),
        vec!["TP_API_REP_TL_A12", "TP_API_REP_TL_A23"]
    );
}

#[tokio::test]
async fn pattern_expands_against_custom_index() {
    let server = MockServer::start();
    let client = client(&server).await;

    let mut index = SeriesIndex::default();
    index.insert("bie_apifon", items());
    let mock = server.mock(|when, then| {
        when.method(GET).path(format!(
            "/series=TP.API.REP.TL.A12-TP.API.REP.TL.A23&startDate=01-01-2024&endDate=31-01-2024\
             &type=json&key={KEY}&decimalSeperator=."
        ));
        then.status(200)
            .header("content-type", "application/json")
            .body(TWO_SERIES);
    });

    client
        .read("TP.API.REP.TL.A*")
        .start("01-01-2024")
        .end("31-01-2024")
        .code_source(CodeSource::Index(index))
        .fetch()
        .await
        .unwrap();
    mock.assert();
}

#[tokio::test]
async fn bundled_index_is_the_default_source() {
    let server = MockServer::start();
    let client = client(&server).await;

    let found = client
        .search_series("TP.API.REP.TL.A??", &CodeSource::default())
        .await
        .unwrap();
    assert_eq!(found, vec!["TP.API.REP.TL.A12", "TP.API.REP.TL.A23"]);
}

#[tokio::test]
async fn pattern_without_matches_is_rejected() {
    let server = MockServer::start();
    let client = client(&server).await;

    let any = server.mock(|when, then| {
        when.method(GET);
        then.status(200).body("{}");
    });

    let err = client
        .read("TP.NOTHING.*")
        .start("01-01-2024")
        .code_source(CodeSource::Items(items()))
        .fetch()
        .await
        .unwrap_err();
    assert!(matches!(err, TcmbError::ArgumentValidation(_)), "got {err:?}");
    any.assert_hits(0);
}
