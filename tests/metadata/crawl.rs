use httpmock::Method::GET;
use httpmock::MockServer;
use tcmb_rs::{CodeSource, SeriesIndex, fetch_datagroup_series_codes};

use crate::common::{KEY, client};

fn mock_two_groups(server: &MockServer) -> [httpmock::Mock<'_>; 3] {
    let groups = server.mock(|when, then| {
        when.method(GET).path(format!("/datagroups/mode=0&type=json&key={KEY}"));
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"[{"DATAGROUP_CODE":"bie_a"},{"DATAGROUP_CODE":"bie_b"},{"CATEGORY_ID":9}]"#);
    });
    let a = server.mock(|when, then| {
        when.method(GET).path(format!("/serieList/code=bie_a&type=json&key={KEY}"));
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"[{"SERIE_CODE":"TP.A.ONE"},{"SERIE_CODE":"TP.A.TWO"}]"#);
    });
    let b = server.mock(|when, then| {
        when.method(GET).path(format!("/serieList/code=bie_b&type=json&key={KEY}"));
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"SERIE_CODE":"TP.B.ONE"}"#);
    });
    [groups, a, b]
}

#[tokio::test]
async fn crawl_collects_codes_per_datagroup() {
    let server = MockServer::start();
    let client = client(&server).await;
    let mocks = mock_two_groups(&server);

    let index = fetch_datagroup_series_codes(&client).await.unwrap();
    for m in &mocks {
        m.assert_hits(1);
    }

    assert_eq!(index.groups().len(), 2);
    assert_eq!(index.groups()["bie_a"], vec!["TP.A.ONE", "TP.A.TWO"]);
    assert_eq!(index.codes(), vec!["TP.A.ONE", "TP.A.TWO", "TP.B.ONE"]);
}

#[tokio::test]
async fn live_source_searches_the_crawl() {
    let server = MockServer::start();
    let client = client(&server).await;
    let _mocks = mock_two_groups(&server);

    let found = client
        .search_series("TP.?.ONE", &CodeSource::Live)
        .await
        .unwrap();
    assert_eq!(found, vec!["TP.A.ONE", "TP.B.ONE"]);
}

#[tokio::test]
async fn saved_crawl_backs_later_reads() {
    let server = MockServer::start();
    let client = client(&server).await;
    let _mocks = mock_two_groups(&server);

    let path = std::env::temp_dir().join(format!("tcmb-rs-crawl-{}.json", std::process::id()));
    fetch_datagroup_series_codes(&client)
        .await
        .unwrap()
        .save(&path)
        .unwrap();
    let index = SeriesIndex::from_path(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    // codes outside the bundled sample only resolve through the crawled index
    let bundled = client
        .search_series("TP.B.*", &CodeSource::Bundled)
        .await
        .unwrap();
    assert!(bundled.is_empty());

    let read = server.mock(|when, then| {
        when.method(GET).path(format!(
            "/series=TP.B.ONE&startDate=01-01-2024&endDate=31-12-2024&type=json&key={KEY}&decimalSeperator=."
        ));
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"totalCount":1,"items":[{"Tarih":"2024","TP_B_ONE":"4.5"}]}"#);
    });
    let frame = client
        .read("TP.B.*")
        .start("01-01-2024")
        .end("31-12-2024")
        .code_source(CodeSource::Index(index))
        .fetch()
        .await
        .unwrap();
    read.assert();
    assert_eq!(frame.column("TP_B_ONE").unwrap(), &[4.5][..]);
}
