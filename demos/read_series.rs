//! Reads a few exchange-rate series and prints them.
//!
//! ```sh
//! TCMB_API_KEY=... RUST_LOG=tcmb_rs=debug cargo run --example read_series --features tracing-subscriber
//! ```

use tcmb_rs::{Aggregation, Frequency, TcmbClient};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let client = TcmbClient::from_env().await?;

    // the bundled index only samples a few data groups; use CodeSource::Index for a full crawl
    let frame = client
        .read("TP.DK.*.A.YTL")
        .start("01-01-2024")
        .end("31-12-2024")
        .freq(Frequency::Monthly)
        .agg(Aggregation::Avg)
        .fetch()
        .await?;

    println!("{:<12}{}", frame.index_name, frame.column_names().collect::<Vec<_>>().join("  "));
    for (date, values) in frame.rows() {
        let cells: Vec<String> = values.iter().map(|v| format!("{v:.4}")).collect();
        println!("{date:<12}{}", cells.join("  "));
    }
    Ok(())
}
