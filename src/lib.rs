//! tcmb-rs: ergonomic client for the EVDS web service of the Central Bank of the Republic
//! of Turkey (TCMB).
//!
//! - Series reads ([`ReadBuilder`]) returning a date-indexed [`SeriesFrame`].
//! - Category, data group and series metadata, with the category and data group listings
//!   memoized per client.
//! - Wildcard expansion of series codes against a bundled or live [`SeriesIndex`].
//!
//! The API key is passed to the builder or read from `TCMB_API_KEY`, and validated once when
//! the client is built.
//!
//! ```no_run
//! # #[tokio::main]
//! # async fn main() -> Result<(), tcmb_rs::TcmbError> {
//! let client = tcmb_rs::TcmbClient::builder().api_key("my-key").build().await?;
//! let frame = client.read("TP.DK.USD.A.YTL").start("01-01-2024").fetch().await?;
//! for (date, values) in frame.rows() {
//!     println!("{date}: {values:?}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod core;
pub mod metadata;
pub mod search;
pub mod series;

pub use crate::core::client::API_KEY_ENV;
pub use crate::core::dates::standardize_date;
pub use crate::core::query::{Endpoint, QueryParams, build_url};
pub use crate::core::{KeyPlacement, TcmbClient, TcmbClientBuilder, TcmbError, check_api_key};
pub use metadata::{Category, DataGroup, DatagroupMode, OneOrMany, SeriesMeta};
pub use search::{
    CodeSource, SeriesIndex, fetch_datagroup_series_codes, has_wildcard, wildcard_search,
};
pub use series::{
    Aggregation, Formula, Frequency, IndexFormat, ReadBuilder, SeriesColumn, SeriesFrame,
    SeriesSelector, read, to_frame,
};

#[cfg(feature = "dataframe")]
pub use crate::core::dataframe::ToDataFrame;
