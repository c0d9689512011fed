//! Time-series reads.
//!
//! A read assembles the EVDS parameter list, issues one request against the bare endpoint
//! and converts the `items` rows into a [`SeriesFrame`].

mod frame;
mod params;
mod wire;

pub use frame::{IndexFormat, SeriesColumn, SeriesFrame, to_frame};
pub use params::{Aggregation, Formula, Frequency};

use chrono::{Local, NaiveDate};

use crate::core::dates::{format_date, standardize_date};
use crate::core::query::QueryParams;
use crate::core::{TcmbClient, TcmbError};
use crate::search::{CodeSource, has_wildcard};
use params::join_dashed;
use wire::ItemsEnvelope;

/// Start date used when none is given.
const EPOCH_START: &str = "01-01-1970";

/// One series string or an explicit list of codes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeriesSelector {
    /// A wildcard pattern, a single code, or several codes joined with `-`.
    Single(String),
    /// Codes used as given, never expanded.
    Many(Vec<String>),
}

impl From<&str> for SeriesSelector {
    fn from(s: &str) -> Self {
        Self::Single(s.to_string())
    }
}

impl From<String> for SeriesSelector {
    fn from(s: String) -> Self {
        Self::Single(s)
    }
}

impl From<Vec<String>> for SeriesSelector {
    fn from(v: Vec<String>) -> Self {
        Self::Many(v)
    }
}

impl From<Vec<&str>> for SeriesSelector {
    fn from(v: Vec<&str>) -> Self {
        Self::Many(v.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for SeriesSelector {
    fn from(v: &[&str]) -> Self {
        Self::Many(v.iter().map(|s| (*s).to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for SeriesSelector {
    fn from(v: [&str; N]) -> Self {
        Self::Many(v.iter().map(|s| (*s).to_string()).collect())
    }
}

/// A builder for reading one or more series from EVDS.
///
/// # Example
///
/// ```no_run
/// # use tcmb_rs::{Frequency, TcmbClient};
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let client = TcmbClient::from_env().await?;
/// let frame = client
///     .read(["TP.DK.USD.S.YTL", "TP.DK.EUR.S.YTL"])
///     .start("2024-01-01")
///     .freq(Frequency::Monthly)
///     .fetch()
///     .await?;
/// println!("{} rows", frame.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ReadBuilder {
    client: TcmbClient,
    series: SeriesSelector,
    start: Option<String>,
    end: Option<String>,
    aggregations: Vec<Aggregation>,
    formulas: Vec<Formula>,
    frequency: Option<u8>,
    separator: String,
    headers: Vec<(String, String)>,
    extra: QueryParams,
    metadata: bool,
    code_source: CodeSource,
}

impl ReadBuilder {
    /// Creates a new `ReadBuilder`.
    ///
    /// A single series string containing `*`, `?` or `..` is expanded against the bundled
    /// series index before the request (see [`ReadBuilder::code_source`]). Any other single
    /// string is split on `-`, so `"A-B"` reads (and, with [`ReadBuilder::metadata`], describes)
    /// two series.
    pub fn new(client: &TcmbClient, series: impl Into<SeriesSelector>) -> Self {
        Self {
            client: client.clone(),
            series: series.into(),
            start: None,
            end: None,
            aggregations: Vec::new(),
            formulas: Vec::new(),
            frequency: None,
            separator: ".".to_string(),
            headers: Vec::new(),
            extra: QueryParams::new(),
            metadata: false,
            code_source: CodeSource::Bundled,
        }
    }

    /// First date, in `DD-MM-YYYY`, `DD.MM.YYYY`, `YYYY-MM-DD` or `YYYY.MM.DD`.
    /// Default: `01-01-1970`.
    pub fn start(mut self, date: impl Into<String>) -> Self {
        self.start = Some(date.into());
        self
    }

    /// Last date, same shapes as [`ReadBuilder::start`]. Default: today.
    pub fn end(mut self, date: impl Into<String>) -> Self {
        self.end = Some(date.into());
        self
    }

    /// Sets both ends of the period from calendar dates.
    pub fn between(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start = Some(format_date(start));
        self.end = Some(format_date(end));
        self
    }

    /// One aggregation for every series.
    pub fn agg(mut self, agg: Aggregation) -> Self {
        self.aggregations = vec![agg];
        self
    }

    /// One aggregation per series, in series order.
    pub fn aggs(mut self, aggs: impl IntoIterator<Item = Aggregation>) -> Self {
        self.aggregations = aggs.into_iter().collect();
        self
    }

    /// One formula for every series.
    pub fn formula(mut self, formula: Formula) -> Self {
        self.formulas = vec![formula];
        self
    }

    /// One formula per series, in series order.
    pub fn formulas(mut self, formulas: impl IntoIterator<Item = Formula>) -> Self {
        self.formulas = formulas.into_iter().collect();
        self
    }

    /// Output frequency. Default: the native frequency of the series.
    pub fn freq(mut self, freq: Frequency) -> Self {
        self.frequency = Some(freq.code());
        self
    }

    /// Output frequency as a raw EVDS code.
    pub fn freq_code(mut self, code: u8) -> Self {
        self.frequency = Some(code);
        self
    }

    /// Decimal separator of the returned values. Default: `.`.
    pub fn separator(mut self, sep: impl Into<String>) -> Self {
        self.separator = sep.into();
        self
    }

    /// Adds a request header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Adds a raw query parameter; a name that is already present is overridden in place.
    ///
    /// Values are not percent-encoded by this crate, but the final URL still goes through
    /// [`url::Url`], which escapes spaces, quotes, `<`, `>`, `` ` ``, `{` and `}`. A value
    /// containing `?` or `#` is rejected with [`TcmbError::ArgumentValidation`] when the read is
    /// sent, since it would cut the path short.
    pub fn param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.set(name, Some(value.into()));
        self
    }

    /// Also fetch the metadata of each series, one extra request per series, into
    /// [`SeriesFrame::attrs`]. Default: `false`.
    pub fn metadata(mut self, yes: bool) -> Self {
        self.metadata = yes;
        self
    }

    /// Where wildcard patterns are expanded. Default: [`CodeSource::Bundled`].
    pub fn code_source(mut self, source: CodeSource) -> Self {
        self.code_source = source;
        self
    }

    async fn resolve_codes(&self) -> Result<Vec<String>, TcmbError> {
        let codes = match &self.series {
            SeriesSelector::Single(s) if has_wildcard(s) => {
                let found = self.client.search_series(s, &self.code_source).await?;
                if found.is_empty() {
                    return Err(TcmbError::ArgumentValidation(format!(
                        "pattern {s:?} matched no series"
                    )));
                }
                found
            }
            SeriesSelector::Single(s) => s
                .split('-')
                .filter(|c| !c.is_empty())
                .map(str::to_string)
                .collect(),
            SeriesSelector::Many(v) => v.clone(),
        };
        if codes.is_empty() {
            return Err(TcmbError::ArgumentValidation(
                "at least one series code is required".into(),
            ));
        }
        Ok(codes)
    }

    /// `(startDate, endDate)` in wire format.
    fn period(&self) -> Result<(String, String), TcmbError> {
        let start = match &self.start {
            Some(s) => standardize_date(s)?,
            None => EPOCH_START.to_string(),
        };
        let end = match &self.end {
            Some(s) => standardize_date(s)?,
            None => format_date(Local::now().date_naive()),
        };
        Ok((start, end))
    }

    fn build_params(&self, series: &str, start: String, end: String) -> QueryParams {
        let mut params = QueryParams::new()
            .with("series", Some(series))
            .with("startDate", Some(start))
            .with("endDate", Some(end))
            .with("type", Some("json"))
            .with("aggregationTypes", join_dashed(&self.aggregations))
            .with("key", self.client.key_param())
            .with("formulas", join_dashed(&self.formulas))
            .with("frequency", self.frequency)
            .with("decimalSeperator", Some(&self.separator));

        for (k, v) in self.extra.pairs() {
            params.set(k.as_str(), v.as_deref());
        }
        params
    }

    /// Executes the read.
    ///
    /// # Errors
    ///
    /// Date errors for malformed `start`/`end`, classification errors of the response
    /// ([`TcmbError::InvalidCredential`], [`TcmbError::InvalidSeriesCode`]), and
    /// [`TcmbError::Data`] for rows that cannot be tabulated.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err, fields(series = ?self.series)))]
    pub async fn fetch(self) -> Result<SeriesFrame, TcmbError> {
        let (start, end) = self.period()?;
        let codes = self.resolve_codes().await?;
        let series = codes.join("-");
        let params = self.build_params(&series, start, end);

        let body = self
            .client
            .get_body(None, &params, &self.headers, &series)
            .await?;

        let env: ItemsEnvelope = serde_json::from_str(&body)
            .map_err(|e| TcmbError::Data(format!("json parse error: {e}")))?;
        let items = env
            .items
            .ok_or_else(|| TcmbError::Data("missing items".into()))?;

        let mut frame = to_frame(&items, &self.separator)?;

        if self.metadata {
            for code in &codes {
                let meta = self.client.series_metadata(Some(code.as_str()), None).await?;
                frame.attrs.insert(code.clone(), meta);
            }
        }

        Ok(frame)
    }
}

impl TcmbClient {
    /// Starts a series read; see [`ReadBuilder`].
    pub fn read(&self, series: impl Into<SeriesSelector>) -> ReadBuilder {
        ReadBuilder::new(self, series)
    }
}

/// Reads series with a client built from `TCMB_API_KEY` and default options.
///
/// # Errors
///
/// [`TcmbError::MissingCredential`] if the variable is unset, plus everything
/// [`ReadBuilder::fetch`] reports.
pub async fn read(series: impl Into<SeriesSelector>) -> Result<SeriesFrame, TcmbError> {
    let client = TcmbClient::from_env().await?;
    client.read(series).fetch().await
}
