//! Wildcard search over series codes.
//!
//! Patterns use `*` for any run of characters and `?` for exactly one character. The
//! translation to a regular expression leaves every other character alone, so a literal `.`
//! in a series code also matches any character. Matching is case-sensitive and may start
//! anywhere in the candidate.

use std::collections::BTreeMap;
use std::path::Path;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::core::{TcmbClient, TcmbError};

const BUNDLED_INDEX: &str = include_str!("../../resources/series.json");

/// Translates a wildcard pattern into regex source.
pub fn wildcard_to_regex(pattern: &str) -> String {
    pattern.replace('*', ".*").replace('?', ".")
}

/// `true` if a series string should be expanded through [`wildcard_search`] before a read.
///
/// Besides `*` and `?`, an empty segment (`..`) counts as a wildcard.
pub fn has_wildcard(series: &str) -> bool {
    series.contains('*') || series.contains('?') || series.contains("..")
}

/// Returns the items that match `pattern`, in their original order.
///
/// # Errors
///
/// [`TcmbError::InvalidPattern`] if the translated pattern is not a valid regex.
pub fn wildcard_search<S: AsRef<str>>(
    pattern: &str,
    items: &[S],
) -> Result<Vec<String>, TcmbError> {
    let re = Regex::new(&wildcard_to_regex(pattern))?;
    Ok(items
        .iter()
        .map(AsRef::as_ref)
        .filter(|item| re.is_match(item))
        .map(str::to_string)
        .collect())
}

/// Series codes grouped by data group code.
///
/// Serialized as a JSON object `{ "<datagroup>": ["<series>", ...], ... }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeriesIndex {
    groups: BTreeMap<String, Vec<String>>,
}

impl SeriesIndex {
    /// The snapshot compiled into the crate.
    ///
    /// It is a partial sample covering a handful of data groups, not the full catalogue, so a
    /// pattern can silently match fewer series than exist on the service. For complete results
    /// crawl once and reuse the file:
    ///
    /// ```no_run
    /// # async fn demo(client: tcmb_rs::TcmbClient) -> Result<(), tcmb_rs::TcmbError> {
    /// use tcmb_rs::{CodeSource, SeriesIndex, fetch_datagroup_series_codes};
    ///
    /// fetch_datagroup_series_codes(&client).await?.save("series.json")?;
    /// let source = CodeSource::Index(SeriesIndex::from_path("series.json")?);
    /// let frame = client.read("TP.FG.J*").code_source(source).fetch().await?;
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// # Errors
    ///
    /// Only if the bundled resource is malformed.
    pub fn bundled() -> Result<Self, TcmbError> {
        Self::from_json(BUNDLED_INDEX)
    }

    /// Parses an index from its JSON form.
    ///
    /// # Errors
    ///
    /// [`TcmbError::Json`] if `json` is not an object of string lists.
    pub fn from_json(json: &str) -> Result<Self, TcmbError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads an index previously written with [`SeriesIndex::save`].
    ///
    /// # Errors
    ///
    /// I/O or JSON errors.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, TcmbError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Writes the index as JSON.
    ///
    /// # Errors
    ///
    /// I/O or serialization errors.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), TcmbError> {
        let text = serde_json::to_string_pretty(self)?;
        std::fs::write(path, text)?;
        Ok(())
    }

    /// Adds (or replaces) the codes of one data group.
    pub fn insert(&mut self, datagroup: impl Into<String>, codes: Vec<String>) {
        self.groups.insert(datagroup.into(), codes);
    }

    pub fn groups(&self) -> &BTreeMap<String, Vec<String>> {
        &self.groups
    }

    /// All series codes, data group by data group.
    pub fn codes(&self) -> Vec<&str> {
        self.groups
            .values()
            .flat_map(|codes| codes.iter().map(String::as_str))
            .collect()
    }

    /// Runs [`wildcard_search`] over [`SeriesIndex::codes`].
    ///
    /// # Errors
    ///
    /// [`TcmbError::InvalidPattern`] for a pattern that is not a valid regex.
    pub fn search(&self, pattern: &str) -> Result<Vec<String>, TcmbError> {
        wildcard_search(pattern, &self.codes())
    }
}

/// Where wildcard patterns look for candidate series codes.
#[derive(Debug, Clone, Default)]
pub enum CodeSource {
    /// The partial sample bundled with the crate; see [`SeriesIndex::bundled`].
    #[default]
    Bundled,
    /// Crawl every data group on the service. Slow: one request per data group, typically
    /// several minutes in total.
    Live,
    /// A caller-provided index.
    Index(SeriesIndex),
    /// A caller-provided flat list of codes.
    Items(Vec<String>),
}

/// Fetches the series codes of every data group from the service.
///
/// Requests are issued one after another; expect this to take minutes. The result is what
/// the bundled snapshot is refreshed from.
///
/// # Errors
///
/// The first failing request aborts the crawl.
#[cfg_attr(feature = "tracing", tracing::instrument(skip(client), err))]
pub async fn fetch_datagroup_series_codes(client: &TcmbClient) -> Result<SeriesIndex, TcmbError> {
    let dg_codes: Vec<String> = client
        .datagroups()
        .await?
        .iter()
        .filter_map(|dg| dg.datagroup_code.clone())
        .collect();

    #[cfg(feature = "tracing")]
    tracing::info!(count = dg_codes.len(), "crawling data groups for series codes");

    let mut index = SeriesIndex::default();
    for dg in dg_codes {
        let codes = client
            .series_metadata(None, Some(&dg))
            .await?
            .into_vec()
            .into_iter()
            .filter_map(|meta| meta.serie_code)
            .collect();
        index.insert(dg, codes);
    }
    Ok(index)
}

impl TcmbClient {
    /// Expands a wildcard pattern against the chosen code source.
    ///
    /// # Errors
    ///
    /// [`TcmbError::InvalidPattern`], or any error of a [`CodeSource::Live`] crawl.
    pub async fn search_series(
        &self,
        pattern: &str,
        source: &CodeSource,
    ) -> Result<Vec<String>, TcmbError> {
        match source {
            CodeSource::Bundled => SeriesIndex::bundled()?.search(pattern),
            CodeSource::Live => fetch_datagroup_series_codes(self).await?.search(pattern),
            CodeSource::Index(index) => index.search(pattern),
            CodeSource::Items(items) => wildcard_search(pattern, items),
        }
    }
}
