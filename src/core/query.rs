//! Request URL assembly.
//!
//! EVDS does not use `?` for query strings: parameters are glued onto the path as
//! `key=value` pairs joined by `&`, and values go out without percent-encoding.

use std::fmt::Display;

/// A resource path under the EVDS base URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// Category listing.
    Categories,
    /// Series listing / series metadata.
    SerieList,
    /// Data group listing.
    Datagroups,
}

impl Endpoint {
    /// The path segment used on the wire.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Categories => "categories",
            Self::SerieList => "serieList",
            Self::Datagroups => "datagroups",
        }
    }
}

/// An ordered set of query parameters.
///
/// Absent values are kept so that positions stay stable when a later call fills them in,
/// but they never reach the serialized query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, Option<String>)>,
}

impl QueryParams {
    /// Creates an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key` to `value`.
    ///
    /// An existing key is overwritten in place and keeps its position; a new key is appended.
    pub fn set(&mut self, key: impl Into<String>, value: Option<impl Display>) -> &mut Self {
        let key = key.into();
        let value = value.map(|v| v.to_string());
        match self.pairs.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.pairs.push((key, value)),
        }
        self
    }

    /// Chaining variant of [`QueryParams::set`].
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: Option<impl Display>) -> Self {
        self.set(key, value);
        self
    }

    /// Returns the value stored for `key`, if present and not absent.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .and_then(|(_, v)| v.as_deref())
    }

    pub(crate) fn pairs(&self) -> &[(String, Option<String>)] {
        &self.pairs
    }

    /// First present pair whose value contains `?` or `#`; either would end the URL path.
    pub(crate) fn path_breaking_pair(&self) -> Option<(&str, &str)> {
        self.pairs.iter().find_map(|(k, v)| {
            v.as_deref()
                .filter(|v| v.contains(['?', '#']))
                .map(|v| (k.as_str(), v))
        })
    }

    /// Serializes the present pairs as `k1=v1&k2=v2`, in insertion order.
    pub fn to_query_string(&self) -> String {
        self.pairs
            .iter()
            .filter_map(|(k, v)| v.as_ref().map(|v| format!("{k}={v}")))
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// Builds `{base}/{endpoint/}{query}`.
///
/// A trailing slash on `base` is stripped first. With no parameters the URL ends right after
/// the (optional) endpoint segment.
pub fn build_url(base: &str, endpoint: Option<Endpoint>, params: &QueryParams) -> String {
    let base = base.trim_end_matches('/');
    let endpoint = endpoint.map(|e| format!("{}/", e.as_str())).unwrap_or_default();
    format!("{base}/{endpoint}{}", params.to_query_string())
}
