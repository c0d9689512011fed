//! API key resolution and validation.
//!
//! EVDS has no dedicated endpoint for checking a key, so the category listing (which needs
//! no series parameter) stands in for one.

use std::env;

use reqwest::Client;
use url::Url;

use super::constants::KEY_HEADER;
use crate::core::TcmbError;
use crate::core::query::{Endpoint, QueryParams, build_url};
use crate::core::status::check_status;

/// Where the API key is attached to outgoing requests.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum KeyPlacement {
    /// As the `key=` query parameter (default).
    #[default]
    Query,
    /// As a `key` request header.
    Header,
}

/// Explicit key first, then the named environment variable. Empty values count as absent.
pub(crate) fn resolve_api_key(explicit: Option<String>, env_name: &str) -> Option<String> {
    explicit
        .filter(|k| !k.is_empty())
        .or_else(|| env::var(env_name).ok().filter(|k| !k.is_empty()))
}

pub(crate) async fn check_api_key(
    http: &Client,
    base: &Url,
    api_key: Option<&str>,
    placement: KeyPlacement,
) -> Result<bool, TcmbError> {
    let key = api_key.ok_or(TcmbError::MissingCredential)?;

    let mut params = QueryParams::new();
    let mut req = match placement {
        KeyPlacement::Query => {
            params.set("key", Some(key));
            http.get(Url::parse(&build_url(base.as_str(), Some(Endpoint::Categories), &params))?)
        }
        KeyPlacement::Header => http
            .get(Url::parse(&build_url(base.as_str(), Some(Endpoint::Categories), &params))?)
            .header(KEY_HEADER, key),
    };
    req = req.header("accept", "application/json");

    let resp = req.send().await?;
    let status = resp.status();
    let body = resp.text().await?;
    check_status(status, &body)?;

    Ok(true)
}
