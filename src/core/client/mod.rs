//! Public client surface + builder.
//! Internals are split into `auth` (key resolution/validation) and `constants` (UA + defaults).

mod auth;
mod constants;

pub use auth::KeyPlacement;
pub use constants::API_KEY_ENV;

use crate::core::query::{Endpoint, QueryParams, build_url};
use crate::core::status::check_status;
use crate::core::TcmbError;
use crate::metadata::{Category, DataGroup};
use constants::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS, KEY_HEADER, USER_AGENT};
use reqwest::{Client, Proxy};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::OnceCell;
use url::Url;

/// A configured EVDS client.
///
/// The API key is resolved and validated once when the client is built and then reused,
/// unchanged, for every request. Clones share the HTTP connection pool and the memoized
/// category/data group listings.
#[derive(Clone)]
pub struct TcmbClient {
    http: Client,
    base_url: Url,
    api_key: Arc<str>,
    key_placement: KeyPlacement,

    categories: Arc<OnceCell<Vec<Category>>>,
    datagroups: Arc<OnceCell<Vec<DataGroup>>>,
}

impl fmt::Debug for TcmbClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TcmbClient")
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &"<redacted>")
            .field("key_placement", &self.key_placement)
            .finish_non_exhaustive()
    }
}

impl TcmbClient {
    /// Create a new builder.
    pub fn builder() -> TcmbClientBuilder {
        TcmbClientBuilder::default()
    }

    /// Builds a client with default settings and the key from `TCMB_API_KEY`.
    ///
    /// # Errors
    ///
    /// [`TcmbError::MissingCredential`] if the variable is unset, or any error raised while
    /// validating the key.
    pub async fn from_env() -> Result<Self, TcmbError> {
        Self::builder().build().await
    }

    /* -------- internal getters used by other modules -------- */

    /// The `key` query value, or `None` when the key travels in a header.
    pub(crate) fn key_param(&self) -> Option<&str> {
        match self.key_placement {
            KeyPlacement::Query => Some(&*self.api_key),
            KeyPlacement::Header => None,
        }
    }

    pub(crate) fn categories_cell(&self) -> &OnceCell<Vec<Category>> {
        &self.categories
    }

    pub(crate) fn datagroups_cell(&self) -> &OnceCell<Vec<DataGroup>> {
        &self.datagroups
    }

    /// Issues one GET against `endpoint` and returns the classified body.
    ///
    /// `tag` only names the recorded fixture in `test-mode`. Values holding `?` or `#` are
    /// refused before any I/O.
    pub(crate) async fn get_body(
        &self,
        endpoint: Option<Endpoint>,
        params: &QueryParams,
        headers: &[(String, String)],
        tag: &str,
    ) -> Result<String, TcmbError> {
        if let Some((k, v)) = params.path_breaking_pair() {
            return Err(TcmbError::ArgumentValidation(format!(
                "parameter {k}={v:?} contains `?` or `#`, which EVDS URLs cannot carry"
            )));
        }
        let url = Url::parse(&build_url(self.base_url.as_str(), endpoint, params))?;

        let mut req = self.http.get(url);
        if self.key_placement == KeyPlacement::Header {
            req = req.header(KEY_HEADER, &*self.api_key);
        }
        for (name, value) in headers {
            req = req.header(name.as_str(), value.as_str());
        }

        let resp = req.send().await?;
        let status = resp.status();
        let endpoint_name = endpoint.map_or("series", Endpoint::as_str);
        let body = crate::core::net::get_text(resp, endpoint_name, tag).await?;

        check_status(status, &body)?;
        Ok(body)
    }
}

/* ----------------------- Builder ----------------------- */

/// Configuration for a [`TcmbClient`].
#[derive(Default)]
pub struct TcmbClientBuilder {
    api_key: Option<String>,
    api_key_env: Option<String>,
    base_url: Option<Url>,
    key_placement: KeyPlacement,
    proxy: Option<Proxy>,
    user_agent: Option<String>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
}

impl TcmbClientBuilder {
    /// Use this API key instead of reading the environment.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Read the fallback key from this environment variable instead of `TCMB_API_KEY`.
    pub fn api_key_env(mut self, name: impl Into<String>) -> Self {
        self.api_key_env = Some(name.into());
        self
    }

    /// Override the service base (e.g., `https://evds2.tcmb.gov.tr/service/evds`).
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Send the key as a query parameter (default) or as a `key` header.
    pub fn key_placement(mut self, placement: KeyPlacement) -> Self {
        self.key_placement = placement;
        self
    }

    /// Route all requests through a proxy.
    pub fn proxy(mut self, proxy: Proxy) -> Self {
        self.proxy = Some(proxy);
        self
    }

    /// Override the User-Agent.
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Set a global request timeout (overall). Default: 30 seconds.
    pub fn timeout(mut self, dur: Duration) -> Self {
        self.timeout = Some(dur);
        self
    }

    /// Set a connect timeout. Default: none.
    pub fn connect_timeout(mut self, dur: Duration) -> Self {
        self.connect_timeout = Some(dur);
        self
    }

    /// Builds the client and validates the API key against the service.
    ///
    /// # Errors
    ///
    /// [`TcmbError::MissingCredential`] before any network call if no key is available;
    /// otherwise whatever the key check reports.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err))]
    pub async fn build(self) -> Result<TcmbClient, TcmbError> {
        let client = self.build_unchecked()?;
        auth::check_api_key(
            &client.http,
            &client.base_url,
            Some(&*client.api_key),
            client.key_placement,
        )
        .await?;
        Ok(client)
    }

    /// Builds the client without contacting the service.
    ///
    /// The key must still be resolvable.
    ///
    /// # Errors
    ///
    /// [`TcmbError::MissingCredential`] if no key is available, or an error building the
    /// HTTP client.
    pub fn build_unchecked(self) -> Result<TcmbClient, TcmbError> {
        let env_name = self.api_key_env.as_deref().unwrap_or(API_KEY_ENV);
        let api_key =
            auth::resolve_api_key(self.api_key, env_name).ok_or(TcmbError::MissingCredential)?;

        let base_url = match self.base_url {
            Some(u) => u,
            None => Url::parse(DEFAULT_BASE_URL)?,
        };

        let http = http_client(
            self.user_agent.as_deref(),
            self.timeout,
            self.connect_timeout,
            self.proxy,
        )?;

        Ok(TcmbClient {
            http,
            base_url,
            api_key: Arc::from(api_key),
            key_placement: self.key_placement,
            categories: Arc::new(OnceCell::new()),
            datagroups: Arc::new(OnceCell::new()),
        })
    }
}

fn http_client(
    user_agent: Option<&str>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    proxy: Option<Proxy>,
) -> Result<Client, TcmbError> {
    let mut httpb = reqwest::Client::builder()
        .user_agent(user_agent.unwrap_or(USER_AGENT))
        .timeout(timeout.unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS)));

    if let Some(ct) = connect_timeout {
        httpb = httpb.connect_timeout(ct);
    }
    if let Some(p) = proxy {
        httpb = httpb.proxy(p);
    }

    Ok(httpb.build()?)
}

/// Validates `api_key` with a one-off request to the default EVDS endpoint.
///
/// Returns `Ok(true)` when the service accepts the key.
///
/// # Errors
///
/// [`TcmbError::MissingCredential`] if `api_key` is `None` (no request is made), otherwise
/// the classification of the categories response.
pub async fn check_api_key(api_key: Option<&str>) -> Result<bool, TcmbError> {
    let key = api_key.ok_or(TcmbError::MissingCredential)?;
    let http = http_client(None, None, None, None)?;
    let base = Url::parse(DEFAULT_BASE_URL)?;
    auth::check_api_key(&http, &base, Some(key), KeyPlacement::Query).await
}

impl TcmbClient {
    /// Re-validates this client's key against the service.
    ///
    /// # Errors
    ///
    /// See [`check_api_key`].
    pub async fn check_api_key(&self) -> Result<bool, TcmbError> {
        auth::check_api_key(
            &self.http,
            &self.base_url,
            Some(&*self.api_key),
            self.key_placement,
        )
        .await
    }
}
