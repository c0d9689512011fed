//! Centralized constants for default endpoints, credentials and UA.

/// Identifies the crate to the service.
pub(crate) const USER_AGENT: &str = concat!("tcmb-rs/", env!("CARGO_PKG_VERSION"));

/// EVDS web service base (endpoint and query string are appended).
pub(crate) const DEFAULT_BASE_URL: &str = "https://evds2.tcmb.gov.tr/service/evds";

/// Environment variable consulted when no API key is passed explicitly.
pub const API_KEY_ENV: &str = "TCMB_API_KEY";

/// Name of the request header carrying the key in [`KeyPlacement::Header`] mode.
///
/// [`KeyPlacement::Header`]: super::KeyPlacement::Header
pub(crate) const KEY_HEADER: &str = "key";

/// Call-level timeout applied unless the builder overrides it.
pub(crate) const DEFAULT_TIMEOUT_SECS: u64 = 30;
