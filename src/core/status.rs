//! Response classification.
//!
//! This is a heuristic, not an exhaustive mapping of EVDS failures:
//! - any 4xx/5xx status is reported as [`TcmbError::InvalidCredential`], since the service
//!   answers nearly every problem (bad key included) with a generic server error page;
//! - a 200 body that is not JSON but contains the `error-title` marker of the HTML error
//!   page means the series code could not be resolved;
//! - any other non-JSON 200 body surfaces the original parse error unchanged.

use std::sync::OnceLock;

use regex::Regex;
use reqwest::StatusCode;

use crate::core::TcmbError;

const SERIES_ERROR_MARKER: &str = "error-title";

fn body_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)<body>(.*?)</body>").expect("static regex"))
}

/// Pulls a readable message out of an HTML error page.
///
/// Takes the first `<body>...</body>` capture and strips surrounding whitespace along with
/// stray `\r` / `\n` escape sequences.
pub(crate) fn extract_error_message(body: &str) -> Option<String> {
    let raw = body_re().captures(body)?.get(1)?.as_str();

    let mut msg = raw.trim();
    loop {
        let next = msg
            .trim_start_matches("\\r")
            .trim_start_matches("\\n")
            .trim_end_matches("\\n")
            .trim_end_matches("\\r")
            .trim();
        if next.len() == msg.len() {
            break;
        }
        msg = next;
    }

    (!msg.is_empty()).then(|| msg.to_string())
}

/// Decides whether a response is usable.
///
/// Statuses below 400 other than 200 pass without inspecting the body.
pub(crate) fn check_status(status: StatusCode, body: &str) -> Result<(), TcmbError> {
    if status != StatusCode::OK {
        if status.is_client_error() || status.is_server_error() {
            let message = extract_error_message(body);
            #[cfg(feature = "tracing")]
            tracing::warn!(
                status = status.as_u16(),
                message = message.as_deref().unwrap_or(""),
                "EVDS returned an error page; treating it as an API key problem"
            );
            return Err(TcmbError::InvalidCredential {
                status: status.as_u16(),
                message,
            });
        }
        return Ok(());
    }

    match serde_json::from_str::<serde::de::IgnoredAny>(body) {
        Ok(_) => Ok(()),
        Err(_) if body.contains(SERIES_ERROR_MARKER) => Err(TcmbError::InvalidSeriesCode),
        Err(e) => {
            #[cfg(feature = "tracing")]
            tracing::warn!(error = %e, "cannot convert response to JSON");
            Err(TcmbError::Json(e))
        }
    }
}
