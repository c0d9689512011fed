use thiserror::Error;

/// The primary error type for all fallible operations in this crate.
#[derive(Debug, Error)]
pub enum TcmbError {
    /// No API key was supplied and none was found in the environment.
    #[error("no API key provided: pass one explicitly or export TCMB_API_KEY")]
    MissingCredential,

    /// The service rejected the request with an HTTP error status.
    ///
    /// EVDS answers almost every problem with a generic server error, so a bad key is
    /// the most probable cause. `message` is the text extracted from the HTML error page.
    #[error("API key is invalid (HTTP {status})")]
    InvalidCredential {
        /// The HTTP status code.
        status: u16,
        /// Human-readable message taken from the `<body>` of the error page, if any.
        message: Option<String>,
    },

    /// The service could not resolve the requested series code(s).
    #[error("invalid series code")]
    InvalidSeriesCode,

    /// A date string matched none of the accepted shapes.
    #[error("unrecognized date format: {0:?} (expected DD-MM-YYYY, DD.MM.YYYY, YYYY-MM-DD or YYYY.MM.DD)")]
    UnrecognizedDateFormat(String),

    /// A date string had an accepted shape but is not a valid calendar date.
    #[error("invalid date {input:?}: {source}")]
    InvalidDate {
        /// The offending input.
        input: String,
        /// The underlying parse error.
        #[source]
        source: chrono::ParseError,
    },

    /// A data group query returned no rows.
    #[error("no data in response, check `mode` and `code` parameters (response: {body})")]
    EmptyMetadataResponse {
        /// The raw response body.
        body: String,
    },

    /// A caller-supplied argument combination is invalid.
    #[error("invalid argument: {0}")]
    ArgumentValidation(String),

    /// A wildcard pattern did not translate into a valid regular expression.
    #[error("invalid search pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// An error occurred during an HTTP request.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A provided URL could not be parsed.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// The response body was not valid JSON and carried no recognizable error marker.
    #[error("cannot convert response to JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The data received from the API was in an unexpected format or was missing a required field.
    #[error("Data format unexpected or missing field: {0}")]
    Data(String),

    /// Reading or writing a series index file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
