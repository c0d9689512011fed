#[cfg(feature = "test-mode")]
use std::env;

/// Read the response body as text.
/// In `test-mode`, if `TCMB_RECORD=1`, the body is saved as a fixture named after `_endpoint`
/// and `_tag`.
pub(crate) async fn get_text(
    resp: reqwest::Response,
    _endpoint: &str,
    _tag: &str,
) -> Result<String, reqwest::Error> {
    let text = resp.text().await?;

    #[cfg(feature = "test-mode")]
    {
        if env::var("TCMB_RECORD").ok().as_deref() == Some("1")
            && let Err(e) = crate::core::fixtures::record_fixture(_endpoint, _tag, &text)
        {
            eprintln!("TCMB_RECORD: failed to write fixture for {_tag}: {e}");
        }
    }

    Ok(text)
}
