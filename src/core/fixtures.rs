//! Test/recording helpers for persisting HTTP fixtures.
//! Compiled only when the `test-mode` feature is enabled.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub(crate) fn get_fixture_dir() -> PathBuf {
    env::var("TCMB_FIXDIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures"))
}

/// Writes `body` to `<fixture dir>/<endpoint>_<tag>.json`.
///
/// Characters that are awkward in file names (wildcards, separators) are replaced with `_`.
pub(crate) fn record_fixture(endpoint: &str, tag: &str, body: &str) -> Result<(), std::io::Error> {
    let dir = get_fixture_dir();
    if !dir.exists() {
        fs::create_dir_all(&dir)?;
    }
    let safe_tag: String = tag
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '.' || c == '-' { c } else { '_' })
        .collect();
    let path = dir.join(format!("{endpoint}_{safe_tag}.json"));

    fs::write(&path, body)?;

    if env::var("TCMB_DEBUG").ok().as_deref() == Some("1") {
        eprintln!("TCMB_RECORD: wrote fixture to {}", path.display());
    }
    Ok(())
}
