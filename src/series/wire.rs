use serde::Deserialize;
use serde_json::{Map, Value};

/// Envelope of a series read: rows live under `items`.
#[derive(Deserialize)]
pub(crate) struct ItemsEnvelope {
    #[allow(dead_code)]
    #[serde(rename = "totalCount", default)]
    pub(crate) total_count: Option<Value>,
    pub(crate) items: Option<Vec<Map<String, Value>>>,
}
