use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A metadata payload that EVDS returns either as a single object or as a list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    /// A list of records.
    Many(Vec<T>),
    /// A lone record.
    Single(T),
}

impl<T> OneOrMany<T> {
    /// Flattens into a list, wrapping a lone record.
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Self::Many(v) => v,
            Self::Single(t) => vec![t],
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        match self {
            Self::Many(v) => v.len(),
            Self::Single(_) => 1,
        }
    }

    /// `true` for an empty list.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Filter for the data group listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DatagroupMode {
    /// All data groups of all categories.
    #[default]
    All,
    /// One data group, selected by data group code (e.g. `bie_yssk`).
    Datagroup,
    /// All data groups of one category, selected by category id (e.g. `2`).
    Category,
}

impl DatagroupMode {
    /// Numeric mode sent on the wire.
    pub const fn code(self) -> u8 {
        match self {
            Self::All => 0,
            Self::Datagroup => 1,
            Self::Category => 2,
        }
    }

    pub(crate) const fn needs_code(self) -> bool {
        !matches!(self, Self::All)
    }
}

/// One entry of the category listing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct Category {
    #[serde(default, deserialize_with = "de_opt_lenient_string")]
    pub category_id: Option<String>,
    #[serde(default, deserialize_with = "de_opt_lenient_string")]
    pub topic_title_tr: Option<String>,
    #[serde(default, deserialize_with = "de_opt_lenient_string")]
    pub topic_title_eng: Option<String>,
    /// Fields not modelled above.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// One entry of the data group listing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct DataGroup {
    #[serde(default, deserialize_with = "de_opt_lenient_string")]
    pub datagroup_code: Option<String>,
    #[serde(default, deserialize_with = "de_opt_lenient_string")]
    pub category_id: Option<String>,
    #[serde(default, deserialize_with = "de_opt_lenient_string")]
    pub datagroup_name: Option<String>,
    #[serde(default, deserialize_with = "de_opt_lenient_string")]
    pub datagroup_name_eng: Option<String>,
    #[serde(default, deserialize_with = "de_opt_lenient_string")]
    pub frequency_str: Option<String>,
    #[serde(default, deserialize_with = "de_opt_lenient_string")]
    pub frequency: Option<String>,
    #[serde(default, deserialize_with = "de_opt_lenient_string")]
    pub datasource: Option<String>,
    #[serde(default, deserialize_with = "de_opt_lenient_string")]
    pub datasource_eng: Option<String>,
    #[serde(default, deserialize_with = "de_opt_lenient_string")]
    pub start_date: Option<String>,
    #[serde(default, deserialize_with = "de_opt_lenient_string")]
    pub end_date: Option<String>,
    /// Links and other fields not modelled above.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Metadata of a single series.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct SeriesMeta {
    #[serde(default, deserialize_with = "de_opt_lenient_string")]
    pub serie_code: Option<String>,
    #[serde(default, deserialize_with = "de_opt_lenient_string")]
    pub datagroup_code: Option<String>,
    #[serde(default, deserialize_with = "de_opt_lenient_string")]
    pub serie_name: Option<String>,
    #[serde(default, deserialize_with = "de_opt_lenient_string")]
    pub serie_name_eng: Option<String>,
    #[serde(default, deserialize_with = "de_opt_lenient_string")]
    pub frequency_str: Option<String>,
    #[serde(default, deserialize_with = "de_opt_lenient_string")]
    pub default_agg_method_str: Option<String>,
    #[serde(default, deserialize_with = "de_opt_lenient_string")]
    pub default_agg_method: Option<String>,
    #[serde(default, deserialize_with = "de_opt_lenient_string")]
    pub tag: Option<String>,
    #[serde(default, deserialize_with = "de_opt_lenient_string")]
    pub tag_eng: Option<String>,
    #[serde(default, deserialize_with = "de_opt_lenient_string")]
    pub datasource: Option<String>,
    #[serde(default, deserialize_with = "de_opt_lenient_string")]
    pub datasource_eng: Option<String>,
    #[serde(default, deserialize_with = "de_opt_lenient_string")]
    pub start_date: Option<String>,
    #[serde(default, deserialize_with = "de_opt_lenient_string")]
    pub end_date: Option<String>,
    /// Links and other fields not modelled above.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Accepts strings, numbers and booleans (rendered as text) or null/missing.
fn de_opt_lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(other) => Err(D::Error::custom(format!(
            "expected a scalar metadata field, got {other}"
        ))),
    }
}
