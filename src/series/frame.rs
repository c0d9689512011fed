use std::collections::BTreeMap;
use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::core::TcmbError;
use crate::metadata::{OneOrMany, SeriesMeta};

/// Field carrying the epoch timestamp of each row; never part of the table.
const UNIXTIME_FIELD: &str = "UNIXTIME";

/// Shape of the period labels in the first column of a series response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum IndexFormat {
    /// `DD-MM-YYYY`.
    DayMonthYear,
    /// `MM-YYYY`, mapped to the first day of the month.
    MonthYear,
    /// `YYYY-MM`, mapped to the first day of the month.
    YearMonth,
    /// `YYYY`, mapped to January 1st.
    Year,
}

struct IndexPattern {
    format: IndexFormat,
    detect: Regex,
    parse: Regex,
}

fn index_patterns() -> &'static [IndexPattern; 4] {
    static PATTERNS: OnceLock<[IndexPattern; 4]> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        let re = |p: &str| Regex::new(p).expect("static regex");
        [
            IndexPattern {
                format: IndexFormat::DayMonthYear,
                detect: re(r"^\d+-\d+-\d{4}"),
                parse: re(r"^(?<d>\d{1,2})-(?<m>\d{1,2})-(?<y>\d{4})$"),
            },
            IndexPattern {
                format: IndexFormat::MonthYear,
                detect: re(r"^\d+-\d{4}"),
                parse: re(r"^(?<m>\d{1,2})-(?<y>\d{4})$"),
            },
            IndexPattern {
                format: IndexFormat::YearMonth,
                detect: re(r"^\d{4}-\d+"),
                parse: re(r"^(?<y>\d{4})-(?<m>\d{1,2})$"),
            },
            IndexPattern {
                format: IndexFormat::Year,
                detect: re(r"^\d{4}"),
                parse: re(r"^(?<y>\d{4})$"),
            },
        ]
    })
}

fn parse_index_value(pattern: &IndexPattern, raw: &str) -> Result<NaiveDate, TcmbError> {
    let bad = || {
        TcmbError::Data(format!(
            "index value {raw:?} does not match detected format {:?}",
            pattern.format
        ))
    };
    let caps = pattern.parse.captures(raw).ok_or_else(bad)?;
    let num = |name: &str| -> Option<u32> {
        caps.name(name)
            .map_or(Some(1), |m| m.as_str().parse().ok())
    };

    let year = caps
        .name("y")
        .and_then(|m| m.as_str().parse::<i32>().ok())
        .ok_or_else(bad)?;
    let month = num("m").ok_or_else(bad)?;
    let day = num("d").ok_or_else(bad)?;

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(bad)
}

/// A table of series values indexed by period.
///
/// One `f64` column per requested series, named as the service names the fields (EVDS
/// replaces the dots of series codes with underscores). Missing values are `NaN`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SeriesFrame {
    /// Row labels, parsed from the first field of each record.
    pub index: Vec<NaiveDate>,
    /// Shape the row labels were detected in; `None` for an empty frame.
    pub granularity: Option<IndexFormat>,
    /// Name of the field promoted to the index (`Tarih` on EVDS).
    pub index_name: String,
    /// Value columns, in response order.
    pub columns: Vec<SeriesColumn>,
    /// Out-of-band annotations: series code to its metadata, filled when requested.
    pub attrs: BTreeMap<String, OneOrMany<SeriesMeta>>,
}

/// A single named column of a [`SeriesFrame`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesColumn {
    /// Field name from the response, e.g. `TP_DK_USD_A_YTL`.
    pub name: String,
    /// One value per index row; `NaN` where missing.
    pub values: Vec<f64>,
}

impl SeriesFrame {
    /// Number of rows.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Values of the column called `name`.
    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.values.as_slice())
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    /// Iterates rows as `(date, values in column order)`.
    pub fn rows(&self) -> impl Iterator<Item = (NaiveDate, Vec<f64>)> + '_ {
        self.index.iter().enumerate().map(|(i, d)| {
            (
                *d,
                self.columns.iter().map(|c| c.values[i]).collect::<Vec<_>>(),
            )
        })
    }
}

fn field_order(records: &[Map<String, Value>]) -> Vec<&str> {
    let mut fields: Vec<&str> = Vec::new();
    for rec in records {
        for k in rec.keys() {
            if k != UNIXTIME_FIELD && !fields.contains(&k.as_str()) {
                fields.push(k);
            }
        }
    }
    fields
}

fn index_label(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn cell_to_f64(value: Option<&Value>, decimal_separator: &str, column: &str) -> Result<f64, TcmbError> {
    let bad = |v: &dyn std::fmt::Display| {
        TcmbError::Data(format!("non-numeric value {v} in column {column}"))
    };
    match value {
        None | Some(Value::Null) => Ok(f64::NAN),
        Some(Value::Number(n)) => n.as_f64().ok_or_else(|| bad(n)),
        Some(Value::String(s)) => {
            let t = s.trim();
            let parsed = if decimal_separator.is_empty() || decimal_separator == "." {
                t.parse::<f64>()
            } else {
                t.replace(decimal_separator, ".").parse::<f64>()
            };
            parsed.map_err(|_| bad(&format!("{s:?}")))
        }
        Some(other) => Err(bad(other)),
    }
}

/// Converts the `items` records of a series response into a [`SeriesFrame`].
///
/// Drops `UNIXTIME`, promotes the first remaining field to the index (format detected from
/// the first row), maps nulls to `NaN`, coerces every other field to `f64` and drops rows
/// where all values are missing. `decimal_separator` is the separator the values were
/// requested with.
///
/// # Errors
///
/// [`TcmbError::Data`] for an unrecognized or inconsistent index, or a non-numeric value.
pub fn to_frame(
    records: &[Map<String, Value>],
    decimal_separator: &str,
) -> Result<SeriesFrame, TcmbError> {
    if records.is_empty() {
        return Ok(SeriesFrame::default());
    }

    let fields = field_order(records);
    let (index_name, value_fields) = fields
        .split_first()
        .ok_or_else(|| TcmbError::Data("series records have no fields".into()))?;

    let labels = records
        .iter()
        .map(|r| {
            index_label(r.get(*index_name))
                .ok_or_else(|| TcmbError::Data(format!("missing index value in field {index_name}")))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let pattern = index_patterns()
        .iter()
        .find(|p| p.detect.is_match(&labels[0]))
        .ok_or_else(|| TcmbError::Data(format!("unrecognized index format {:?}", labels[0])))?;

    let index = labels
        .iter()
        .map(|l| parse_index_value(pattern, l))
        .collect::<Result<Vec<_>, _>>()?;

    let mut columns = value_fields
        .iter()
        .map(|name| {
            let values = records
                .iter()
                .map(|r| cell_to_f64(r.get(*name), decimal_separator, name))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(SeriesColumn {
                name: (*name).to_string(),
                values,
            })
        })
        .collect::<Result<Vec<_>, TcmbError>>()?;

    let keep: Vec<bool> = (0..index.len())
        .map(|i| columns.iter().any(|c| !c.values[i].is_nan()))
        .collect();

    let index = index
        .into_iter()
        .zip(&keep)
        .filter_map(|(d, k)| k.then_some(d))
        .collect();
    for col in &mut columns {
        col.values = col
            .values
            .iter()
            .zip(&keep)
            .filter_map(|(v, k)| k.then_some(*v))
            .collect();
    }

    Ok(SeriesFrame {
        index,
        granularity: Some(pattern.format),
        index_name: (*index_name).to_string(),
        columns,
        attrs: BTreeMap::new(),
    })
}
