use polars::prelude::*;

use crate::series::SeriesFrame;

/// Days between 0001-01-01 (CE day 1) and the Unix epoch.
const UNIX_EPOCH_CE_DAYS: i32 = 719_163;

/// Trait for converting series data into Polars DataFrames.
pub trait ToDataFrame {
    /// Converts the object into a Polars DataFrame.
    fn to_dataframe(&self) -> PolarsResult<DataFrame>;
}

impl ToDataFrame for SeriesFrame {
    /// A `Date` column named after the index field (or `date`), then one `Float64` column per
    /// series. Missing values stay `NaN`.
    fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        use chrono::Datelike;

        let index_name = if self.index_name.is_empty() {
            "date"
        } else {
            self.index_name.as_str()
        };
        let days: Vec<i32> = self
            .index
            .iter()
            .map(|d| d.num_days_from_ce() - UNIX_EPOCH_CE_DAYS)
            .collect();

        let mut columns = Vec::with_capacity(self.columns.len() + 1);
        columns.push(Column::new(index_name.into(), days).cast(&DataType::Date)?);
        for col in &self.columns {
            columns.push(Column::new(col.name.as_str().into(), col.values.clone()));
        }
        DataFrame::new(columns)
    }
}
