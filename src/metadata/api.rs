use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::core::query::{Endpoint, QueryParams};
use crate::core::{TcmbClient, TcmbError};
use crate::metadata::model::{Category, DataGroup, DatagroupMode, OneOrMany, SeriesMeta};

fn decode<T: DeserializeOwned>(value: Value, what: &str) -> Result<T, TcmbError> {
    serde_json::from_value(value)
        .map_err(|e| TcmbError::Data(format!("{what} metadata parse error: {e}")))
}

fn is_empty_payload(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
        _ => false,
    }
}

impl TcmbClient {
    fn json_params(&self) -> QueryParams {
        QueryParams::new()
            .with("type", Some("json"))
            .with("key", self.key_param())
    }

    /// Fetches the metadata of all categories.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be parsed.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err))]
    pub async fn categories_metadata(&self) -> Result<Vec<Category>, TcmbError> {
        let params = self.json_params();
        let body = self
            .get_body(Some(Endpoint::Categories), &params, &[], "all")
            .await?;
        let value: Value = serde_json::from_str(&body)?;
        Ok(decode::<OneOrMany<Category>>(value, "category")?.into_vec())
    }

    /// Fetches data group metadata.
    ///
    /// `code` is a data group code for [`DatagroupMode::Datagroup`] and a category id for
    /// [`DatagroupMode::Category`]; it is ignored for [`DatagroupMode::All`].
    ///
    /// # Errors
    ///
    /// [`TcmbError::ArgumentValidation`] if the mode needs a code and none was given,
    /// [`TcmbError::EmptyMetadataResponse`] if the service returned no rows.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err))]
    pub async fn datagroups_metadata(
        &self,
        mode: DatagroupMode,
        code: Option<&str>,
    ) -> Result<OneOrMany<DataGroup>, TcmbError> {
        if mode.needs_code() && code.is_none() {
            return Err(TcmbError::ArgumentValidation(
                "if mode=1 or mode=2, a `code` must be passed".into(),
            ));
        }

        let params = QueryParams::new()
            .with("mode", Some(mode.code()))
            .with("code", code)
            .with("type", Some("json"))
            .with("key", self.key_param());

        let body = self
            .get_body(
                Some(Endpoint::Datagroups),
                &params,
                &[],
                code.unwrap_or("all"),
            )
            .await?;
        let value: Value = serde_json::from_str(&body)?;
        if is_empty_payload(&value) {
            return Err(TcmbError::EmptyMetadataResponse { body });
        }
        decode(value, "data group")
    }

    /// Fetches the metadata of one series, or of every series in a data group.
    ///
    /// # Errors
    ///
    /// [`TcmbError::ArgumentValidation`] if neither `series` nor `datagroup` is given.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err))]
    pub async fn series_metadata(
        &self,
        series: Option<&str>,
        datagroup: Option<&str>,
    ) -> Result<OneOrMany<SeriesMeta>, TcmbError> {
        let code = series.or(datagroup).ok_or_else(|| {
            TcmbError::ArgumentValidation(
                "one of `series` or `datagroup` must be passed".into(),
            )
        })?;

        let params = QueryParams::new()
            .with("code", Some(code))
            .with("type", Some("json"))
            .with("key", self.key_param());

        let body = self
            .get_body(Some(Endpoint::SerieList), &params, &[], code)
            .await?;
        let value: Value = serde_json::from_str(&body)?;
        decode(value, "series")
    }

    /// Category listing, fetched on first use and memoized for the life of the client.
    ///
    /// # Errors
    ///
    /// Errors of the first fetch are returned and nothing is cached; the next call retries.
    pub async fn categories(&self) -> Result<&[Category], TcmbError> {
        self.categories_cell()
            .get_or_try_init(|| self.categories_metadata())
            .await
            .map(Vec::as_slice)
    }

    /// Listing of all data groups, fetched on first use and memoized for the life of the client.
    ///
    /// # Errors
    ///
    /// Errors of the first fetch are returned and nothing is cached; the next call retries.
    pub async fn datagroups(&self) -> Result<&[DataGroup], TcmbError> {
        self.datagroups_cell()
            .get_or_try_init(|| async {
                self.datagroups_metadata(DatagroupMode::All, None)
                    .await
                    .map(OneOrMany::into_vec)
            })
            .await
            .map(Vec::as_slice)
    }
}
