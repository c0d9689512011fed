//! Category, data group and series metadata.
//!
//! These endpoints answer with plain JSON (a single object or a list), which is decoded
//! directly rather than converted into a [`SeriesFrame`](crate::SeriesFrame).

mod api;
mod model;

pub use model::{Category, DataGroup, DatagroupMode, OneOrMany, SeriesMeta};
