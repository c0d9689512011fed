//! Core components of the `tcmb-rs` client.
//!
//! This module contains the foundational building blocks of the library, including:
//! - The main [`TcmbClient`] and its builder.
//! - The primary [`TcmbError`] type.
//! - URL assembly, response classification and date normalization.

/// The main client (`TcmbClient`), builder, and configuration.
pub mod client;
/// Date parsing and normalization to the EVDS `DD-MM-YYYY` form.
pub mod dates;
/// The primary error type (`TcmbError`) for the crate.
pub mod error;
/// Request URL assembly with EVDS's unencoded query strings.
pub mod query;
pub(crate) mod status;

#[cfg(feature = "dataframe")]
pub mod dataframe;

#[cfg(feature = "test-mode")]
pub(crate) mod fixtures;

pub(crate) mod net;

// convenient re-exports so most code can just `use crate::core::TcmbClient`
pub use client::{KeyPlacement, TcmbClient, TcmbClientBuilder, check_api_key};
pub use error::TcmbError;
