//! Missing Value and Outlier Imputation
//!
//! Fills missing cells and statistical outliers in numeric columns of a Polars
//! `DataFrame`.
//!
//! # Overview
//!
//! An [`Imputer`] takes a private copy of a table and a list of target
//! columns, then exposes three operations:
//!
//! - **Missing values**: [`Imputer::fill_missing`] replaces null / NaN cells
//! - **IQR outliers**: [`Imputer::fill_outliers_iqr`] replaces cells outside
//!   `[Q1 - k*IQR, Q3 + k*IQR]`
//! - **Sigma outliers**: [`Imputer::fill_outliers_sigma`] replaces cells outside
//!   `mean ± k*std`
//!
//! Each operation takes a [`FillMethod`]: a constant, the mean, the median,
//! the mode (missing values only) or **RDBR**. RDBR draws each replacement from
//! the valid values of the column, weighted by how often each value occurs.
//!
//! Every call mutates the imputer's copy and returns the whole table, so calls
//! can be chained and their effects accumulate.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use lex_imputation::{FillMethod, Imputer, ImputerConfig};
//! use polars::prelude::*;
//!
//! let df = df![
//!     "age" => [Some(21.0), None, Some(35.0), Some(29.0), Some(240.0)],
//! ]?;
//!
//! let config = ImputerConfig::builder().seed(42).build()?;
//! let mut imputer = Imputer::with_config(&df, ["age"], config)?;
//!
//! imputer.fill_missing(FillMethod::Median)?;
//! imputer.fill_outliers_iqr("rdbr".parse()?, 1.5)?;
//!
//! for record in imputer.history() {
//!     println!("{}", record.describe());
//! }
//! let cleaned = imputer.into_data();
//! ```

pub mod config;
pub mod error;
pub mod imputer;
pub mod method;
pub mod outliers;
pub mod sampler;
pub mod stats;
pub mod types;
pub mod utils;

// Re-exports for convenient access
pub use config::{ConfigValidationError, ImputerConfig, ImputerConfigBuilder};
pub use error::{ImputationError, Result as ImputationResult, ResultExt};
pub use imputer::Imputer;
pub use method::{FillMethod, parse_multiplier};
pub use outliers::{OutlierBounds, OutlierRule};
pub use sampler::RdbrSampler;
pub use stats::{FillBasis, FrequencyTable};
pub use types::{FillRecord, FillStrategy};
