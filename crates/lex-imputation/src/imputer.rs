//! The imputer: fills missing values and outliers in selected columns.
//!
//! An [`Imputer`] owns a private copy of the caller's table. Every fill
//! operation mutates that copy and returns the whole table, so calls can be
//! chained and their effects accumulate.

use crate::config::ImputerConfig;
use crate::error::{ImputationError, Result, ResultExt};
use crate::method::{FillMethod, validate_multiplier};
use crate::outliers::OutlierBounds;
use crate::sampler::RdbrSampler;
use crate::stats::FillBasis;
use crate::types::{FillRecord, FillStrategy};
use crate::utils::{column_cells, is_missing, is_numeric_dtype, replace_cells};
use polars::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info, warn};

/// Fills missing values and outliers in a fixed set of numeric columns.
///
/// # Example
///
/// ```rust,ignore
/// use lex_imputation::{FillMethod, Imputer};
///
/// let mut imputer = Imputer::new(&df, ["age", "income"])?;
/// imputer.fill_missing(FillMethod::Median)?;
/// let cleaned = imputer.fill_outliers_iqr(FillMethod::Rdbr, 1.5)?.clone();
/// ```
#[derive(Debug)]
pub struct Imputer {
    data: DataFrame,
    columns: Vec<String>,
    config: ImputerConfig,
    rng: StdRng,
    history: Vec<FillRecord>,
}

impl Imputer {
    /// Create an imputer with the default configuration.
    pub fn new<I, S>(data: &DataFrame, columns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::with_config(data, columns, ImputerConfig::default())
    }

    /// Create an imputer with an explicit configuration.
    ///
    /// Every column must exist in `data` and have a numeric dtype.
    pub fn with_config<I, S>(data: &DataFrame, columns: I, config: ImputerConfig) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        config
            .validate()
            .map_err(|e| ImputationError::InvalidConfig(e.to_string()))?;

        let columns: Vec<String> = columns
            .into_iter()
            .map(|c| c.as_ref().to_string())
            .collect();

        for name in &columns {
            let column = data
                .column(name)
                .map_err(|_| ImputationError::ColumnNotFound(name.clone()))?;
            if !is_numeric_dtype(column.dtype()) {
                return Err(ImputationError::invalid_type(
                    "columns",
                    format!("numeric columns, but '{}' is {}", name, column.dtype()),
                ));
            }
        }

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        debug!(
            "Imputer created for {} column(s) over {} row(s)",
            columns.len(),
            data.height()
        );

        Ok(Self {
            data: data.clone(),
            columns,
            config,
            rng,
            history: Vec::new(),
        })
    }

    /// Create an imputer from a dynamic column list.
    ///
    /// `columns` must be a JSON array of strings; anything else is a type
    /// error.
    pub fn from_json_columns(
        data: &DataFrame,
        columns: &serde_json::Value,
        config: Option<ImputerConfig>,
    ) -> Result<Self> {
        let names = columns
            .as_array()
            .and_then(|items| items.iter().map(|v| v.as_str()).collect::<Option<Vec<_>>>())
            .ok_or_else(|| ImputationError::invalid_type("columns", "a list of column names"))?;

        Self::with_config(data, names, config.unwrap_or_default())
    }

    /// Fill null / NaN cells in every configured column.
    ///
    /// Mean, median, mode and RDBR are computed over the present values of
    /// each column.
    pub fn fill_missing(&mut self, method: FillMethod) -> Result<&DataFrame> {
        self.apply(FillStrategy::Missing, method, None)
    }

    /// Fill outliers detected with `[Q1 - k*IQR, Q3 + k*IQR]`.
    ///
    /// Fill statistics are computed over the in-bound values only.
    pub fn fill_outliers_iqr(&mut self, method: FillMethod, k: f64) -> Result<&DataFrame> {
        let method = method.ensure_outlier_method()?;
        let k = validate_multiplier(k)?;
        self.apply(FillStrategy::OutlierIqr, method, Some(k))
    }

    /// Fill outliers detected with `[mean - k*std, mean + k*std]`.
    pub fn fill_outliers_sigma(&mut self, method: FillMethod, k: f64) -> Result<&DataFrame> {
        let method = method.ensure_outlier_method()?;
        let k = validate_multiplier(k)?;
        self.apply(FillStrategy::OutlierSigma, method, Some(k))
    }

    /// [`fill_missing`](Self::fill_missing) with the configured default method.
    pub fn fill_missing_default(&mut self) -> Result<&DataFrame> {
        self.fill_missing(self.config.default_method)
    }

    /// [`fill_outliers_iqr`](Self::fill_outliers_iqr) with the configured defaults.
    pub fn fill_outliers_iqr_default(&mut self) -> Result<&DataFrame> {
        self.fill_outliers_iqr(self.config.default_method, self.config.iqr_multiplier)
    }

    /// [`fill_outliers_sigma`](Self::fill_outliers_sigma) with the configured defaults.
    pub fn fill_outliers_sigma_default(&mut self) -> Result<&DataFrame> {
        self.fill_outliers_sigma(self.config.default_method, self.config.sigma_multiplier)
    }

    /// The current state of the table.
    pub fn data(&self) -> &DataFrame {
        &self.data
    }

    /// Consume the imputer and return the table.
    pub fn into_data(self) -> DataFrame {
        self.data
    }

    /// Target columns, in the order they are processed.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Configuration this imputer was built with.
    pub fn config(&self) -> &ImputerConfig {
        &self.config
    }

    /// Records of every successful fill, oldest first.
    pub fn history(&self) -> &[FillRecord] {
        &self.history
    }

    /// Plan every column, then commit. A failing column leaves the table as
    /// it was.
    fn apply(
        &mut self,
        strategy: FillStrategy,
        method: FillMethod,
        k: Option<f64>,
    ) -> Result<&DataFrame> {
        info!(
            "Filling {} in {} column(s) with {}",
            strategy.display_name(),
            self.columns.len(),
            method
        );

        let mut pending: Vec<(String, Vec<Option<f64>>)> = Vec::with_capacity(self.columns.len());
        let mut records = Vec::with_capacity(self.columns.len());

        for column in &self.columns {
            // A column listed twice sees its own earlier result.
            let mut cells = match pending.iter().rev().find(|(name, _)| name == column) {
                Some((_, cells)) => cells.clone(),
                None => column_cells(&self.data, column)?,
            };

            let record = fill_column(column, &mut cells, strategy, method, k, &mut self.rng)
                .context(format!("While filling {}", strategy.display_name()))?;
            debug!("{}", record.describe());

            if record.filled > 0 {
                pending.push((column.clone(), cells));
            }
            records.push(record);
        }

        for (column, cells) in pending {
            replace_cells(&mut self.data, &column, cells)?;
        }
        self.history.extend(records);

        Ok(&self.data)
    }
}

/// Fill the targeted cells of one column in place and describe what was done.
fn fill_column(
    column: &str,
    cells: &mut [Option<f64>],
    strategy: FillStrategy,
    method: FillMethod,
    k: Option<f64>,
    rng: &mut StdRng,
) -> Result<FillRecord> {
    let series = Series::new(column.into(), &*cells);
    let present: Vec<bool> = cells.iter().map(|cell| !is_missing(*cell)).collect();
    let present_basis = FillBasis::filter(&series, &present)?;

    let (targets, bounds, basis) = match strategy {
        FillStrategy::Missing => {
            let targets: Vec<bool> = present.iter().map(|p| !p).collect();
            (targets, None, present_basis)
        }
        FillStrategy::OutlierIqr | FillStrategy::OutlierSigma => {
            let k = k.unwrap_or_default();
            let bounds = if strategy == FillStrategy::OutlierIqr {
                OutlierBounds::iqr(&present_basis, k)?
            } else {
                OutlierBounds::sigma(&present_basis, k)
            };
            match bounds {
                Some(bounds) => {
                    let outliers = bounds.mask(cells);
                    let keep: Vec<bool> = present
                        .iter()
                        .zip(&outliers)
                        .map(|(present, outlier)| *present && !outlier)
                        .collect();
                    let basis = FillBasis::filter(&series, &keep)?;
                    (outliers, Some(bounds), basis)
                }
                None => (vec![false; cells.len()], None, present_basis),
            }
        }
    };

    let filled = targets.iter().filter(|t| **t).count();
    let mut record = FillRecord {
        strategy,
        column: column.to_string(),
        method,
        filled,
        fill_value: None,
        bounds,
    };

    if filled == 0 {
        return Ok(record);
    }

    if basis.is_empty() && !matches!(method, FillMethod::Constant(_)) {
        warn!(
            "Column '{}' has {} cell(s) to fill but no valid values to derive {} from",
            column, filled, method
        );
        return Err(ImputationError::NoValidValues(column.to_string()));
    }

    let no_values = || ImputationError::NoValidValues(column.to_string());
    let replacements = match method {
        FillMethod::Constant(value) => vec![value; filled],
        FillMethod::Mean => vec![basis.mean().ok_or_else(no_values)?; filled],
        FillMethod::Median => vec![basis.median().ok_or_else(no_values)?; filled],
        FillMethod::Mode => vec![basis.mode()?.ok_or_else(no_values)?; filled],
        FillMethod::Rdbr => RdbrSampler::from_basis(&basis, column)?.draw_n(rng, filled),
    };

    if method != FillMethod::Rdbr {
        record.fill_value = replacements.first().copied();
    }

    let slots = cells
        .iter_mut()
        .zip(&targets)
        .filter_map(|(cell, target)| target.then_some(cell));
    for (cell, value) in slots.zip(replacements) {
        *cell = Some(value);
    }

    Ok(record)
}
