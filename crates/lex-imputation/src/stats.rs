//! Statistics used to derive fill values.
//!
//! A [`FillBasis`] holds the cells of a column that may be used to compute
//! replacements (present, and not outliers when filling outliers). All
//! statistics are delegated to polars and return `None` for an empty basis.

use crate::error::Result;
use polars::prelude::*;

/// The valid cells of one column, as a `Float64` chunked array.
#[derive(Debug, Clone)]
pub struct FillBasis {
    values: Float64Chunked,
}

impl FillBasis {
    /// Keep the cells of `series` whose flag in `keep` is set.
    pub fn filter(series: &Series, keep: &[bool]) -> Result<Self> {
        let mask = BooleanChunked::from_slice("keep".into(), keep);
        let filtered = series.cast(&DataType::Float64)?.filter(&mask)?;
        Ok(Self {
            values: filtered.f64()?.clone(),
        })
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Arithmetic mean.
    pub fn mean(&self) -> Option<f64> {
        self.values.mean()
    }

    /// Median (the 0.5 linear quantile).
    pub fn median(&self) -> Option<f64> {
        self.values.median()
    }

    /// Sample standard deviation (ddof = 1). Needs at least two values.
    pub fn sample_std(&self) -> Option<f64> {
        if self.values.len() < 2 {
            return None;
        }
        self.values.std(1)
    }

    /// Quantile with linear interpolation between the closest ranks.
    pub fn quantile(&self, q: f64) -> Result<Option<f64>> {
        Ok(self.values.quantile(q, QuantileMethod::Linear)?)
    }

    /// First and third quartiles.
    pub fn quartiles(&self) -> Result<Option<(f64, f64)>> {
        Ok(self.quantile(0.25)?.zip(self.quantile(0.75)?))
    }

    /// Most frequent value. Ties go to the smallest value.
    pub fn mode(&self) -> Result<Option<f64>> {
        let Some(table) = self.frequency_table()? else {
            return Ok(None);
        };
        let top = table.ratios.iter().copied().fold(f64::MIN, f64::max);
        Ok(table
            .values
            .iter()
            .zip(&table.ratios)
            .find(|(_, ratio)| **ratio == top)
            .map(|(value, _)| *value))
    }

    /// Normalized value counts. `None` for an empty basis.
    pub fn frequency_table(&self) -> Result<Option<FrequencyTable>> {
        if self.is_empty() {
            return Ok(None);
        }

        let series = self.values.clone().into_series();
        let counts = series.value_counts(false, false, "proportion".into(), true)?;
        let values_col = counts.column(series.name())?.cast(&DataType::Float64)?;
        let ratios_col = counts.column("proportion")?.cast(&DataType::Float64)?;

        let mut pairs: Vec<(f64, f64)> = values_col
            .f64()?
            .into_iter()
            .zip(ratios_col.f64()?)
            .filter_map(|(value, ratio)| value.zip(ratio))
            .collect();
        pairs.sort_by(|a, b| a.0.total_cmp(&b.0));

        let (values, ratios) = pairs.into_iter().unzip();
        Ok(Some(FrequencyTable { values, ratios }))
    }
}

/// Normalized frequency of each distinct value, in ascending value order.
#[derive(Debug, Clone, PartialEq)]
pub struct FrequencyTable {
    values: Vec<f64>,
    ratios: Vec<f64>,
}

impl FrequencyTable {
    /// Distinct values in ascending order.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Probability of each value, aligned with [`values`](Self::values).
    pub fn ratios(&self) -> &[f64] {
        &self.ratios
    }
}
