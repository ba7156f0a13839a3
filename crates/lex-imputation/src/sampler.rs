//! RDBR (Random Distribution By Ratio) sampling.
//!
//! Every replacement is drawn independently, with replacement, from the
//! distinct values of the fill basis. Each value is weighted by its observed
//! frequency, so filled cells follow the empirical distribution of the
//! valid cells.

use crate::error::{ImputationError, Result};
use crate::stats::{FillBasis, FrequencyTable};
use rand::Rng;
use rand::distributions::{Distribution, WeightedIndex};

/// Weighted discrete sampler over a column's frequency table.
#[derive(Debug, Clone)]
pub struct RdbrSampler {
    values: Vec<f64>,
    index: WeightedIndex<f64>,
}

impl RdbrSampler {
    /// Build a sampler from a non-empty frequency table.
    pub fn new(table: &FrequencyTable, column: &str) -> Result<Self> {
        let index = WeightedIndex::new(table.ratios()).map_err(|e| {
            ImputationError::NoValidValues(column.to_string())
                .with_context(format!("Cannot build RDBR weights: {e}"))
        })?;
        Ok(Self {
            values: table.values().to_vec(),
            index,
        })
    }

    /// Build a sampler straight from a fill basis.
    pub fn from_basis(basis: &FillBasis, column: &str) -> Result<Self> {
        let table = basis
            .frequency_table()?
            .ok_or_else(|| ImputationError::NoValidValues(column.to_string()))?;
        Self::new(&table, column)
    }

    /// Draw a single value.
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.values[self.index.sample(rng)]
    }

    /// Draw `n` values, one per cell to fill.
    pub fn draw_n<R: Rng + ?Sized>(&self, rng: &mut R, n: usize) -> Vec<f64> {
        (0..n).map(|_| self.draw(rng)).collect()
    }
}
