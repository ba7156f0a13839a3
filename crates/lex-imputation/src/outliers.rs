//! Outlier detection bounds.
//!
//! Bounds are computed over the present values of a column only. Missing
//! cells are never reported as outliers.

use crate::error::Result;
use crate::stats::FillBasis;
use serde::{Deserialize, Serialize};

/// Which rule produced a set of bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutlierRule {
    /// `[Q1 - k*IQR, Q3 + k*IQR]`
    Iqr,
    /// `[mean - k*std, mean + k*std]`
    Sigma,
}

/// Closed interval of accepted values; anything strictly outside is an outlier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OutlierBounds {
    pub rule: OutlierRule,
    pub lower: f64,
    pub upper: f64,
}

impl OutlierBounds {
    /// Interquartile range fences. `None` when there are no values.
    pub fn iqr(basis: &FillBasis, k: f64) -> Result<Option<Self>> {
        let Some((q1, q3)) = basis.quartiles()? else {
            return Ok(None);
        };
        // Equal infinite quartiles have no spread, not a NaN one.
        let spread = if q1 == q3 { 0.0 } else { q3 - q1 };
        let width = k * spread;
        Ok(Some(Self {
            rule: OutlierRule::Iqr,
            lower: q1 - width,
            upper: q3 + width,
        }))
    }

    /// Sigma-rule fences. `None` with fewer than two values.
    pub fn sigma(basis: &FillBasis, k: f64) -> Option<Self> {
        let mean = basis.mean()?;
        let width = k * basis.sample_std()?;
        Some(Self {
            rule: OutlierRule::Sigma,
            lower: mean - width,
            upper: mean + width,
        })
    }

    /// Whether a present value falls strictly outside the bounds.
    #[inline]
    pub fn is_outlier(&self, value: f64) -> bool {
        value < self.lower || value > self.upper
    }

    /// Outlier flag for every cell. Missing cells (null or NaN) are `false`.
    pub fn mask(&self, cells: &[Option<f64>]) -> Vec<bool> {
        cells
            .iter()
            .map(|cell| matches!(cell, Some(v) if !v.is_nan() && self.is_outlier(*v)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;

    fn basis(values: &[f64]) -> FillBasis {
        let series = Series::new("v".into(), values);
        FillBasis::filter(&series, &vec![true; values.len()]).unwrap()
    }

    fn iqr(values: &[f64], k: f64) -> Option<OutlierBounds> {
        OutlierBounds::iqr(&basis(values), k).unwrap()
    }

    // ==================== IQR ====================

    #[test]
    fn test_iqr_bounds_known_values() {
        // Q1 = 2, Q3 = 4, width = 1.5 * 2 = 3
        let bounds = iqr(&[1.0, 2.0, 3.0, 4.0, 100.0], 1.5).unwrap();
        assert_eq!(bounds.rule, OutlierRule::Iqr);
        assert_eq!(bounds.lower, -1.0);
        assert_eq!(bounds.upper, 7.0);

        assert!(bounds.is_outlier(100.0));
        for v in [1.0, 2.0, 3.0, 4.0] {
            assert!(!bounds.is_outlier(v));
        }
    }

    #[test]
    fn test_iqr_zero_spread() {
        let bounds = iqr(&[5.0, 5.0, 5.0, 5.0], 1.5).unwrap();
        assert_eq!((bounds.lower, bounds.upper), (5.0, 5.0));
        assert!(!bounds.is_outlier(5.0));
        assert!(bounds.is_outlier(5.1));
    }

    #[test]
    fn test_iqr_empty() {
        assert!(iqr(&[], 1.5).is_none());
    }

    #[test]
    fn test_iqr_equal_infinite_quartiles() {
        let inf = f64::INFINITY;
        let bounds = iqr(&[1.0, inf, inf, inf, inf], 1.5).unwrap();
        assert_eq!((bounds.lower, bounds.upper), (inf, inf));
        assert!(bounds.is_outlier(1.0));
        assert!(!bounds.is_outlier(inf));
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let bounds = iqr(&[1.0, 2.0, 3.0, 4.0, 100.0], 1.5).unwrap();
        assert!(!bounds.is_outlier(-1.0));
        assert!(!bounds.is_outlier(7.0));
        assert!(bounds.is_outlier(7.000001));
    }

    // ==================== sigma ====================

    #[test]
    fn test_sigma_bounds_known_values() {
        // Mean = 5, std = sqrt(32/7) ~ 2.138
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let bounds = OutlierBounds::sigma(&basis(&values), 1.0).unwrap();
        let std = (32.0f64 / 7.0).sqrt();

        assert_eq!(bounds.rule, OutlierRule::Sigma);
        assert!((bounds.lower - (5.0 - std)).abs() < 1e-12);
        assert!((bounds.upper - (5.0 + std)).abs() < 1e-12);

        assert!(bounds.is_outlier(2.0));
        assert!(bounds.is_outlier(9.0));
        for v in [4.0, 5.0, 7.0] {
            assert!(!bounds.is_outlier(v));
        }
    }

    #[test]
    fn test_sigma_single_value() {
        assert!(OutlierBounds::sigma(&basis(&[1.0]), 3.0).is_none());
    }

    // ==================== mask ====================

    #[test]
    fn test_mask_skips_missing() {
        let bounds = iqr(&[1.0, 2.0, 3.0, 4.0, 100.0], 1.5).unwrap();
        let cells = [Some(1.0), None, Some(100.0), Some(f64::NAN), Some(-50.0)];
        assert_eq!(bounds.mask(&cells), vec![false, false, true, false, true]);
    }
}
