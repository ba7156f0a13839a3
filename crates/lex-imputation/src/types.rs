use crate::method::FillMethod;
use crate::outliers::OutlierBounds;
use serde::{Deserialize, Serialize};

/// Which cells a fill operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FillStrategy {
    /// Null / NaN cells.
    Missing,
    /// Cells outside the interquartile range fences.
    OutlierIqr,
    /// Cells outside `mean ± k*std`.
    OutlierSigma,
}

impl FillStrategy {
    /// Get a human-readable display name for the strategy.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Missing => "Missing Values",
            Self::OutlierIqr => "Outliers (IQR)",
            Self::OutlierSigma => "Outliers (Sigma)",
        }
    }
}

/// What one fill operation did to one column.
///
/// The imputer keeps these as an audit trail, see
/// [`Imputer::history`](crate::Imputer::history).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FillRecord {
    pub strategy: FillStrategy,
    pub column: String,
    pub method: FillMethod,
    /// Number of cells that received a new value.
    pub filled: usize,
    /// The scalar written to every filled cell. `None` for RDBR or when
    /// nothing was filled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill_value: Option<f64>,
    /// Detection bounds for outlier strategies.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bounds: Option<OutlierBounds>,
}

impl FillRecord {
    /// One-line description for logs and reports.
    pub fn describe(&self) -> String {
        let mut description = format!(
            "{}: filled {} cell(s) in '{}' with {}",
            self.strategy.display_name(),
            self.filled,
            self.column,
            self.method.name()
        );
        if let Some(value) = self.fill_value {
            description.push_str(&format!(" ({value:.2})"));
        }
        if let Some(bounds) = &self.bounds {
            description.push_str(&format!(
                ", bounds [{:.2}, {:.2}]",
                bounds.lower, bounds.upper
            ));
        }
        description
    }
}
