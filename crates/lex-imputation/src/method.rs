//! Fill methods and argument parsing.
//!
//! Callers may pass a fill method either as a typed [`FillMethod`], as a
//! string token (`"mean"`, `"median"`, `"mode"`, `"rdbr"`), as a number, or
//! as a raw JSON value coming from a frontend. All of these are normalized
//! into a [`FillMethod`] before any column is touched.

use crate::error::{ImputationError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// String tokens accepted when filling missing values.
pub const MISSING_METHOD_TOKENS: [&str; 4] = ["mean", "median", "mode", "rdbr"];

/// String tokens accepted when filling outliers (mode is not supported there).
pub const OUTLIER_METHOD_TOKENS: [&str; 3] = ["mean", "median", "rdbr"];

/// How replacement values are produced for the cells being filled.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FillMethod {
    /// Write the same constant into every cell.
    Constant(f64),
    /// Mean of the fill basis.
    Mean,
    /// Median of the fill basis.
    Median,
    /// Most frequent value of the fill basis (smallest value on ties).
    Mode,
    /// Random Distribution By Ratio: draw each replacement from the basis,
    /// weighted by the observed frequency of each distinct value.
    #[default]
    Rdbr,
}

impl FillMethod {
    /// Token used in logs and records (`"constant"` for constants).
    pub fn name(&self) -> &'static str {
        match self {
            Self::Constant(_) => "constant",
            Self::Mean => "mean",
            Self::Median => "median",
            Self::Mode => "mode",
            Self::Rdbr => "rdbr",
        }
    }

    /// Whether this method can be used to replace outliers.
    pub fn supports_outliers(&self) -> bool {
        !matches!(self, Self::Mode)
    }

    /// Reject methods the outlier strategies do not accept.
    pub fn ensure_outlier_method(self) -> Result<Self> {
        if self.supports_outliers() {
            Ok(self)
        } else {
            Err(ImputationError::invalid_value(
                "method",
                format!(
                    "outlier filling accepts a number or one of: {}",
                    OUTLIER_METHOD_TOKENS.join(", ")
                ),
            ))
        }
    }
}

impl fmt::Display for FillMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Constant(value) => write!(f, "constant({value})"),
            other => f.write_str(other.name()),
        }
    }
}

impl FromStr for FillMethod {
    type Err = ImputationError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "mean" => Ok(Self::Mean),
            "median" => Ok(Self::Median),
            "mode" => Ok(Self::Mode),
            "rdbr" => Ok(Self::Rdbr),
            other => Err(ImputationError::invalid_value(
                "method",
                format!(
                    "'{other}' is not one of: {}",
                    MISSING_METHOD_TOKENS.join(", ")
                ),
            )),
        }
    }
}

impl From<f64> for FillMethod {
    fn from(value: f64) -> Self {
        Self::Constant(value)
    }
}

impl From<i64> for FillMethod {
    fn from(value: i64) -> Self {
        Self::Constant(value as f64)
    }
}

impl From<i32> for FillMethod {
    fn from(value: i32) -> Self {
        Self::Constant(f64::from(value))
    }
}

impl TryFrom<&serde_json::Value> for FillMethod {
    type Error = ImputationError;

    fn try_from(value: &serde_json::Value) -> Result<Self> {
        match value {
            serde_json::Value::Number(n) => n
                .as_f64()
                .map(Self::Constant)
                .ok_or_else(|| ImputationError::invalid_type("method", "str, int or float")),
            serde_json::Value::String(s) => s.parse(),
            _ => Err(ImputationError::invalid_type("method", "str, int or float")),
        }
    }
}

/// Parse a dynamic outlier multiplier (`k`).
///
/// Only JSON numbers are accepted; a non-finite result is a value error.
pub fn parse_multiplier(value: &serde_json::Value) -> Result<f64> {
    let k = value
        .as_f64()
        .ok_or_else(|| ImputationError::invalid_type("k", "int or float"))?;
    validate_multiplier(k)
}

/// Check that a multiplier is usable for building outlier bounds.
pub fn validate_multiplier(k: f64) -> Result<f64> {
    if k.is_finite() {
        Ok(k)
    } else {
        Err(ImputationError::invalid_value(
            "k",
            format!("multiplier must be finite, got {k}"),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // ========================================================================
    // Parsing
    // ========================================================================

    #[test]
    fn test_parse_tokens() {
        assert_eq!("mean".parse::<FillMethod>().unwrap(), FillMethod::Mean);
        assert_eq!("median".parse::<FillMethod>().unwrap(), FillMethod::Median);
        assert_eq!("mode".parse::<FillMethod>().unwrap(), FillMethod::Mode);
        assert_eq!("rdbr".parse::<FillMethod>().unwrap(), FillMethod::Rdbr);
    }

    #[test]
    fn test_parse_unknown_token_is_value_error() {
        let err = "bogus".parse::<FillMethod>().unwrap_err();
        assert_eq!(err.error_code(), "INVALID_VALUE");
        assert!(err.to_string().contains("bogus"));
    }

    #[test]
    fn test_tokens_are_case_sensitive() {
        assert!("Mean".parse::<FillMethod>().is_err());
    }

    #[test]
    fn test_numeric_conversions() {
        assert_eq!(FillMethod::from(2.5), FillMethod::Constant(2.5));
        assert_eq!(FillMethod::from(-3i64), FillMethod::Constant(-3.0));
        assert_eq!(FillMethod::from(0i32), FillMethod::Constant(0.0));
    }

    #[test]
    fn test_try_from_json() {
        assert_eq!(
            FillMethod::try_from(&json!(7)).unwrap(),
            FillMethod::Constant(7.0)
        );
        assert_eq!(
            FillMethod::try_from(&json!("median")).unwrap(),
            FillMethod::Median
        );

        let err = FillMethod::try_from(&json!(true)).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_TYPE");

        let err = FillMethod::try_from(&json!(["mean"])).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_TYPE");

        let err = FillMethod::try_from(&json!("average")).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_VALUE");
    }

    // ========================================================================
    // Outlier support
    // ========================================================================

    #[test]
    fn test_mode_rejected_for_outliers() {
        let err = FillMethod::Mode.ensure_outlier_method().unwrap_err();
        assert_eq!(err.error_code(), "INVALID_VALUE");

        assert!(FillMethod::Mean.ensure_outlier_method().is_ok());
        assert!(FillMethod::Constant(1.0).ensure_outlier_method().is_ok());
    }

    // ========================================================================
    // Multipliers
    // ========================================================================

    #[test]
    fn test_parse_multiplier() {
        assert_eq!(parse_multiplier(&json!(1.5)).unwrap(), 1.5);
        assert_eq!(parse_multiplier(&json!(3)).unwrap(), 3.0);

        let err = parse_multiplier(&json!("x")).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_TYPE");

        let err = parse_multiplier(&serde_json::Value::Null).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_TYPE");
    }

    #[test]
    fn test_validate_multiplier_rejects_non_finite() {
        assert!(validate_multiplier(f64::NAN).is_err());
        assert!(validate_multiplier(f64::INFINITY).is_err());
        assert_eq!(validate_multiplier(0.0).unwrap(), 0.0);
    }

    // ========================================================================
    // Display / serde
    // ========================================================================

    #[test]
    fn test_display() {
        assert_eq!(FillMethod::Rdbr.to_string(), "rdbr");
        assert_eq!(FillMethod::Constant(0.5).to_string(), "constant(0.5)");
    }

    #[test]
    fn test_serde_representation() {
        assert_eq!(serde_json::to_string(&FillMethod::Mean).unwrap(), "\"mean\"");
        assert_eq!(
            serde_json::to_string(&FillMethod::Constant(1.0)).unwrap(),
            "{\"constant\":1.0}"
        );
        let method: FillMethod = serde_json::from_str("\"rdbr\"").unwrap();
        assert_eq!(method, FillMethod::Rdbr);
    }
}
