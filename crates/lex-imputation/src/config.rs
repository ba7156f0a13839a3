//! Configuration types for the imputer.
//!
//! This module provides configuration options using the builder pattern.

use crate::method::FillMethod;
use serde::{Deserialize, Serialize};

/// Default multiplier applied to the interquartile range.
pub const DEFAULT_IQR_MULTIPLIER: f64 = 1.5;

/// Default number of standard deviations for the sigma rule.
pub const DEFAULT_SIGMA_MULTIPLIER: f64 = 3.0;

/// Configuration for an [`Imputer`](crate::Imputer).
///
/// # Example
///
/// ```rust,ignore
/// use lex_imputation::{FillMethod, ImputerConfig};
///
/// let config = ImputerConfig::builder()
///     .seed(42)
///     .iqr_multiplier(3.0)
///     .default_method(FillMethod::Median)
///     .build()?;
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImputerConfig {
    /// Seed for RDBR sampling. When `None` the RNG is seeded from entropy.
    /// Default: None
    pub seed: Option<u64>,

    /// Multiplier used by `fill_outliers_iqr_default`.
    /// Default: 1.5
    pub iqr_multiplier: f64,

    /// Multiplier used by `fill_outliers_sigma_default`.
    /// Default: 3.0
    pub sigma_multiplier: f64,

    /// Method used by the `*_default` fill operations.
    /// Default: Rdbr
    pub default_method: FillMethod,
}

impl Default for ImputerConfig {
    fn default() -> Self {
        Self {
            seed: None,
            iqr_multiplier: DEFAULT_IQR_MULTIPLIER,
            sigma_multiplier: DEFAULT_SIGMA_MULTIPLIER,
            default_method: FillMethod::default(),
        }
    }
}

impl ImputerConfig {
    /// Create a new configuration builder.
    pub fn builder() -> ImputerConfigBuilder {
        ImputerConfigBuilder::default()
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        for (field, value) in [
            ("iqr_multiplier", self.iqr_multiplier),
            ("sigma_multiplier", self.sigma_multiplier),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigValidationError::InvalidMultiplier {
                    field: field.to_string(),
                    value,
                });
            }
        }

        match self.default_method {
            FillMethod::Mode => Err(ConfigValidationError::UnsupportedDefaultMethod(
                self.default_method,
            )),
            FillMethod::Constant(value) if !value.is_finite() => {
                Err(ConfigValidationError::UnsupportedDefaultMethod(
                    self.default_method,
                ))
            }
            _ => Ok(()),
        }
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid multiplier for '{field}': {value} (must be finite and non-negative)")]
    InvalidMultiplier { field: String, value: f64 },

    #[error("Unsupported default method: {0} (must work for both missing values and outliers)")]
    UnsupportedDefaultMethod(FillMethod),
}

/// Builder for [`ImputerConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct ImputerConfigBuilder {
    seed: Option<u64>,
    iqr_multiplier: Option<f64>,
    sigma_multiplier: Option<f64>,
    default_method: Option<FillMethod>,
}

impl ImputerConfigBuilder {
    /// Fix the RDBR random seed for reproducible fills.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the default interquartile range multiplier.
    pub fn iqr_multiplier(mut self, k: f64) -> Self {
        self.iqr_multiplier = Some(k);
        self
    }

    /// Set the default sigma multiplier.
    pub fn sigma_multiplier(mut self, k: f64) -> Self {
        self.sigma_multiplier = Some(k);
        self
    }

    /// Set the method used by the `*_default` operations.
    pub fn default_method(mut self, method: FillMethod) -> Self {
        self.default_method = Some(method);
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `ImputerConfig` or an error if validation fails.
    pub fn build(self) -> Result<ImputerConfig, ConfigValidationError> {
        let config = ImputerConfig {
            seed: self.seed,
            iqr_multiplier: self.iqr_multiplier.unwrap_or(DEFAULT_IQR_MULTIPLIER),
            sigma_multiplier: self.sigma_multiplier.unwrap_or(DEFAULT_SIGMA_MULTIPLIER),
            default_method: self.default_method.unwrap_or_default(),
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ImputerConfig::default();
        assert_eq!(config.seed, None);
        assert_eq!(config.iqr_multiplier, 1.5);
        assert_eq!(config.sigma_multiplier, 3.0);
        assert_eq!(config.default_method, FillMethod::Rdbr);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_custom_values() {
        let config = ImputerConfig::builder()
            .seed(7)
            .iqr_multiplier(3.0)
            .sigma_multiplier(2.0)
            .default_method(FillMethod::Median)
            .build()
            .unwrap();

        assert_eq!(config.seed, Some(7));
        assert_eq!(config.iqr_multiplier, 3.0);
        assert_eq!(config.sigma_multiplier, 2.0);
        assert_eq!(config.default_method, FillMethod::Median);
    }

    #[test]
    fn test_validation_negative_multiplier() {
        let result = ImputerConfig::builder().iqr_multiplier(-1.0).build();
        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::InvalidMultiplier { .. }
        ));
    }

    #[test]
    fn test_validation_nan_multiplier() {
        let result = ImputerConfig::builder().sigma_multiplier(f64::NAN).build();
        assert!(result.is_err());
    }

    #[test]
    fn test_validation_mode_default_rejected() {
        let result = ImputerConfig::builder()
            .default_method(FillMethod::Mode)
            .build();
        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::UnsupportedDefaultMethod(FillMethod::Mode)
        ));
    }

    #[test]
    fn test_config_from_json() {
        let json = r#"{
            "seed": 123,
            "iqr_multiplier": 2.0,
            "sigma_multiplier": 2.5,
            "default_method": { "constant": 0.0 }
        }"#;

        let config: ImputerConfig =
            serde_json::from_str(json).expect("Should deserialize from frontend JSON");

        assert_eq!(config.seed, Some(123));
        assert_eq!(config.iqr_multiplier, 2.0);
        assert_eq!(config.sigma_multiplier, 2.5);
        assert_eq!(config.default_method, FillMethod::Constant(0.0));
        assert!(config.validate().is_ok());
    }
}
