//! Custom error types for the imputation engine.
//!
//! Argument validation maps onto two kinds: [`ImputationError::InvalidType`]
//! when an argument has the wrong shape, and [`ImputationError::InvalidValue`]
//! when it has the right shape but an unsupported value. Both are raised
//! before any column is touched.
//!
//! Errors are serializable so they can be forwarded to a frontend as
//! `{ code, message }` pairs.

use serde::Serialize;
use serde::ser::SerializeStruct;
use thiserror::Error;

/// The main error type for imputation operations.
#[derive(Error, Debug)]
pub enum ImputationError {
    /// An argument is not one of the accepted types.
    #[error("Argument '{argument}' must be {expected}")]
    InvalidType {
        argument: String,
        expected: String,
    },

    /// An argument has an accepted type but an unsupported value.
    #[error("Invalid value for argument '{argument}': {reason}")]
    InvalidValue { argument: String, reason: String },

    /// Column was not found in the dataset.
    #[error("Column '{0}' not found in dataset")]
    ColumnNotFound(String),

    /// A column has cells to fill but nothing to derive a fill value from.
    #[error("No valid values found in column '{0}'")]
    NoValidValues(String),

    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Polars error wrapper.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// Generic error with context.
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<ImputationError>,
    },
}

impl ImputationError {
    /// Shorthand for an [`ImputationError::InvalidType`].
    pub fn invalid_type(argument: impl Into<String>, expected: impl Into<String>) -> Self {
        Self::InvalidType {
            argument: argument.into(),
            expected: expected.into(),
        }
    }

    /// Shorthand for an [`ImputationError::InvalidValue`].
    pub fn invalid_value(argument: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            argument: argument.into(),
            reason: reason.into(),
        }
    }

    /// Add context to an error.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        ImputationError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Get error code for frontend handling.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidType { .. } => "INVALID_TYPE",
            Self::InvalidValue { .. } => "INVALID_VALUE",
            Self::ColumnNotFound(_) => "COLUMN_NOT_FOUND",
            Self::NoValidValues(_) => "NO_VALID_VALUES",
            Self::InvalidConfig(_) => "INVALID_CONFIG",
            Self::Polars(_) => "POLARS_ERROR",
            Self::WithContext { source, .. } => source.error_code(),
        }
    }
}

/// Errors are serialized as a struct with `code` and `message` fields.
impl Serialize for ImputationError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("ImputationError", 2)?;
        state.serialize_field("code", &self.error_code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

/// Result type alias for imputation operations.
pub type Result<T> = std::result::Result<T, ImputationError>;

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}
