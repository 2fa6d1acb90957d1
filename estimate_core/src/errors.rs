//! # Error Types
//!
//! Structured error types for estimate_core. Every failure a caller can act
//! on has its own variant so the CLI (or any other front end) can report it
//! without parsing strings.
//!
//! ## Example
//!
//! ```rust
//! use estimate_core::errors::{EstimateError, CoreResult};
//!
//! fn validate_length(length_ft: f64) -> CoreResult<()> {
//!     if length_ft <= 0.0 {
//!         return Err(EstimateError::invalid_input(
//!             "length",
//!             length_ft.to_string(),
//!             "Length must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for estimate_core operations
pub type CoreResult<T> = Result<T, EstimateError>;

/// Structured error type for estimate operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum EstimateError {
    /// Project type text did not name a deck, patio or fence
    #[error("Invalid project type: '{value}' (expected Deck, Patio or Fence)")]
    InvalidProjectType { value: String },

    /// The dimension required by the project type was not supplied
    #[error("Missing dimension '{dimension}' for {project_type} project")]
    MissingDimension {
        project_type: String,
        dimension: String,
    },

    /// An input value is invalid (zero, negative, not a number)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A required client field is missing
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// Record log is locked by another process
    #[error("File locked: '{path}' is in use by another process")]
    FileLocked { path: String },

    /// Existing record log has different columns than the row being saved
    #[error("Record log '{path}' has columns [{existing}], cannot append [{incoming}]")]
    RecordSchemaMismatch {
        path: String,
        existing: String,
        incoming: String,
    },

    /// JSON/CSV serialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Configuration file could not be parsed
    #[error("Invalid configuration in '{path}': {reason}")]
    InvalidConfig { path: String, reason: String },

    /// Typst compilation or PDF export failed
    #[error("Rendering failed: {reason}")]
    RenderFailed { reason: String },
}

impl EstimateError {
    /// Create an InvalidProjectType error
    pub fn invalid_project_type(value: impl Into<String>) -> Self {
        EstimateError::InvalidProjectType {
            value: value.into(),
        }
    }

    /// Create a MissingDimension error
    pub fn missing_dimension(project_type: impl Into<String>, dimension: impl Into<String>) -> Self {
        EstimateError::MissingDimension {
            project_type: project_type.into(),
            dimension: dimension.into(),
        }
    }

    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        EstimateError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MissingField error
    pub fn missing_field(field: impl Into<String>) -> Self {
        EstimateError::MissingField {
            field: field.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        EstimateError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a RenderFailed error
    pub fn render_failed(reason: impl Into<String>) -> Self {
        EstimateError::RenderFailed {
            reason: reason.into(),
        }
    }

    /// Check if this is a recoverable error (e.g., can retry)
    pub fn is_recoverable(&self) -> bool {
        matches!(self, EstimateError::FileLocked { .. })
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            EstimateError::InvalidProjectType { .. } => "INVALID_PROJECT_TYPE",
            EstimateError::MissingDimension { .. } => "MISSING_DIMENSION",
            EstimateError::InvalidInput { .. } => "INVALID_INPUT",
            EstimateError::MissingField { .. } => "MISSING_FIELD",
            EstimateError::FileError { .. } => "FILE_ERROR",
            EstimateError::FileLocked { .. } => "FILE_LOCKED",
            EstimateError::RecordSchemaMismatch { .. } => "RECORD_SCHEMA_MISMATCH",
            EstimateError::SerializationError { .. } => "SERIALIZATION_ERROR",
            EstimateError::InvalidConfig { .. } => "INVALID_CONFIG",
            EstimateError::RenderFailed { .. } => "RENDER_FAILED",
        }
    }
}

impl From<csv::Error> for EstimateError {
    fn from(e: csv::Error) -> Self {
        EstimateError::SerializationError {
            reason: e.to_string(),
        }
    }
}
