//! Shared error types for the application

use crate::core::RecordId;
use thiserror::Error;

/// Input that the analysis functions refuse to compute over.
///
/// Raised only by the nearest-neighbor search; every other analysis is total.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("person {id} has no geographic position")]
    MissingPosition { id: RecordId },

    #[error("person {id} has an invalid position ({lat}, {lng})")]
    InvalidPosition { id: RecordId, lat: f64, lng: f64 },

    #[error("person {id} has no neighbor with a different identifier")]
    NoEligibleNeighbor { id: RecordId },
}

/// Main error type for postmap operations
#[derive(Debug, Error)]
pub enum Error {
    /// Analysis refused the input
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A data source could not be retrieved
    #[error("Failed to fetch {location}: {message}")]
    Fetch { location: String, message: String },

    /// A data source was retrieved but is not the expected JSON
    #[error("Failed to parse {location}: {message}")]
    Parse { location: String, message: String },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Generic errors with context
    #[error("{context}: {message}")]
    WithContext { context: String, message: String },

    /// IO errors
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn fetch(location: impl ToString, message: impl ToString) -> Self {
        Self::Fetch {
            location: location.to_string(),
            message: message.to_string(),
        }
    }

    pub fn parse(location: impl ToString, message: impl ToString) -> Self {
        Self::Parse {
            location: location.to_string(),
            message: message.to_string(),
        }
    }

    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        Self::WithContext {
            context: context.into(),
            message: self.to_string(),
        }
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}
