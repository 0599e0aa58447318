//! Error types and handling for `TravelBuddi`

use thiserror::Error;

/// Main error type for the `TravelBuddi` application
#[derive(Error, Debug)]
pub enum TravelBuddiError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Place-search API errors (transport, status or response parsing)
    #[error("API error: {message}")]
    Api { message: String },

    /// Trip request validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// Rendering or packaging an export failed
    #[error("Export error: {message}")]
    Export { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl TravelBuddiError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new API error
    pub fn api<S: Into<String>>(message: S) -> Self {
        Self::Api {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new export error
    pub fn export<S: Into<String>>(message: S) -> Self {
        Self::Export {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            TravelBuddiError::Config { message } => {
                format!("Configuration error: {message}. Please check your config file and API keys.")
            }
            TravelBuddiError::Api { message } => {
                format!("Place search failed ({message}). Showing the offline plan instead.")
            }
            TravelBuddiError::Validation { message } => message.clone(),
            TravelBuddiError::Export { .. } => {
                "Could not build the export files. Please try again.".to_string()
            }
            TravelBuddiError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
        }
    }
}

impl From<csv::Error> for TravelBuddiError {
    fn from(err: csv::Error) -> Self {
        TravelBuddiError::export(format!("CSV writer failed: {err}"))
    }
}

impl From<zip::result::ZipError> for TravelBuddiError {
    fn from(err: zip::result::ZipError) -> Self {
        TravelBuddiError::export(format!("ZIP writer failed: {err}"))
    }
}

impl From<serde_json::Error> for TravelBuddiError {
    fn from(err: serde_json::Error) -> Self {
        TravelBuddiError::export(format!("JSON encoding failed: {err}"))
    }
}
