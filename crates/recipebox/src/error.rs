//! Error types for recipebox.
//!
//! Two kinds of error travel through the crate. Domain errors
//! ([`Error::Validation`] and [`Error::NotFound`]) describe input the catalog
//! rejects and are meant to be shown to the user. Everything else is an
//! infrastructure failure and propagates to the front end boundary.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for recipebox operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Domain Errors ===
    /// Input was rejected (blank title, nothing to pick from, ...).
    #[error("{message}")]
    Validation {
        /// User-facing description of the problem.
        message: String,
    },

    /// The referenced recipe does not exist.
    #[error("recipe with id={id} not found")]
    NotFound {
        /// The id that was looked up.
        id: i64,
    },

    // === Storage Errors ===
    /// Failed to open or create the database.
    #[error("failed to open database at {path}: {source}")]
    DatabaseOpen {
        /// Path to the database file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: rusqlite::Error,
    },

    /// A database query failed.
    #[error("database query failed: {0}")]
    DatabaseQuery(#[from] rusqlite::Error),

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Web Errors ===
    /// Page rendering failed.
    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),

    /// The HTTP server failed to start or stopped unexpectedly.
    #[error("server error: {message}")]
    Server {
        /// Description of what went wrong.
        message: String,
    },

    // === I/O Errors ===
    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for recipebox operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a validation error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a not-found error for the given recipe id.
    #[must_use]
    pub fn not_found(id: i64) -> Self {
        Self::NotFound { id }
    }

    /// Create a server error.
    #[must_use]
    pub fn server(message: impl Into<String>) -> Self {
        Self::Server {
            message: message.into(),
        }
    }

    /// Check if this error is a validation failure.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// Check if this error refers to a missing recipe.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a domain error a front end should present to the user.
    #[must_use]
    pub fn is_domain(&self) -> bool {
        self.is_validation() || self.is_not_found()
    }
}
