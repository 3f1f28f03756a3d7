//! Unified error type for the pizzeria backend.
//!
//! Core operations return [`Result`]; the HTTP layer in [`crate::api`] is the only
//! place that maps an [`Error`] kind onto a status code.

use thiserror::Error;

/// Message reported whenever the seeded status rows are missing or duplicated.
pub const WRONG_CONFIGURATION_MESSAGE: &str = "Missing or wrong configuration data";

/// All errors produced by the crate.
#[derive(Debug, Error)]
pub enum Error {
    /// The status rows the workflow depends on are missing or duplicated, or a
    /// referenced status id does not resolve.
    #[error("{message}")]
    Configuration {
        /// Human-readable description of the misconfiguration
        message: String,
    },

    /// A requested entity does not exist.
    #[error("{resource} not found")]
    NotFound {
        /// What was looked up (e.g. `"order"`, `"order status"`)
        resource: String,
    },

    /// A request payload failed its declared constraints.
    #[error("Validation failed: {message}")]
    Validation {
        /// Which constraint failed
        message: String,
    },

    /// The application settings file could not be read or parsed.
    #[error("Settings error: {message}")]
    Settings {
        /// Description of the settings failure
        message: String,
    },

    /// Any failure reported by the persistence layer.
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// I/O failure (socket bind, serve loop).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Builds the configuration error raised when the status seed data is wrong.
    #[must_use]
    pub fn wrong_configuration() -> Self {
        Self::Configuration {
            message: WRONG_CONFIGURATION_MESSAGE.to_string(),
        }
    }

    /// Builds a not-found error for the named resource.
    #[must_use]
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
