/*!
 * Error types for the doku2tiddly application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Two top-level category nodes claim the same title. Renaming either one
    /// would orphan the pages tagged beneath it, so the run cannot continue.
    #[error("irreconcilable naming collision on - {existing} vs {incoming}")]
    NamingCollision {
        /// Title of the already registered top-level category
        existing: String,
        /// Title of the incoming top-level category
        incoming: String,
    },

    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error in the run configuration
    #[error("Config error: {0}")]
    Config(String),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
