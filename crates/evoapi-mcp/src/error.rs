//! Application error types.

use thiserror::Error;

/// Main application error type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] anyhow::Error),

    #[error("Evolution API error: {0}")]
    Evolution(#[from] evolution_client::EvolutionError),
}

/// Result type alias for application errors.
pub type AppResult<T> = Result<T, AppError>;
