//! Tool execution errors.

use evolution_client::EvolutionError;
use thiserror::Error;

/// Errors that can occur during tool execution.
#[derive(Error, Debug)]
pub enum ToolError {
    /// Invalid arguments provided to tool.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// Fetching groups or messages failed.
    #[error("{0}")]
    Repository(#[from] EvolutionError),
}
