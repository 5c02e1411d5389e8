//! Evolution client errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EvolutionError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The API refused to deliver a message. Carries the API's own
    /// description so callers can show it verbatim.
    #[error("{0}")]
    SendFailed(String),

    #[error("Invalid date '{0}': expected YYYY-MM-DD HH:MM:SS")]
    InvalidDate(String),

    #[error("Invalid time zone '{0}': expected 'local', 'utc' or an offset like -03:00")]
    InvalidTimeZone(String),
}
