//! WhatsApp tools exposed to agents.

mod error;
mod executor;
mod gateway;
mod registry;
mod types;
pub mod whatsapp;

pub use error::ToolError;
pub use executor::ToolExecutor;
pub use gateway::{format_groups, format_messages, Gateway, SEND_ERROR_PREFIX, SEND_SUCCESS};
pub use registry::ToolRegistry;
pub use types::*;
