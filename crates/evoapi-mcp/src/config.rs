//! Application configuration loaded from environment variables.

use anyhow::{Context, Result};
use evolution_client::TimeZoneSetting;
use secrecy::SecretString;
use serde::Deserialize;
use std::time::Duration;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Evolution API configuration
    pub evolution: EvolutionConfig,

    /// MCP server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Tools configuration
    #[serde(default)]
    pub tools: ToolsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EvolutionConfig {
    /// Evolution API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Instance API key
    pub api_key: SecretString,

    /// Instance name
    pub instance: String,

    /// Request timeout
    #[serde(default = "default_timeout", with = "humantime_serde")]
    pub timeout: Duration,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Name announced to MCP clients
    #[serde(default = "default_server_name")]
    pub name: String,

    /// Zone for message windows and timestamps ("local", "utc", "-03:00")
    #[serde(default)]
    pub timezone: TimeZoneSetting,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Log line format
    #[serde(default)]
    pub log_format: LogFormat,
}

/// Format of log lines written to stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

/// Per-tool switches. Every tool is enabled unless turned off here.
#[derive(Debug, Clone, Deserialize)]
pub struct ToolsConfig {
    #[serde(default = "default_true")]
    pub get_groups: bool,

    #[serde(default = "default_true")]
    pub get_group_messages: bool,

    #[serde(default = "default_true")]
    pub send_message_to_group: bool,

    #[serde(default = "default_true")]
    pub send_message_to_phone: bool,
}

impl ToolsConfig {
    /// Names of the tools switched off.
    pub fn disabled(&self) -> Vec<&'static str> {
        [
            ("get_groups", self.get_groups),
            ("get_group_messages", self.get_group_messages),
            ("send_message_to_group", self.send_message_to_group),
            ("send_message_to_phone", self.send_message_to_phone),
        ]
        .into_iter()
        .filter(|(_, enabled)| !enabled)
        .map(|(name, _)| name)
        .collect()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: default_server_name(),
            timezone: TimeZoneSetting::default(),
            log_level: default_log_level(),
            log_format: LogFormat::default(),
        }
    }
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            get_groups: default_true(),
            get_group_messages: default_true(),
            send_message_to_group: default_true(),
            send_message_to_phone: default_true(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8080".into()
}

fn default_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_server_name() -> String {
    "evoapi_mcp".into()
}

fn default_log_level() -> String {
    "info".into()
}

fn default_true() -> bool {
    true
}

/// Environment source shared by [`Config::load`] and tests.
pub fn environment() -> config::Environment {
    config::Environment::default()
        .separator("__")
        // Phone numbers and instance names must stay strings.
        .try_parsing(false)
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        Self::from_environment(environment())
    }

    /// Build configuration from a prepared environment source.
    pub fn from_environment(source: config::Environment) -> Result<Self> {
        let config = config::Config::builder()
            .add_source(source)
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }
}
