//! Common test utilities for integration tests.

use evoapi_mcp::config::{environment, Config};
use evoapi_mcp::server::WhatsAppServer;
use evoapi_mcp::{build_client, build_server};
use std::collections::HashMap;
use wiremock::MockServer;

/// Start a mock Evolution API server.
pub async fn mock_evolution_server() -> MockServer {
    MockServer::start().await
}

/// Configuration pointing at a mock server, plus extra variables.
pub fn test_config(mock_server: &MockServer, extra: &[(&str, &str)]) -> Config {
    let mut vars: HashMap<String, String> = [
        ("EVOLUTION__BASE_URL", mock_server.uri()),
        ("EVOLUTION__API_KEY", "test-api-key".to_string()),
        ("EVOLUTION__INSTANCE", "test-instance".to_string()),
        ("EVOLUTION__TIMEOUT", "5s".to_string()),
        ("SERVER__TIMEZONE", "-03:00".to_string()),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect();

    for (k, v) in extra {
        vars.insert(k.to_string(), v.to_string());
    }

    Config::from_environment(environment().source(Some(vars))).unwrap()
}

/// Build the MCP server wired to a mock Evolution API.
pub fn test_server(mock_server: &MockServer, extra: &[(&str, &str)]) -> WhatsAppServer {
    let config = test_config(mock_server, extra);
    let client = build_client(&config).unwrap();
    build_server(&config, client)
}

/// Build a JSON argument object.
pub fn args(value: serde_json::Value) -> Option<serde_json::Map<String, serde_json::Value>> {
    value.as_object().cloned()
}

/// Extract `(text, is_error)` from a call result.
pub fn text_of(result: &rmcp::model::CallToolResult) -> (String, bool) {
    let json = serde_json::to_value(result).unwrap();
    let text = json["content"][0]["text"].as_str().unwrap_or_default().to_string();
    let is_error = json["isError"].as_bool().unwrap_or(false);
    (text, is_error)
}
