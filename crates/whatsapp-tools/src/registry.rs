//! Tool registry for managing available tools.

use crate::types::{Tool, ToolDefinition};
use std::collections::HashSet;
use std::sync::Arc;

/// Registry of available tools, kept in registration order.
pub struct ToolRegistry {
    tools: Vec<Arc<dyn Tool>>,
    enabled: HashSet<String>,
}

impl ToolRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            tools: Vec::new(),
            enabled: HashSet::new(),
        }
    }

    /// Register a tool (enabled by default). Replaces a tool with the same name.
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        let name = tool.name().to_string();
        match self.tools.iter().position(|t| t.name() == name) {
            Some(index) => self.tools[index] = tool,
            None => self.tools.push(tool),
        }
        self.enabled.insert(name);
    }

    /// Enable a tool by name.
    pub fn enable(&mut self, name: &str) {
        if self.tools.iter().any(|t| t.name() == name) {
            self.enabled.insert(name.to_string());
        }
    }

    /// Disable a tool by name.
    pub fn disable(&mut self, name: &str) {
        self.enabled.remove(name);
    }

    /// Check if a tool is enabled.
    pub fn is_enabled(&self, name: &str) -> bool {
        self.enabled.contains(name)
    }

    /// Get definitions for all enabled tools.
    pub fn get_definitions(&self) -> Vec<ToolDefinition> {
        self.tools
            .iter()
            .filter(|tool| self.enabled.contains(tool.name()))
            .map(|tool| tool.definition())
            .collect()
    }

    /// Get a tool by name (only if enabled).
    pub fn get_tool(&self, name: &str) -> Option<Arc<dyn Tool>> {
        if !self.enabled.contains(name) {
            return None;
        }
        self.tools.iter().find(|t| t.name() == name).cloned()
    }

    /// List all registered tool names.
    pub fn list_tools(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name()).collect()
    }

    /// List enabled tool names.
    pub fn list_enabled(&self) -> Vec<&str> {
        self.tools
            .iter()
            .map(|t| t.name())
            .filter(|name| self.enabled.contains(*name))
            .collect()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}
