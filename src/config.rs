//! Compiler settings

use serde::{Deserialize, Serialize};
use std::path::Path;

/// What to do with an input that has more than one incoming link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MultiLinkPolicy {
    /// Fail the compilation
    #[default]
    Reject,
    /// Skip the links; the input then gets its default value
    Ignore,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompilerConfig {
    pub multi_link: MultiLinkPolicy,
}

impl CompilerConfig {
    pub fn with_multi_link(mut self, policy: MultiLinkPolicy) -> Self {
        self.multi_link = policy;
        self
    }

    /// Load settings from a JSON file
    pub fn load_from_file(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {}", e))?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self, String> {
        serde_json::from_str(content).map_err(|e| format!("Failed to parse config: {}", e))
    }
}
