//! Container configuration

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContainerConfig {
    /// Everything up to and including this marker is stripped from a URI
    /// before its path is matched
    pub uri_prefix: String,
    /// Log every committed transition at debug level
    pub trace_transitions: bool,
}

impl ContainerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn uri_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.uri_prefix = prefix.into();
        self
    }

    pub fn trace_transitions(mut self, enabled: bool) -> Self {
        self.trace_transitions = enabled;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.uri_prefix.is_empty() {
            return Err(CoreError::Config("uri prefix cannot be empty".to_string()));
        }
        Ok(())
    }
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            uri_prefix: "://".to_string(),
            trace_transitions: true,
        }
    }
}
