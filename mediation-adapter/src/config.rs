//! Adapter configuration
//!
//! Loaded once per process and shared through the
//! [`MediationContext`](crate::MediationContext).

use std::path::Path;

use serde::{Deserialize, Serialize};
use ui_dispatch::DispatchConfig;

use crate::error::Result;

/// Version of this adapter as reported to the host and the SDK
pub const ADAPTER_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Configuration for the mediation adapter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdapterConfig {
    /// Mediation layer name reported to the SDK for cross-network reporting
    /// Default: "AppLovin"
    pub mediation_name: String,

    /// Host SDK version reported alongside the name, unless the host passes
    /// one at initialization
    /// Default: "unknown"
    pub mediation_sdk_version: String,

    /// Adapter version reported to the host and the SDK
    /// Default: this crate's version
    pub adapter_version: String,

    /// UI context and background pool settings
    pub dispatch: DispatchConfig,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            mediation_name: "AppLovin".to_string(),
            mediation_sdk_version: "unknown".to_string(),
            adapter_version: ADAPTER_VERSION.to_string(),
            dispatch: DispatchConfig::default(),
        }
    }
}

impl AdapterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON document; missing fields keep their defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn with_mediation_name(mut self, name: impl Into<String>) -> Self {
        self.mediation_name = name.into();
        self
    }

    pub fn with_mediation_sdk_version(mut self, version: impl Into<String>) -> Self {
        self.mediation_sdk_version = version.into();
        self
    }

    pub fn with_adapter_version(mut self, version: impl Into<String>) -> Self {
        self.adapter_version = version.into();
        self
    }

    pub fn with_dispatch(mut self, dispatch: DispatchConfig) -> Self {
        self.dispatch = dispatch;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AdapterError;

    #[test]
    fn test_default_config() {
        let config = AdapterConfig::default();
        assert_eq!(config.mediation_name, "AppLovin");
        assert_eq!(config.adapter_version, ADAPTER_VERSION);
        assert_eq!(config.dispatch, DispatchConfig::default());
    }

    #[test]
    fn test_json_with_defaults() {
        let config = AdapterConfig::from_json_str(
            r#"{"mediation_sdk_version": "12.4.0", "dispatch": {"thread_name": "main"}}"#,
        )
        .unwrap();
        assert_eq!(config.mediation_name, "AppLovin");
        assert_eq!(config.mediation_sdk_version, "12.4.0");
        assert_eq!(config.dispatch.thread_name, "main");
        assert_eq!(config.dispatch.background_threads, 1);
    }

    #[test]
    fn test_malformed_json() {
        let result = AdapterConfig::from_json_str("{ not json");
        assert!(matches!(result, Err(AdapterError::ConfigParse(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = AdapterConfig::from_file("/nonexistent/equativ-adapter.json");
        assert!(matches!(result, Err(AdapterError::ConfigIo(_))));
    }

    #[test]
    fn test_builder_pattern() {
        let config = AdapterConfig::new()
            .with_mediation_name("MAX")
            .with_mediation_sdk_version("13.0.0")
            .with_adapter_version("2.1")
            .with_dispatch(DispatchConfig::new().with_background_threads(2));
        assert_eq!(config.mediation_name, "MAX");
        assert_eq!(config.mediation_sdk_version, "13.0.0");
        assert_eq!(config.adapter_version, "2.1");
        assert_eq!(config.dispatch.background_threads, 2);
    }
}
