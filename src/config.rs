//! # Generator Configuration
//!
//! The configuration record consumed by the schema generator. Loading it
//! from a host config file is the caller's concern; this module only
//! defines the shape and checks it.

use crate::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use url::Url;

/// Hostname used for schema `$id` URIs when none is configured.
pub const DEFAULT_HOSTNAME: &str = "https://schema-examples.com";

/// Configuration for content-type schema generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratorConfig {
    /// The hostname prefixed to every generated `$id`.
    #[serde(default = "default_hostname")]
    pub hostname: String,

    /// Optional suffix appended to generated schema file stems.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_suffix: Option<String>,
}

fn default_hostname() -> String {
    DEFAULT_HOSTNAME.to_string()
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            hostname: default_hostname(),
            schema_suffix: None,
        }
    }
}

impl GeneratorConfig {
    /// Creates a configuration with the default hostname.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the hostname.
    pub fn with_hostname(mut self, hostname: impl Into<String>) -> Self {
        self.hostname = hostname.into();
        self
    }

    /// Sets the schema file-stem suffix.
    pub fn with_schema_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.schema_suffix = Some(suffix.into());
        self
    }

    /// Checks that the hostname parses as an absolute URL, since it seeds
    /// every generated `$id`.
    pub fn validate(&self) -> AppResult<()> {
        Url::parse(&self.hostname)
            .map_err(|e| AppError::Config(format!("invalid hostname '{}': {}", self.hostname, e)))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_hostname() {
        let config = GeneratorConfig::new();
        assert_eq!(config.hostname, DEFAULT_HOSTNAME);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_hostname() {
        let config = GeneratorConfig::new().with_hostname("not a url");
        let err = config.validate().expect_err("should reject");
        assert!(err.to_string().starts_with("Config Error:"));
    }

    #[test]
    fn test_deserialize_camel_case() {
        let config: GeneratorConfig =
            serde_json::from_str(r#"{"hostname":"https://example.com","schemaSuffix":"dev"}"#)
                .expect("should parse");
        assert_eq!(config.hostname, "https://example.com");
        assert_eq!(config.schema_suffix.as_deref(), Some("dev"));
    }
}
