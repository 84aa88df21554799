//! Instrumentation configuration.
//!
//! Loaded once at process start, usually with [`LambdaConfig::from_env`]:
//!
//! - `DD_ENHANCED_METRICS` - emit `aws.lambda.enhanced.*` metrics (default `true`)
//! - `DD_LOG_LEVEL` - log level for the library's own diagnostics (default `error`)
//! - `DD_LOGS_JSON` - format diagnostics as JSON (default `false`)

use crate::error::{LambdaError, Result};

pub const ENHANCED_METRICS_ENV: &str = "DD_ENHANCED_METRICS";
pub const LOG_LEVEL_ENV: &str = "DD_LOG_LEVEL";
pub const LOGS_JSON_ENV: &str = "DD_LOGS_JSON";

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];

/// Instrumentation configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LambdaConfig {
    /// Emit invocation and error counts tagged with the enhanced tags
    pub enhanced_metrics: bool,

    /// Level for the library's diagnostic logs
    pub log_level: String,

    /// Format diagnostics as JSON lines
    pub json_logs: bool,
}

impl Default for LambdaConfig {
    fn default() -> Self {
        Self {
            enhanced_metrics: true,
            log_level: "error".to_string(),
            json_logs: false,
        }
    }
}

impl LambdaConfig {
    /// Create a new config builder
    pub fn builder() -> LambdaConfigBuilder {
        LambdaConfigBuilder::new()
    }

    /// Create config from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Create config from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            enhanced_metrics: lookup(ENHANCED_METRICS_ENV)
                .map(|v| v.trim().eq_ignore_ascii_case("true"))
                .unwrap_or(defaults.enhanced_metrics),
            log_level: lookup(LOG_LEVEL_ENV)
                .map(|v| v.trim().to_lowercase())
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.log_level),
            json_logs: lookup(LOGS_JSON_ENV)
                .map(|v| v.trim().eq_ignore_ascii_case("true"))
                .unwrap_or(defaults.json_logs),
        }
    }

    /// Reject values the logging layer cannot use.
    pub fn validate(&self) -> Result<()> {
        if !LOG_LEVELS.contains(&self.log_level.as_str()) {
            return Err(LambdaError::config(format!(
                "unknown log level '{}', expected one of {}",
                self.log_level,
                LOG_LEVELS.join(", ")
            )));
        }
        Ok(())
    }
}

/// Builder for LambdaConfig
pub struct LambdaConfigBuilder {
    config: LambdaConfig,
}

impl LambdaConfigBuilder {
    /// Create a new builder with defaults
    pub fn new() -> Self {
        Self {
            config: LambdaConfig::default(),
        }
    }

    /// Enable or disable enhanced metrics
    pub fn enhanced_metrics(mut self, enabled: bool) -> Self {
        self.config.enhanced_metrics = enabled;
        self
    }

    /// Set the diagnostic log level
    pub fn log_level(mut self, level: impl Into<String>) -> Self {
        self.config.log_level = level.into();
        self
    }

    /// Enable or disable JSON diagnostics
    pub fn json_logs(mut self, enabled: bool) -> Self {
        self.config.json_logs = enabled;
        self
    }

    /// Build the configuration
    pub fn build(self) -> LambdaConfig {
        self.config
    }
}

impl Default for LambdaConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = LambdaConfig::default();
        assert!(config.enhanced_metrics);
        assert_eq!(config.log_level, "error");
        assert!(!config.json_logs);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = LambdaConfig::builder()
            .enhanced_metrics(false)
            .log_level("debug")
            .json_logs(true)
            .build();

        assert!(!config.enhanced_metrics);
        assert_eq!(config.log_level, "debug");
        assert!(config.json_logs);
    }

    #[test]
    fn test_from_lookup_empty_uses_defaults() {
        assert_eq!(LambdaConfig::from_lookup(lookup(&[])), LambdaConfig::default());
    }

    #[test]
    fn test_from_lookup() {
        let config = LambdaConfig::from_lookup(lookup(&[
            ("DD_ENHANCED_METRICS", "FALSE"),
            ("DD_LOG_LEVEL", "DEBUG"),
            ("DD_LOGS_JSON", "True"),
        ]));

        assert!(!config.enhanced_metrics);
        assert_eq!(config.log_level, "debug");
        assert!(config.json_logs);
    }

    #[test]
    fn test_enhanced_metrics_only_true_enables() {
        let config = LambdaConfig::from_lookup(lookup(&[("DD_ENHANCED_METRICS", "yes")]));
        assert!(!config.enhanced_metrics);

        let config = LambdaConfig::from_lookup(lookup(&[("DD_ENHANCED_METRICS", " true ")]));
        assert!(config.enhanced_metrics);
    }

    #[test]
    fn test_validate_rejects_unknown_level() {
        let config = LambdaConfig::builder().log_level("verbose").build();
        assert!(matches!(config.validate(), Err(LambdaError::Config(_))));
    }
}
