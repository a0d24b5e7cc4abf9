//! Logger settings loaded from configuration files.

use serde::Deserialize;

use crate::{
    error::ConfigError,
    logger::LoggerBuilder,
    record::Level,
    redaction::{DepthPolicy, DEFAULT_REDACTION_MARKER},
};

/// Deserializable logger settings.
///
/// Every field is optional; missing ones take the same defaults as
/// [`LoggerBuilder`].
///
/// ```toml
/// env = "production"
/// source = "deeplink-api"
/// level = "info"
/// sensitive_keys = ["device_id"]
/// redact_message = "[REDACTED]"
/// depth_policy = "fail_closed"
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub env: String,
    pub source: String,
    pub level: Level,
    pub add_source: bool,
    pub sensitive_keys: Vec<String>,
    pub with_debug: bool,
    pub redact_message: String,
    pub depth_policy: DepthPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            env: String::new(),
            source: String::new(),
            level: Level::Debug,
            add_source: false,
            sensitive_keys: Vec::new(),
            with_debug: false,
            redact_message: DEFAULT_REDACTION_MARKER.to_owned(),
            depth_policy: DepthPolicy::default(),
        }
    }
}

impl Config {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// A builder preloaded with these settings. The destination is left at
    /// its default and can still be changed.
    pub fn builder(&self) -> LoggerBuilder {
        LoggerBuilder::new()
            .env(self.env.clone())
            .source(self.source.clone())
            .level(self.level)
            .add_source(self.add_source)
            .sensitive_keys(self.sensitive_keys.iter().cloned())
            .debug_mode(self.with_debug)
            .redaction_marker(self.redact_message.clone())
            .depth_policy(self.depth_policy)
    }
}
