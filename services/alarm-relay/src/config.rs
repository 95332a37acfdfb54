//! Configuration for the alarm relay

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::format::{FormatOptions, DEFAULT_CONSOLE_URL};

/// Environment variable holding the Slack webhook URL
pub const WEBHOOK_URL_VAR: &str = "SLACK_WEBHOOK";
/// Environment variable overriding the request timeout, e.g. `"5s"`
pub const TIMEOUT_VAR: &str = "ALARM_RELAY_TIMEOUT";
/// Environment variable overriding the console base URL
pub const CONSOLE_URL_VAR: &str = "ALARM_RELAY_CONSOLE_URL";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Usually left out of the file and resolved from `SLACK_WEBHOOK`
    #[serde(default)]
    pub webhook_url: Option<String>,
    #[serde(default = "default_console_url")]
    pub console_url: String,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default = "default_timeout", with = "humantime_serde")]
    pub timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            webhook_url: None,
            console_url: default_console_url(),
            text: None,
            timeout: default_timeout(),
        }
    }
}

impl Config {
    /// Fill environment-provided settings from the process environment
    pub fn resolve_secrets(&mut self) -> crate::Result<()> {
        self.resolve_secrets_with(|name| std::env::var(name).ok())
    }

    /// Fill environment-provided settings through `lookup`
    ///
    /// A non-blank webhook URL from the file is kept; a missing or blank one
    /// falls back to the environment. The timeout and console URL variables
    /// override the file when set.
    pub fn resolve_secrets_with<F>(&mut self, lookup: F) -> crate::Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if self.webhook_url.as_deref().map_or(true, |url| url.trim().is_empty()) {
            self.webhook_url = lookup(WEBHOOK_URL_VAR);
        }

        if let Some(raw) = lookup(TIMEOUT_VAR) {
            self.timeout = humantime::parse_duration(&raw).map_err(|e| {
                crate::RelayError::Config(format!("Invalid {} {:?}: {}", TIMEOUT_VAR, raw, e))
            })?;
        }

        if let Some(console_url) = lookup(CONSOLE_URL_VAR) {
            self.console_url = console_url;
        }

        tracing::debug!(
            "Resolved configuration: webhook_url set={}, timeout={}",
            self.webhook_url.is_some(),
            humantime::format_duration(self.timeout)
        );
        Ok(())
    }

    /// The webhook URL, or a configuration error when it is missing or blank
    pub fn validated_webhook_url(&self) -> crate::Result<&str> {
        match self.webhook_url.as_deref().map(str::trim) {
            Some(url) if !url.is_empty() => Ok(url),
            _ => Err(crate::RelayError::Config(format!(
                "{} is not set",
                WEBHOOK_URL_VAR
            ))),
        }
    }

    pub fn format_options(&self) -> FormatOptions {
        FormatOptions {
            console_url: self.console_url.clone(),
            text: self.text.clone(),
        }
    }
}

fn default_console_url() -> String {
    DEFAULT_CONSOLE_URL.to_string()
}

fn default_timeout() -> Duration {
    Duration::from_secs(10)
}

/// Load configuration from a JSON file
pub fn load_config(path: &Path) -> crate::Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        crate::RelayError::Config(format!("Failed to read config file {:?}: {}", path, e))
    })?;
    let config: Config = serde_json::from_str(&content)?;
    Ok(config)
}
