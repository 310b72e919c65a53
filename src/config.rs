//! Configuration module for the chat client.

use std::path::Path;

use serde::Deserialize;
use url::Url;

use crate::{ChatError, Result};

/// Environment variable that overrides `server.url`.
pub const SERVER_URL_ENV: &str = "WSCHAT_SERVER_URL";

/// Chat server connection configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// WebSocket URL of the chat server (`ws://` or `wss://`).
    #[serde(default = "default_server_url")]
    pub url: String,
}

fn default_server_url() -> String {
    "ws://localhost:6969".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            url: default_server_url(),
        }
    }
}

impl ServerConfig {
    /// Parse and check the configured URL.
    pub fn parsed_url(&self) -> Result<Url> {
        let url = Url::parse(&self.url)?;
        match url.scheme() {
            "ws" | "wss" => Ok(url),
            other => Err(ChatError::Config(format!(
                "server url must use ws or wss, got {other}"
            ))),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Optional log file, written in addition to stderr.
    #[serde(default)]
    pub file: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::parse(&content)
    }

    /// Load configuration from a TOML file and apply environment variable overrides.
    pub fn load_with_env<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| ChatError::Config(format!("config parse error: {e}")))
    }

    /// Apply environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `WSCHAT_SERVER_URL`: Override the server URL
    pub fn apply_env_overrides(&mut self) {
        self.override_server_url(std::env::var(SERVER_URL_ENV).ok());
    }

    fn override_server_url(&mut self, url: Option<String>) {
        if let Some(url) = url.filter(|u| !u.is_empty()) {
            self.server.url = url;
        }
    }
}
