//! Application settings, read from `settings.toml`.
//!
//! Every field has a default, so the file itself is optional: with no
//! configuration at all the app serves the demo dataset on
//! 127.0.0.1:5000.

use config::{Config, ConfigError, File};
use serde::Deserialize;

/// Fallback cookie secret for local development.
pub const DEV_SECRET_KEY: &str = "dev-secret-key-change-in-production";

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct App {
    /// Log level for the env filter.
    pub level: String,
}

impl Default for App {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Server {
    pub bind: Option<String>,
    pub port: u16,
    /// Path of the shared JSON document.
    pub data_file: String,
    /// Cookie signing secret; the SECRET_KEY env var wins over this.
    pub secret_key: Option<String>,
}

impl Default for Server {
    fn default() -> Self {
        Self {
            bind: None,
            port: 5000,
            data_file: "finance_data.json".to_string(),
            secret_key: None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub app: App,
    pub server: Server,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("settings").required(false))
            .build()?;

        settings.try_deserialize()
    }
}
