//! `AppConfig` struct and TOML read/write.

use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

/// Environment variable overriding `account.username`.
pub const USERNAME_ENV: &str = "SDJSON_USERNAME";
/// Environment variable overriding `account.password`.
pub const PASSWORD_ENV: &str = "SDJSON_PASSWORD";

/// Top-level application configuration.
#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// Schedules Direct account.
    #[serde(default)]
    pub account: AccountConfig,
    /// Endpoint overrides.
    #[serde(default)]
    pub api: ApiConfig,
}

/// Account credentials.
#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AccountConfig {
    /// Account name.
    #[serde(default)]
    pub username: String,
    /// Clear-text password; hashed by the client before use.
    #[serde(default)]
    pub password: String,
}

/// Endpoint overrides.
#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ApiConfig {
    /// Base URL (default: `https://json.schedulesdirect.org/`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// API version (default: `20141201`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,
}

impl AppConfig {
    /// Loads config from a TOML file. Returns default if file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Saves config to a TOML file, creating parent directories if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation or file write fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self).context("failed to serialize config to TOML")?;
        std::fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
    }

    /// Replaces account fields with the values of `SDJSON_USERNAME` and
    /// `SDJSON_PASSWORD` when they are set.
    pub fn apply_env(&mut self) {
        self.apply_overrides(
            std::env::var(USERNAME_ENV).ok(),
            std::env::var(PASSWORD_ENV).ok(),
        );
    }

    fn apply_overrides(&mut self, username: Option<String>, password: Option<String>) {
        if let Some(username) = username.filter(|v| !v.is_empty()) {
            self.account.username = username;
        }
        if let Some(password) = password.filter(|v| !v.is_empty()) {
            self.account.password = password;
        }
    }

    /// Checks that both credentials are present.
    ///
    /// # Errors
    ///
    /// Returns an error naming the missing field and how to set it.
    pub fn require_account(&self) -> Result<&AccountConfig> {
        if self.account.username.is_empty() {
            bail!("account.username is not set (config file or {USERNAME_ENV})");
        }
        if self.account.password.is_empty() {
            bail!("account.password is not set (config file or {PASSWORD_ENV})");
        }
        Ok(&self.account)
    }
}
