//! Global configuration management for octaudit
//!
//! This module handles the global user configuration file
//! (`~/.octaudit/config.toml`) which stores the Octopus server connection
//! settings and the list of projects to audit by default.
//!
//! # Configuration File Location
//!
//! - **Unix/macOS**: `~/.octaudit/config.toml`
//! - **Windows**: `%LOCALAPPDATA%\octaudit\config.toml`
//! - **Override**: `OCTAUDIT_CONFIG` environment variable, or `--config` flag
//!
//! # File Format
//!
//! ```toml
//! # Connection settings (flags and environment variables override these)
//! server_url = "https://octopus.example.com"
//! api_key = "API-XXXXXXXXXXXXXXXX"
//!
//! # Projects audited when no --project-name is given
//! [[projects]]
//! name = "Billing"
//! config_dir = "/srv/deploy/billing"
//!
//! [[projects]]
//! name = "Storefront"
//! config_dir = "/srv/deploy/storefront"
//! ```
//!
//! # Credential Resolution
//!
//! Command-line flags (and their environment variables) take precedence over
//! the config file. A server URL or API key that is still missing after the
//! merge is a fatal startup error - nothing is analyzed without credentials.
//! Keep API keys out of version control; this file belongs to the user, not
//! the repository.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::core::AuditError;

/// Environment variable overriding the config file location
pub const CONFIG_PATH_ENV: &str = "OCTAUDIT_CONFIG";

/// One audit target: an Octopus project plus its local config directory
///
/// The config directory is where the project's `Web.Release.config` and
/// `Web.config` live. Entries are supplied by the user and never mutated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProjectEntry {
    /// Project name as it appears on the Octopus server
    pub name: String,
    /// Directory holding the project's config files
    pub config_dir: PathBuf,
}

/// Global configuration for octaudit
///
/// Everything is optional in the file itself; completeness is only enforced
/// once flags and environment variables have been merged in (see
/// [`GlobalConfig::resolve_credentials`]).
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GlobalConfig {
    /// Octopus server base URL, e.g. `https://octopus.example.com`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_url: Option<String>,

    /// Octopus API key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Projects audited when the command line names none
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub projects: Vec<ProjectEntry>,
}

impl GlobalConfig {
    /// Load configuration from the default location
    ///
    /// A missing file is not an error; it yields the default (empty)
    /// configuration so first-run users can drive everything from flags.
    ///
    /// # Errors
    ///
    /// Returns an error if the default path cannot be determined, or the file
    /// exists but cannot be read or parsed.
    pub async fn load() -> Result<Self> {
        let path = Self::default_path()?;
        if path.exists() {
            Self::load_from(&path).await
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from an optional explicit path
    ///
    /// With a path (from `--config` or `OCTAUDIT_CONFIG`), the file must load
    /// from there; without one, falls back to [`GlobalConfig::load`].
    pub async fn load_with_optional(path: Option<PathBuf>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from(&path).await,
            None => Self::load().await,
        }
    }

    /// Load configuration from a specific file path
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or contains invalid TOML.
    pub async fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        toml::from_str(&content).map_err(|e| {
            AuditError::ConfigParseError {
                file: path.display().to_string(),
                reason: e.to_string(),
            }
            .into()
        })
    }

    /// Save configuration to a specific file path, creating parent directories
    ///
    /// # Errors
    ///
    /// Returns an error if directories cannot be created, serialization
    /// fails, or the file cannot be written.
    pub async fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, content)
            .await
            .with_context(|| format!("Failed to write config to {}", path.display()))?;

        Ok(())
    }

    /// The platform default config file path, honoring `OCTAUDIT_CONFIG`
    ///
    /// # Errors
    ///
    /// Returns an error if the home (or local data) directory cannot be
    /// determined.
    pub fn default_path() -> Result<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
            return Ok(PathBuf::from(path));
        }

        let config_dir = if cfg!(target_os = "windows") {
            dirs::data_local_dir()
                .ok_or_else(|| anyhow::anyhow!("Unable to determine local data directory"))?
                .join("octaudit")
        } else {
            dirs::home_dir()
                .ok_or_else(|| anyhow::anyhow!("Unable to determine home directory"))?
                .join(".octaudit")
        };

        Ok(config_dir.join("config.toml"))
    }

    /// Merge flag/environment overrides with the file and require completeness
    ///
    /// The override values win when present. Returns the final
    /// `(server_url, api_key)` pair.
    ///
    /// # Errors
    ///
    /// [`AuditError::MissingServerUrl`] / [`AuditError::MissingApiKey`] when a
    /// value is absent from both the overrides and the file. These abort the
    /// run before any project is analyzed.
    pub fn resolve_credentials(
        &self,
        server_url_override: Option<&str>,
        api_key_override: Option<&str>,
    ) -> Result<(String, String)> {
        let server_url = server_url_override
            .filter(|s| !s.trim().is_empty())
            .or(self.server_url.as_deref())
            .filter(|s| !s.trim().is_empty())
            .ok_or(AuditError::MissingServerUrl)?;

        let api_key = api_key_override
            .filter(|s| !s.trim().is_empty())
            .or(self.api_key.as_deref())
            .filter(|s| !s.trim().is_empty())
            .ok_or(AuditError::MissingApiKey)?;

        Ok((server_url.to_string(), api_key.to_string()))
    }
}
