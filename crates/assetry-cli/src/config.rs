//! CLI configuration.
//!
//! `AssetryConfig` is read from a TOML file and then patched from the
//! environment. The file is looked up in this order:
//!
//! 1. the `--config` argument
//! 2. `$ASSETRY_CONFIG`
//! 3. `<config dir>/assetry/config.toml`
//!
//! A missing file is not an error; defaults apply.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use assetry_client::ClientConfig;
use assetry_client::config::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT};

use crate::error::{Error, Result};

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "ASSETRY_CONFIG";
/// Overrides `api.base_url`.
pub const API_URL_ENV: &str = "ASSETRY_API_URL";
/// Overrides `api.token`.
pub const API_TOKEN_ENV: &str = "ASSETRY_API_TOKEN";
/// Overrides `api.timeout_secs`.
pub const API_TIMEOUT_ENV: &str = "ASSETRY_API_TIMEOUT_SECS";
/// Overrides `picker.require_identifier`.
pub const REQUIRE_IDENTIFIER_ENV: &str = "ASSETRY_REQUIRE_IDENTIFIER";

const PROJECT_NAME: &str = "assetry";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetryConfig {
    /// Masters API connection.
    pub api: ApiConfig,
    /// Picker behaviour.
    pub picker: PickerConfig,
}

/// `[api]` table.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// API root.
    pub base_url: String,
    /// Bearer token.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            token: None,
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
        }
    }
}

impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "***"))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// `[picker]` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickerConfig {
    /// Fail `resolve` when no identifier comes back.
    pub require_identifier: bool,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            require_identifier: true,
        }
    }
}

impl AssetryConfig {
    /// Project name, used in paths and hints.
    pub fn project_name() -> &'static str {
        PROJECT_NAME
    }

    /// `<config dir>/assetry/config.toml`, if the platform has a config dir.
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(PROJECT_NAME).join("config.toml"))
    }

    /// Resolve the config file location from the process environment.
    pub fn resolve_config_path(explicit: Option<&str>) -> Option<PathBuf> {
        Self::resolve_config_path_with(explicit, std::env::var(CONFIG_ENV).ok())
    }

    /// Resolve the config file location given the value of `$ASSETRY_CONFIG`.
    pub fn resolve_config_path_with(
        explicit: Option<&str>,
        from_env: Option<String>,
    ) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(PathBuf::from(path));
        }
        if let Some(path) = from_env.filter(|p| !p.trim().is_empty()) {
            return Some(PathBuf::from(path));
        }
        Self::default_config_path()
    }

    /// Load the config file (if any) and apply environment overrides.
    pub fn load(explicit: Option<&str>) -> Result<Self> {
        let mut config = match Self::resolve_config_path(explicit) {
            Some(path) if path.exists() => Self::from_file(&path)?,
            Some(path) => {
                log::debug!("no config file at {}, using defaults", path.display());
                Self::default()
            }
            None => Self::default(),
        };
        config.apply_overrides(|name| std::env::var(name).ok())?;
        Ok(config)
    }

    /// Parse a config file without applying overrides.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::io_with_path(e, path))?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| Error::config(format!("failed to parse {}: {e}", path.display())))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that parse but cannot work.
    pub fn validate(&self) -> Result<()> {
        if self.api.timeout_secs == 0 {
            return Err(Error::config("api.timeout_secs must be at least 1"));
        }
        Ok(())
    }

    /// Patch values from environment-style lookups. Blank values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(url) = get(API_URL_ENV) {
            self.api.base_url = url;
        }
        if let Some(token) = get(API_TOKEN_ENV) {
            self.api.token = Some(token);
        }
        if let Some(secs) = get(API_TIMEOUT_ENV) {
            self.api.timeout_secs = secs
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| {
                    Error::config(format!(
                        "{API_TIMEOUT_ENV} must be at least 1 second, got '{secs}'"
                    ))
                })?;
        }
        if let Some(flag) = get(REQUIRE_IDENTIFIER_ENV) {
            self.picker.require_identifier = parse_bool(&flag).ok_or_else(|| {
                Error::config(format!(
                    "{REQUIRE_IDENTIFIER_ENV} must be true or false, got '{flag}'"
                ))
            })?;
        }
        Ok(())
    }

    /// Client settings for the masters API.
    pub fn to_client_config(&self) -> ClientConfig {
        let config = ClientConfig::new(self.api.base_url.clone())
            .with_timeout(Duration::from_secs(self.api.timeout_secs));
        match &self.api.token {
            Some(token) => config.with_token(token.clone()),
            None => config,
        }
    }

    /// Render as a TOML document.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }

    /// The environment variables that reproduce this config.
    pub fn to_env_vars(&self) -> Vec<(String, String)> {
        let mut vars = vec![(API_URL_ENV.to_string(), self.api.base_url.clone())];
        if let Some(token) = &self.api.token {
            vars.push((API_TOKEN_ENV.to_string(), token.clone()));
        }
        vars.push((API_TIMEOUT_ENV.to_string(), self.api.timeout_secs.to_string()));
        vars.push((
            REQUIRE_IDENTIFIER_ENV.to_string(),
            self.picker.require_identifier.to_string(),
        ));
        vars
    }
}

pub(crate) fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
