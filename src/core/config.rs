//! Configuration file management.
//!
//! Handles reading and validating `keyward.toml` and the environment
//! variables that override it. Credentials never come from the file.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;
use zeroize::Zeroizing;

use crate::core::constants::{self, env};
use crate::error::{ConfigError, Result};

/// Tool configuration stored in `keyward.toml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Where the provider lives
    #[serde(default)]
    pub cloud: CloudConfig,
    /// Defaults for the create-key-with-alias action
    #[serde(default)]
    pub alias_import: AliasImportConfig,
}

/// Region, project and endpoint settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloudConfig {
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub project_id: String,
    /// Domain suffix for derived endpoints (`kms.<region>.<domain>`)
    #[serde(default = "default_domain")]
    pub domain: String,
    /// Full KMS endpoint, overriding the derived one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kms_endpoint: Option<String>,
    /// Path-style OBS endpoint, overriding virtual-host addressing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub obs_endpoint: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Static inputs of the create-key-with-alias action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AliasImportConfig {
    #[serde(default)]
    pub key_aliases: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub obs_url: Option<String>,
    /// Pause between key+alias creations, in milliseconds
    #[serde(default = "default_pace_ms")]
    pub pace_ms: u64,
}

fn default_domain() -> String {
    constants::DEFAULT_DOMAIN.to_string()
}

fn default_timeout_secs() -> u64 {
    constants::DEFAULT_TIMEOUT_SECS
}

fn default_pace_ms() -> u64 {
    constants::DEFAULT_CREATE_PACE.as_millis() as u64
}

impl Default for CloudConfig {
    fn default() -> Self {
        Self {
            region: String::new(),
            project_id: String::new(),
            domain: default_domain(),
            kms_endpoint: None,
            obs_endpoint: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for AliasImportConfig {
    fn default() -> Self {
        Self {
            key_aliases: Vec::new(),
            obs_url: None,
            pace_ms: default_pace_ms(),
        }
    }
}

impl CloudConfig {
    /// KMS base URL, without the version path.
    pub fn kms_base_url(&self) -> String {
        match &self.kms_endpoint {
            Some(endpoint) => endpoint.trim_end_matches('/').to_string(),
            None => format!("https://kms.{}.{}", self.region, self.domain),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl AliasImportConfig {
    pub fn pace(&self) -> Duration {
        Duration::from_millis(self.pace_ms)
    }
}

impl Config {
    /// Path to the configuration file in the current directory
    pub fn default_path() -> PathBuf {
        PathBuf::from(constants::CONFIG_FILE)
    }

    /// Load configuration and apply environment overrides.
    ///
    /// An explicit `path` must exist. Without one, a missing `keyward.toml`
    /// yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` for a missing explicit path, or
    /// `ConfigError::Parse` if the TOML is malformed.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::load_from(path)?,
            None => {
                let path = Self::default_path();
                if path.exists() {
                    Self::load_from(&path)?
                } else {
                    debug!("no config file, using defaults");
                    Self::default()
                }
            }
        };
        config.apply_env(|name| std::env::var(name).ok());
        Ok(config)
    }

    /// Load configuration from a specific file, without overrides.
    pub fn load_from(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "loading config");

        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()).into());
        }
        let contents = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        let config: Self = toml::from_str(&contents).map_err(ConfigError::Parse)?;

        debug!(
            region = %config.cloud.region,
            aliases = config.alias_import.key_aliases.len(),
            "config loaded"
        );
        Ok(config)
    }

    /// Override region and project id from the environment.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(region) = lookup(env::DEFAULT_REGION).filter(|v| !v.is_empty()) {
            self.cloud.region = region;
        }
        if let Some(project) = lookup(env::PROJECT_ID).filter(|v| !v.is_empty()) {
            self.cloud.project_id = project;
        }
    }

    /// Validate what the provider clients need.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingField` or `ConfigError::InvalidValue`.
    pub fn validate(&self) -> Result<()> {
        debug!("validating config");

        if self.cloud.region.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "region" }.into());
        }
        if self.cloud.project_id.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "project_id",
            }
            .into());
        }
        if self.cloud.domain.trim().is_empty() && self.cloud.kms_endpoint.is_none() {
            return Err(ConfigError::InvalidValue {
                field: "domain",
                reason: "empty domain without a kms_endpoint".to_string(),
            }
            .into());
        }
        if self.cloud.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "timeout_secs",
                reason: "must be greater than zero".to_string(),
            }
            .into());
        }
        Ok(())
    }
}

/// Access key pair used to sign requests.
pub struct Credentials {
    pub access_key: String,
    pub secret_key: Zeroizing<String>,
}

impl Credentials {
    pub fn new(access_key: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            access_key: access_key.into(),
            secret_key: Zeroizing::new(secret_key.into()),
        }
    }

    /// Read the key pair from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read the key pair through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingField` naming the absent variable.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let access_key = lookup(env::ACCESS_KEY_ID)
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::MissingField {
                field: env::ACCESS_KEY_ID,
            })?;
        let secret_key = lookup(env::SECRET_ACCESS_KEY)
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::MissingField {
                field: env::SECRET_ACCESS_KEY,
            })?;
        Ok(Self::new(access_key, secret_key))
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key", &self.access_key)
            .field("secret_key", &"<redacted>")
            .finish()
    }
}
