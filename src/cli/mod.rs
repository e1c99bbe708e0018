//! Command-line interface.

pub mod alias;
pub mod completions;
pub mod keys;
pub mod output;
pub mod remediate;

use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

use crate::core::actions::Action;
use crate::core::config::{Config, Credentials};
use crate::core::filter::{Filter, ValueFilter};
use crate::core::provider::huawei::{HuaweiKms, HuaweiObs};
use crate::error::Result;

/// Keyward - governance and remediation for Huawei Cloud KMS keys.
#[derive(Parser)]
#[command(
    name = "keyward",
    about = "Governance and remediation for Huawei Cloud KMS keys",
    version
)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to keyward.toml
    #[arg(short, long, global = true, env = "KEYWARD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log line format
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Command,
}

/// Log line formats.
#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

/// Which keys a command works on.
#[derive(Args, Debug, Clone, Default)]
pub struct Selection {
    /// Only consider these key ids
    #[arg(long = "id", value_name = "KEY_ID")]
    pub ids: Vec<String>,

    /// Value filter (field=v, field!=v, field=a|b, field?, !field)
    #[arg(long = "filter", value_name = "EXPR")]
    pub filters: Vec<ValueFilter>,

    /// all_keys_disable filter, same syntax as --filter
    #[arg(long = "all-keys-disable", value_name = "EXPR")]
    pub all_keys_disable: Vec<ValueFilter>,
}

impl Selection {
    pub fn filters(&self) -> Vec<Filter> {
        self.filters
            .iter()
            .cloned()
            .map(Filter::Value)
            .chain(self.all_keys_disable.iter().cloned().map(Filter::AllKeysDisable))
            .collect()
    }
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// List keys with their tags
    List {
        #[command(flatten)]
        selection: Selection,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Enable rotation on eligible keys
    EnableRotation {
        #[command(flatten)]
        selection: Selection,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Disable rotation on eligible keys
    DisableRotation {
        #[command(flatten)]
        selection: Selection,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Enable keys
    EnableKey {
        #[command(flatten)]
        selection: Selection,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Disable keys
    DisableKey {
        #[command(flatten)]
        selection: Selection,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Create a key and alias for every missing alias
    CreateKeyWithAlias {
        /// Alias to provision (repeatable; replaces the configured list)
        #[arg(long = "alias", value_name = "NAME")]
        aliases: Vec<String>,
        /// OBS manifest URL (replaces the configured one)
        #[arg(long)]
        obs_url: Option<String>,
        /// Pause between creations in milliseconds
        #[arg(long)]
        pace_ms: Option<u64>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Configuration plus the provider clients built from it.
pub struct Session {
    pub config: Config,
    pub kms: HuaweiKms,
    pub obs: HuaweiObs,
}

impl Session {
    /// Load and validate configuration, then build the clients.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` for invalid configuration or missing
    /// credentials.
    pub fn open(path: Option<&Path>) -> Result<Self> {
        let config = Config::load(path)?;
        config.validate()?;
        let kms = HuaweiKms::new(&config.cloud, Credentials::from_env()?)?;
        let obs = HuaweiObs::new(&config.cloud, Credentials::from_env()?)?;
        Ok(Self { config, kms, obs })
    }
}

/// Execute a command.
pub fn execute(command: Command, config: Option<PathBuf>) -> Result<()> {
    use Command::*;

    let path = config.as_deref();
    let act = |action: Action, selection: &Selection, json: bool| -> Result<()> {
        let session = Session::open(path)?;
        remediate::execute(&session.kms, action, selection, json)
    };

    match command {
        List { selection, json } => keys::list(&Session::open(path)?.kms, &selection, json),
        EnableRotation { selection, json } => act(Action::EnableKeyRotation, &selection, json),
        DisableRotation { selection, json } => act(Action::DisableKeyRotation, &selection, json),
        EnableKey { selection, json } => act(Action::EnableKey, &selection, json),
        DisableKey { selection, json } => act(Action::DisableKey, &selection, json),
        CreateKeyWithAlias {
            aliases,
            obs_url,
            pace_ms,
            json,
        } => alias::execute(&Session::open(path)?, aliases, obs_url, pace_ms, json),
        Completions { shell } => completions::execute(shell),
    }
}
