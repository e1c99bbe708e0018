//! Keyward - governance and remediation for Huawei Cloud KMS keys.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use keyward::cli::output;
use keyward::cli::{execute, Cli, LogFormat};
use keyward::core::constants::env;
use keyward::error::{ConfigError, Error};

fn main() {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_env(env::LOG).unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("keyward=debug")
        } else {
            EnvFilter::new("keyward=info")
        }
    });

    // Logs go to stderr so --json output stays parseable.
    let registry = tracing_subscriber::registry().with(filter);
    match cli.log_format {
        LogFormat::Text => registry
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init(),
    }

    if let Err(e) = execute(cli.command, cli.config) {
        let suggestion = match &e {
            Error::Config(ConfigError::MissingField { field })
                if *field == env::ACCESS_KEY_ID || *field == env::SECRET_ACCESS_KEY =>
            {
                Some("set HUAWEI_ACCESS_KEY_ID and HUAWEI_SECRET_ACCESS_KEY")
            }
            Error::Config(ConfigError::MissingField { field: "region" }) => {
                Some("set [cloud] region in keyward.toml or HUAWEI_DEFAULT_REGION")
            }
            Error::Config(ConfigError::MissingField { field: "project_id" }) => {
                Some("set [cloud] project_id in keyward.toml or HUAWEI_PROJECT_ID")
            }
            Error::Incomplete { .. } => Some("rerun with --verbose for per-key details"),
            _ => None,
        };

        output::error(&e.to_string());
        if let Some(hint) = suggestion {
            output::hint(hint);
        }
        std::process::exit(1);
    }
}
