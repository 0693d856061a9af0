//! Building a [`Config`] from command-line options.

use std::path::PathBuf;

use clap::ArgMatches;
use tracing::{error, info};

use ordo_core::profiles::parse_profiles;
use ordo_core::sources::DEFAULT_ORDINAL;
use ordo_core::{Base64Handler, Config, LocationsFactory, MapSource, OrdoError, events, secrets};

/// Name of the source holding `--set` values.
pub const COMMAND_LINE_SOURCE: &str = "CommandLine";

/// `--set` outranks the environment.
pub const COMMAND_LINE_ORDINAL: i32 = 400;

/// `~/.ordo/config.toml`
pub const USER_FILE_ORDINAL: i32 = 250;

/// `./.ordo/config.toml`, above the user file.
pub const PROJECT_FILE_ORDINAL: i32 = 260;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("Invalid --{flag} value '{value}': expected NAME=VALUE")]
    InvalidPair { flag: &'static str, value: String },

    #[error("Property '{name}' is not defined")]
    NotFound { name: String },
}

impl OrdoError for CliError {
    fn error_code(&self) -> &'static str {
        match self {
            CliError::InvalidPair { .. } => "CLI_INVALID_PAIR",
            CliError::NotFound { .. } => "CLI_PROPERTY_NOT_FOUND",
        }
    }

    fn is_user_error(&self) -> bool {
        true
    }
}

/// Split `NAME=VALUE` at the first `=`. The name must not be empty.
pub fn parse_pair(flag: &'static str, raw: &str) -> Result<(String, String), CliError> {
    match raw.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.to_string()))
        }
        _ => Err(CliError::InvalidPair {
            flag,
            value: raw.to_string(),
        }),
    }
}

fn pairs(matches: &ArgMatches, flag: &'static str) -> Result<Vec<(String, String)>, CliError> {
    matches
        .get_many::<String>(flag)
        .into_iter()
        .flatten()
        .map(|raw| parse_pair(flag, raw))
        .collect()
}

fn values<'m>(matches: &'m ArgMatches, flag: &str) -> impl Iterator<Item = &'m String> {
    matches.get_many::<String>(flag).into_iter().flatten()
}

/// Assemble the config described by the global options.
///
/// Sources, lowest precedence first:
/// `~/.ordo/config.toml` (250), `./.ordo/config.toml` (260), each `--file`
/// (100 unless the file sets `config_ordinal`), files listed in
/// `ordo.config.locations`, the environment (300) and `--set` (400).
/// `${base64::...}` references are decoded.
pub fn build_config(matches: &ArgMatches) -> Result<Config, Box<dyn std::error::Error>> {
    let mut builder = Config::builder()
        .with_source_factory(LocationsFactory::new())
        .with_secret_handler(Base64Handler);

    if !matches.get_flag("no-env") {
        builder = builder.with_env();
    }
    if let Some(home) = dirs::home_dir() {
        builder = builder.with_optional_toml_file(home.join(".ordo").join("config.toml"), USER_FILE_ORDINAL);
    }
    builder = builder.with_optional_toml_file(
        PathBuf::from(".ordo").join("config.toml"),
        PROJECT_FILE_ORDINAL,
    );
    for file in values(matches, "file") {
        builder = builder.with_toml_file(file, DEFAULT_ORDINAL);
    }

    let sets = pairs(matches, "set")?;
    if !sets.is_empty() {
        builder = builder.with_source(MapSource::new(COMMAND_LINE_SOURCE, COMMAND_LINE_ORDINAL, sets));
    }

    let profiles: Vec<String> = values(matches, "profile")
        .flat_map(|p| parse_profiles(p))
        .collect();
    if !profiles.is_empty() {
        builder = builder.with_profiles(profiles);
    }

    builder = builder
        .with_secret_keys(values(matches, "secret").cloned())
        .with_relocations(pairs(matches, "relocate")?)
        .with_fallbacks(pairs(matches, "fallback")?);

    if matches.get_flag("log-lookups") {
        builder = builder.with_lookup_logging(true);
    }

    match builder.build() {
        Ok(config) => {
            info!(
                event = "cli.config_build_completed",
                sources = config.sources().len(),
                profiles = ?config.profiles()
            );
            Ok(config)
        }
        Err(e) => {
            eprintln!("❌ Failed to build configuration: {}", e);
            error!(event = "cli.config_build_failed", error = %e, code = e.error_code());
            events::log_app_error(&e);
            Err(e.into())
        }
    }
}

/// Run `f` with secrets unlocked when `--unlock` was given.
pub fn with_secret_access<T>(matches: &ArgMatches, f: impl FnOnce() -> T) -> T {
    if matches.get_flag("unlock") {
        secrets::with_unlocked(f)
    } else {
        f()
    }
}
