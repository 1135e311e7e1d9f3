pub mod merge;
pub mod schema;

pub use merge::DEFAULT_BASE_URL;
pub use schema::*;

use crate::cli::Cli;
use anyhow::Context;
use std::path::Path;

/// Environment variable that overrides the backend base URL.
pub const BASE_URL_ENV: &str = "ENROLLMENTS_BASE_URL";

/// Load configuration by merging config file, environment, and CLI sources.
/// Precedence: CLI > environment > config file > defaults.
///
/// The config file is `--config` if given, else the global config. A missing
/// global file is fine; a missing or malformed `--config` file is an error.
pub fn load_config(cli: &Cli) -> anyhow::Result<AppConfig> {
    // Layer 1: config file
    let file = match &cli.config {
        Some(path) => load_toml_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => load_global_config(),
    };

    // Layer 2: environment
    let env = env_to_partial(std::env::var(BASE_URL_ENV).ok());

    // Layer 3: CLI args
    let cli_partial = cli_to_partial(cli);

    let config = cli_partial
        .with_fallback(env)
        .with_fallback(file)
        .finalize()?;

    Ok(config)
}

/// Load global config from the platform-specific config directory.
/// Returns empty PartialConfig if not found or unreadable.
fn load_global_config() -> PartialConfig {
    let Some(path) = global_config_path() else {
        tracing::debug!("Could not determine global config directory");
        return PartialConfig::default();
    };
    load_optional_config(&path)
}

/// Load `path` if it exists. A broken file is logged and skipped.
fn load_optional_config(path: &Path) -> PartialConfig {
    if !path.exists() {
        tracing::debug!("No config file at {}, using defaults", path.display());
        return PartialConfig::default();
    }
    match load_toml_file(path) {
        Ok(partial) => partial,
        Err(e) => {
            tracing::warn!("Ignoring global config: {:#}", e);
            PartialConfig::default()
        }
    }
}

/// Load and parse a TOML config file into a PartialConfig.
pub fn load_toml_file(path: &Path) -> anyhow::Result<PartialConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(crate::error::ConfigError::from)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let config_file = toml::from_str::<ConfigFile>(&contents).map_err(|e| {
        crate::error::ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        }
    })?;
    tracing::info!("Loaded config from {}", path.display());
    Ok(config_file.to_partial())
}

/// Resolve the platform-specific global config path.
/// Linux: ~/.config/enrollments/enrollments.toml
/// macOS: ~/Library/Application Support/enrollments/enrollments.toml
fn global_config_path() -> Option<std::path::PathBuf> {
    directories::ProjectDirs::from("", "", "enrollments")
        .map(|dirs| dirs.config_dir().join("enrollments.toml"))
}

fn env_to_partial(base_url: Option<String>) -> PartialConfig {
    PartialConfig {
        base_url: base_url.filter(|url| !url.trim().is_empty()),
        ..Default::default()
    }
}

/// Convert CLI arguments to a PartialConfig for merging.
fn cli_to_partial(cli: &Cli) -> PartialConfig {
    PartialConfig {
        base_url: cli.base_url.clone(),
        request_timeout_secs: cli.timeout,
        ..Default::default()
    }
}
