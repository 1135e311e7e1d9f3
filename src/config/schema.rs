use serde::Deserialize;
use std::path::PathBuf;

/// The TOML file structure for enrollments.toml.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub api: Option<ApiConfig>,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Deserialize)]
pub struct ApiConfig {
    pub base_url: Option<String>,
    /// Per-request timeout. Unset means requests may wait indefinitely.
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    /// Log file used while the TUI owns the terminal.
    pub file: Option<String>,
}

/// Fully-resolved runtime configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub base_url: String,
    pub request_timeout_secs: Option<u64>,
    pub log_path: PathBuf,
}

/// Partial config used during merge. All fields are Option so that
/// missing fields don't override lower-priority values.
#[derive(Debug, Clone, Default)]
pub struct PartialConfig {
    pub base_url: Option<String>,
    pub request_timeout_secs: Option<u64>,
    pub log_path: Option<PathBuf>,
}

impl ConfigFile {
    pub fn to_partial(&self) -> PartialConfig {
        let api = self.api.as_ref();
        PartialConfig {
            base_url: api.and_then(|a| a.base_url.clone()),
            request_timeout_secs: api.and_then(|a| a.timeout_secs),
            log_path: self
                .logging
                .as_ref()
                .and_then(|l| l.file.as_ref())
                .map(PathBuf::from),
        }
    }
}
