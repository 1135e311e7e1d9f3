use super::schema::{AppConfig, PartialConfig};
use crate::error::ConfigError;
use std::path::PathBuf;

/// Backend used when no layer names one.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3001";

impl PartialConfig {
    /// Merge self with a lower-priority fallback.
    /// Self's non-None values take precedence.
    pub fn with_fallback(self, fallback: PartialConfig) -> PartialConfig {
        PartialConfig {
            base_url: self.base_url.or(fallback.base_url),
            request_timeout_secs: self.request_timeout_secs.or(fallback.request_timeout_secs),
            log_path: self.log_path.or(fallback.log_path),
        }
    }

    /// Convert to AppConfig, filling any remaining gaps with defaults.
    ///
    /// The base URL must be an absolute `http`/`https` URL. A timeout, if
    /// set, must be at least one second.
    pub fn finalize(self) -> Result<AppConfig, ConfigError> {
        let base_url = self
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        validate_base_url(&base_url)?;

        if self.request_timeout_secs == Some(0) {
            return Err(ConfigError::InvalidValue {
                field: "timeout_secs".to_string(),
                reason: "must be at least 1 second".to_string(),
            });
        }

        let log_path = self.log_path.unwrap_or_else(default_log_path);

        Ok(AppConfig {
            base_url,
            request_timeout_secs: self.request_timeout_secs,
            log_path,
        })
    }
}

fn validate_base_url(raw: &str) -> Result<(), ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidValue {
        field: "base_url".to_string(),
        reason,
    };
    let url = reqwest::Url::parse(raw).map_err(|e| invalid(format!("`{raw}`: {e}")))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(invalid(format!("unsupported scheme `{other}`"))),
    }
}

/// `<data dir>/enrollments.log`, or `./enrollments.log` if the platform has none.
fn default_log_path() -> PathBuf {
    directories::ProjectDirs::from("", "", "enrollments")
        .map(|dirs| dirs.data_dir().join("enrollments.log"))
        .unwrap_or_else(|| PathBuf::from("enrollments.log"))
}
