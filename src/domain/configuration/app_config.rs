//! Application configuration domain models.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::AppError;
use crate::domain::form::FormTimings;

/// Configuration loaded from `config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Action label timings.
    #[serde(default)]
    pub timings: TimingsConfig,
    /// Template and catalog overrides.
    #[serde(default)]
    pub templates: TemplatesConfig,
    /// Markdown fetch configuration.
    #[serde(default)]
    pub fetch: FetchConfig,
    /// Directory concatenation configuration.
    #[serde(default)]
    pub concat: ConcatConfig,
}

impl AppConfig {
    pub fn parse(content: &str) -> Result<Self, AppError> {
        let config: AppConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        self.fetch.validate()?;
        self.concat.validate()?;
        Ok(())
    }
}

/// Delays around action results, in milliseconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TimingsConfig {
    #[serde(default = "default_success_revert_ms")]
    pub success_revert_ms: u64,
    #[serde(default = "default_failure_revert_ms")]
    pub failure_revert_ms: u64,
    #[serde(default = "default_cooldown_ms")]
    pub cooldown_ms: u64,
}

impl Default for TimingsConfig {
    fn default() -> Self {
        Self {
            success_revert_ms: default_success_revert_ms(),
            failure_revert_ms: default_failure_revert_ms(),
            cooldown_ms: default_cooldown_ms(),
        }
    }
}

impl TimingsConfig {
    pub fn form_timings(&self) -> FormTimings {
        FormTimings {
            success_revert: Duration::from_millis(self.success_revert_ms),
            failure_revert: Duration::from_millis(self.failure_revert_ms),
            cooldown: Duration::from_millis(self.cooldown_ms),
        }
    }
}

fn default_success_revert_ms() -> u64 {
    2000
}

fn default_failure_revert_ms() -> u64 {
    3000
}

fn default_cooldown_ms() -> u64 {
    500
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TemplatesConfig {
    /// Directory whose `<mode>/<step_type>.md` files override embedded templates.
    #[serde(default)]
    pub templates_dir: Option<PathBuf>,
    /// Replacement workflow catalog.
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FetchConfig {
    /// Reader service the target URL is appended to.
    #[serde(default = "default_reader_base_url")]
    pub reader_base_url: Url,
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self { reader_base_url: default_reader_base_url(), timeout_secs: default_timeout() }
    }
}

impl FetchConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.timeout_secs == 0 {
            return Err(AppError::InvalidConfig("timeout_secs must be greater than 0".to_string()));
        }
        if self.reader_base_url.cannot_be_a_base() {
            return Err(AppError::InvalidConfig(format!(
                "reader_base_url '{}' cannot be used as a base URL",
                self.reader_base_url
            )));
        }
        Ok(())
    }
}

fn default_reader_base_url() -> Url {
    Url::parse("https://r.jina.ai/").expect("Default reader URL must be valid")
}

fn default_timeout() -> u64 {
    30
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConcatConfig {
    #[serde(default = "default_max_parallel_reads")]
    pub max_parallel_reads: usize,
    #[serde(default = "default_max_file_bytes")]
    pub max_file_bytes: u64,
    /// Directory or file names skipped while walking.
    #[serde(default = "default_ignore")]
    pub ignore: Vec<String>,
}

impl Default for ConcatConfig {
    fn default() -> Self {
        Self {
            max_parallel_reads: default_max_parallel_reads(),
            max_file_bytes: default_max_file_bytes(),
            ignore: default_ignore(),
        }
    }
}

impl ConcatConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.max_parallel_reads == 0 {
            return Err(AppError::InvalidConfig(
                "max_parallel_reads must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

fn default_max_parallel_reads() -> usize {
    8
}

fn default_max_file_bytes() -> u64 {
    1024 * 1024
}

fn default_ignore() -> Vec<String> {
    ["node_modules", "target", "dist", "build"].iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config = AppConfig::parse("").unwrap();
        assert_eq!(config.timings.success_revert_ms, 2000);
        assert_eq!(config.fetch.reader_base_url.as_str(), "https://r.jina.ai/");
        assert_eq!(config.concat.max_parallel_reads, 8);
        assert!(config.templates.templates_dir.is_none());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = AppConfig::parse("[timings]\ncooldown_ms = 50\n").unwrap();
        let timings = config.timings.form_timings();
        assert_eq!(timings.cooldown, Duration::from_millis(50));
        assert_eq!(timings.failure_revert, Duration::from_millis(3000));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(matches!(
            AppConfig::parse("[timings]\nbogus = 1\n"),
            Err(AppError::TomlParseError(_))
        ));
    }

    #[test]
    fn zero_parallel_reads_is_invalid() {
        let err = AppConfig::parse("[concat]\nmax_parallel_reads = 0\n").unwrap_err();
        assert!(matches!(err, AppError::InvalidConfig(_)));
    }

    #[test]
    fn zero_timeout_is_invalid() {
        let err = AppConfig::parse("[fetch]\ntimeout_secs = 0\n").unwrap_err();
        assert!(err.to_string().contains("timeout_secs"));
    }
}
