// Configuration - TOML-backed application settings

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{AomKfError, AomKfResult};
use crate::output::OutputFormat;
use crate::planner::ClassifierConfig;
use crate::stats::LoadPolicy;
use crate::utils::logging::{LogFormat, LogLevel, LoggingConfig};

/// Config file picked up from the working directory when present
pub const DEFAULT_CONFIG_FILE: &str = "aom_keyframes.toml";

/// Stats file name aomenc writes by default
pub const DEFAULT_STATS_FILE: &str = "stats.bin";

/// Resolved application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// First-pass stats file to read
    pub stats_path: PathBuf,
    /// Trailing partial record handling
    pub load_policy: LoadPolicy,
    /// Constant-q keyframe spacing rule
    pub q_mode: bool,
    /// Result format on stdout
    pub output_format: OutputFormat,
    /// Append a GOP summary
    pub summary: bool,
    pub log_level: LogLevel,
    pub log_format: LogFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            stats_path: PathBuf::from(DEFAULT_STATS_FILE),
            load_policy: LoadPolicy::Lenient,
            q_mode: true,
            output_format: OutputFormat::List,
            summary: false,
            log_level: LogLevel::Info,
            log_format: LogFormat::Compact,
        }
    }
}

/// On-disk layout: settings live under `[aom_keyframes]`
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default)]
    aom_keyframes: AppConfig,
}

impl AppConfig {
    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> AomKfResult<Self> {
        let file: ConfigFile = toml::from_str(content).map_err(|e| AomKfError::ConfigError {
            message: format!("Failed to parse TOML config: {}", e),
        })?;
        Ok(file.aom_keyframes)
    }

    /// Load configuration from a TOML file
    pub fn load_file<P: AsRef<Path>>(path: P) -> AomKfResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| AomKfError::ConfigError {
            message: format!("Failed to read config file {}: {}", path.display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    /// Serialize configuration to TOML
    pub fn to_toml_string(&self) -> AomKfResult<String> {
        let file = ConfigFile {
            aom_keyframes: self.clone(),
        };
        toml::to_string(&file).map_err(|e| AomKfError::ConfigError {
            message: format!("Failed to serialize config: {}", e),
        })
    }

    /// Classifier settings
    pub fn classifier_config(&self) -> ClassifierConfig {
        ClassifierConfig {
            q_mode: self.q_mode,
        }
    }

    /// Logging settings
    pub fn logging_config(&self) -> LoggingConfig {
        LoggingConfig {
            level: self.log_level,
            format: self.log_format,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.stats_path, PathBuf::from("stats.bin"));
        assert_eq!(config.load_policy, LoadPolicy::Lenient);
        assert!(config.q_mode);
        assert_eq!(config.output_format, OutputFormat::List);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = AppConfig::from_toml_str(
            "[aom_keyframes]\nload_policy = \"strict\"\noutput_format = \"json\"\n",
        )
        .unwrap();
        assert_eq!(config.load_policy, LoadPolicy::Strict);
        assert_eq!(config.output_format, OutputFormat::Json);
        assert!(config.q_mode);
        assert_eq!(config.stats_path, PathBuf::from("stats.bin"));
    }

    #[test]
    fn test_empty_file() {
        assert_eq!(AppConfig::from_toml_str("").unwrap(), AppConfig::default());
    }

    #[test]
    fn test_unknown_keys_rejected() {
        let result = AppConfig::from_toml_str("[aom_keyframes]\nlookahead = 32\n");
        assert!(matches!(result, Err(AomKfError::ConfigError { .. })));

        let result = AppConfig::from_toml_str("[encoder]\nlog_level = \"info\"\n");
        assert!(matches!(result, Err(AomKfError::ConfigError { .. })));
    }

    #[test]
    fn test_invalid_value_rejected() {
        let result = AppConfig::from_toml_str("[aom_keyframes]\nload_policy = \"sloppy\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_toml_serialization_reloads() {
        let config = AppConfig {
            q_mode: false,
            summary: true,
            log_level: LogLevel::Debug,
            ..Default::default()
        };
        let text = config.to_toml_string().unwrap();
        assert!(text.contains("[aom_keyframes]"));
        assert_eq!(AppConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = AppConfig::load_file(dir.path().join("missing.toml"));
        assert!(matches!(result, Err(AomKfError::ConfigError { .. })));
    }

    #[test]
    fn test_derived_configs() {
        let config = AppConfig {
            q_mode: false,
            log_level: LogLevel::Warn,
            log_format: LogFormat::Json,
            ..Default::default()
        };
        assert!(!config.classifier_config().q_mode);
        assert_eq!(config.logging_config().level, LogLevel::Warn);
        assert_eq!(config.logging_config().format, LogFormat::Json);
    }
}
