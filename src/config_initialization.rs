//! Configuration initialization and hierarchy management

use std::path::Path;

use anyhow::{Context, Result};

use crate::cli::Cli;
use crate::config::{AppConfig, DEFAULT_CONFIG_FILE};
use crate::stats::LoadPolicy;

/// Resolve configuration following precedence: CLI > Env > File > Defaults.
///
/// Environment variables are read by clap alongside their flags, so both
/// arrive here through `cli`.
pub fn initialize_configuration_hierarchy(cli: &Cli) -> Result<AppConfig> {
    let mut config = load_config_file(cli)?;
    apply_cli_configuration_overrides(&mut config, cli);
    Ok(config)
}

/// Load the explicit config file, the working-directory default, or defaults
fn load_config_file(cli: &Cli) -> Result<AppConfig> {
    if let Some(path) = &cli.config {
        return AppConfig::load_file(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()));
    }

    let default_path = Path::new(DEFAULT_CONFIG_FILE);
    if default_path.exists() {
        return AppConfig::load_file(default_path)
            .with_context(|| format!("Failed to load configuration from {}", DEFAULT_CONFIG_FILE));
    }

    Ok(AppConfig::default())
}

/// Apply CLI argument (and environment) overrides to configuration
fn apply_cli_configuration_overrides(config: &mut AppConfig, cli: &Cli) {
    if let Some(stats) = &cli.stats {
        config.stats_path = stats.clone();
    }
    if let Some(policy) = cli.classify.load_policy {
        config.load_policy = policy;
    }
    if cli.classify.strict {
        config.load_policy = LoadPolicy::Strict;
    }
    if let Some(q_mode) = cli.classify.q_mode {
        config.q_mode = q_mode;
    }
    if let Some(format) = cli.output.format {
        config.output_format = format;
    }
    if cli.output.summary {
        config.summary = true;
    }
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }
    if let Some(format) = cli.log_format {
        config.log_format = format;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputFormat;
    use clap::Parser;
    use std::io::Write;
    use std::path::PathBuf;

    #[test]
    fn test_cli_overrides_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[aom_keyframes]\nstats_path = \"from_file.bin\"\nload_policy = \"strict\"\nsummary = true"
        )
        .unwrap();

        let cli = Cli::try_parse_from([
            "aom-keyframes",
            "cli.bin",
            "--config",
            file.path().to_str().unwrap(),
            "--load-policy",
            "lenient",
            "--format",
            "lines",
        ])
        .unwrap();
        let config = initialize_configuration_hierarchy(&cli).unwrap();

        assert_eq!(config.stats_path, PathBuf::from("cli.bin"));
        assert_eq!(config.load_policy, LoadPolicy::Lenient);
        assert_eq!(config.output_format, OutputFormat::Lines);
        // Untouched by the CLI
        assert!(config.summary);
    }

    #[test]
    fn test_file_values_used_without_flags() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[aom_keyframes]\nstats_path = \"from_file.bin\"\nq_mode = false").unwrap();

        let cli =
            Cli::try_parse_from(["aom-keyframes", "--config", file.path().to_str().unwrap()]).unwrap();
        let config = initialize_configuration_hierarchy(&cli).unwrap();

        assert_eq!(config.stats_path, PathBuf::from("from_file.bin"));
        assert!(!config.q_mode);
    }

    #[test]
    fn test_strict_flag() {
        let mut config = AppConfig::default();
        let cli = Cli::try_parse_from(["aom-keyframes", "--strict", "--q-mode", "false"]).unwrap();
        apply_cli_configuration_overrides(&mut config, &cli);

        assert_eq!(config.load_policy, LoadPolicy::Strict);
        assert!(!config.q_mode);
    }

    #[test]
    fn test_missing_explicit_config_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        let cli =
            Cli::try_parse_from(["aom-keyframes", "--config", missing.to_str().unwrap()]).unwrap();

        assert!(initialize_configuration_hierarchy(&cli).is_err());
    }
}
