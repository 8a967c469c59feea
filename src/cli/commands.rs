//! Command implementations

use std::io;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::output::{OutputFormat, PredictionReport, ReportWriter};
use crate::planner::{GopSummary, KeyframeClassifier};
use crate::stats::StatsLoader;

/// Execute the keyframe prediction
pub fn predict(config: &AppConfig) -> Result<()> {
    info!("Starting keyframe prediction");
    info!("Stats: {}", config.stats_path.display());
    info!("Load policy: {:?}, q_mode: {}", config.load_policy, config.q_mode);

    let report = build_report(config)?;

    ReportWriter::new(config.output_format)
        .write_to(&report, io::stdout().lock())
        .context("Failed to write prediction report")?;

    info!("Keyframe prediction completed successfully");
    Ok(())
}

/// Load stats, classify and assemble the report
pub fn build_report(config: &AppConfig) -> Result<PredictionReport> {
    let loader = StatsLoader::new().with_policy(config.load_policy);
    let stats = loader
        .load(&config.stats_path)
        .context("Failed to load first-pass stats")?;

    if stats.was_truncated() {
        warn!(
            "Ignored {} trailing bytes in {}",
            stats.trailing_bytes,
            config.stats_path.display()
        );
    }

    let classifier = KeyframeClassifier::with_config(config.classifier_config());
    let keyframes = classifier.classify(&stats);

    let flags = (config.output_format == OutputFormat::Flags).then(|| classifier.keyframe_flags(&stats));
    let summary = config
        .summary
        .then(|| GopSummary::from_keyframes(&keyframes, stats.usable_frame_count()));

    Ok(PredictionReport {
        stats_path: config.stats_path.display().to_string(),
        record_count: stats.record_count(),
        frame_count: stats.usable_frame_count(),
        keyframes,
        flags,
        summary,
    })
}

/// Print the resolved configuration
pub fn print_config(config: &AppConfig) -> Result<()> {
    let toml = config
        .to_toml_string()
        .context("Failed to serialize configuration")?;
    print!("{}", toml);
    Ok(())
}
