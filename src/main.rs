//! aom-keyframes
//!
//! Predicts the keyframes aomenc's second pass will place, from the stats file
//! written by its first pass.
//!
//! # Usage
//!
//! ```bash
//! aomenc --pass=1 --passes=2 --fpf=stats.bin -o /dev/null input.y4m
//! aom-keyframes stats.bin
//! aom-keyframes stats.bin --format json --summary
//! ```

use anyhow::Result;
use clap::Parser;
use tracing::info;

use aom_keyframes::cli::{commands, Cli};
use aom_keyframes::config_initialization::initialize_configuration_hierarchy;
use aom_keyframes::utils::logging::LoggingSystem;

/// Main entry point for the aom-keyframes CLI
fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse();

    // Resolve configuration before logging so the configured level applies
    let config = initialize_configuration_hierarchy(&cli)?;

    let logging = LoggingSystem::new(config.logging_config());
    logging.initialize();
    logging.log_system_info();

    if cli.output.print_config {
        return commands::print_config(&config);
    }

    info!("Starting aom-keyframes");
    commands::predict(&config)?;
    Ok(())
}
