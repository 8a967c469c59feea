//! CLI module for aom-keyframes
//!
//! This module handles command-line argument parsing and command execution.

use std::path::PathBuf;

use clap::Parser;

use crate::utils::logging::{LogFormat, LogLevel};

pub mod args;
pub mod commands;

/// aom-keyframes
///
/// Reads an aomenc first-pass stats file and prints the frames the second
/// pass is expected to code as keyframes.
#[derive(Parser, Debug)]
#[command(name = "aom-keyframes")]
#[command(about = "Predict aom two-pass keyframe placement from a first-pass stats file")]
#[command(version)]
#[command(long_about = None)]
pub struct Cli {
    /// First-pass stats file (default: stats.bin)
    pub stats: Option<PathBuf>,

    /// Configuration file
    #[arg(long, env = "AOMKF_CONFIG")]
    pub config: Option<PathBuf>,

    /// Logging level
    #[arg(long, value_enum, env = "AOMKF_LOG_LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Log output format
    #[arg(long, value_enum, env = "AOMKF_LOG_FORMAT")]
    pub log_format: Option<LogFormat>,

    #[command(flatten)]
    pub classify: args::ClassifyArgs,

    #[command(flatten)]
    pub output: args::OutputArgs,
}
