//! Result rendering module

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::planner::GopSummary;

pub mod writer;

pub use writer::ReportWriter;

/// Output format for predicted keyframes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `[0, 17, 45]`
    #[default]
    List,
    /// JSON report with keyframes and frame count
    Json,
    /// One index per line
    Lines,
    /// 0/1 flag per frame: frame 0 and every candidate
    Flags,
}

/// Prediction result handed to the writer
#[derive(Debug, Clone, Serialize)]
pub struct PredictionReport {
    /// Stats file the prediction was made from
    pub stats_path: String,
    /// Records decoded from the file
    pub record_count: usize,
    /// Frames used to bound classification
    pub frame_count: usize,
    /// Predicted keyframe indices
    pub keyframes: Vec<usize>,
    /// Per-frame flags, filled in for the `flags` format
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flags: Option<Vec<u8>>,
    /// GOP summary, when requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<GopSummary>,
}
