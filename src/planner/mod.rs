//! Keyframe placement prediction and GOP analysis module

use serde::{Deserialize, Serialize};

pub mod classifier;
pub mod gop;

pub use classifier::{CandidateWindow, ClassifierState, Decisions, KeyframeClassifier};
pub use gop::GopSummary;

/// Classifier configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Constant-q mode: require more than two frames since the last keyframe
    pub q_mode: bool,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self { q_mode: true }
    }
}
