//! First-pass statistics loading module
//!
//! Decodes aom's binary first-pass stats file (a flat run of 208-byte records,
//! no header) into an ordered, read-only list of [`FrameStats`].

use std::path::PathBuf;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::domain::model::FrameStats;

pub mod loader;

pub use loader::StatsLoader;

/// How to treat bytes left over after the last complete record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LoadPolicy {
    /// Drop a trailing partial record
    #[default]
    Lenient,
    /// Fail on a trailing partial record
    Strict,
}

/// Decoded contents of a first-pass stats file
#[derive(Debug, Clone)]
pub struct FirstPassStats {
    /// Records in file order
    pub frames: Vec<FrameStats>,
    /// Bytes dropped after the last complete record
    pub trailing_bytes: usize,
    /// File the records came from, if any
    pub source: Option<PathBuf>,
}

impl FirstPassStats {
    /// Number of complete records
    pub fn record_count(&self) -> usize {
        self.frames.len()
    }

    /// Frame count used to bound classification.
    ///
    /// The encoder writes one record more than the frames it classifies over,
    /// so the last record is excluded.
    pub fn usable_frame_count(&self) -> usize {
        self.frames.len().saturating_sub(1)
    }

    /// Whether a partial trailing record was dropped
    pub fn was_truncated(&self) -> bool {
        self.trailing_bytes > 0
    }
}
