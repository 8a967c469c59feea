//! aom-keyframes Library
//!
//! Predicts which frames aom's two-pass rate control will code as keyframes,
//! using only the first-pass stats file and without running the second pass.
//!
//! # Usage
//!
//! ```no_run
//! use aom_keyframes::{KeyframeClassifier, StatsLoader};
//!
//! let stats = StatsLoader::new().load("stats.bin")?;
//! let keyframes = KeyframeClassifier::new().classify(&stats);
//! println!("{:?}", keyframes);
//! # Ok::<(), aom_keyframes::AomKfError>(())
//! ```

use std::path::Path;

pub mod cli;
pub mod config;
pub mod config_initialization;
pub mod domain;
pub mod error;
pub mod output;
pub mod planner;
pub mod stats;
pub mod utils;

// Re-export commonly used types
pub use config::AppConfig;
pub use domain::model::{FrameStats, KeyframeDecision, RECORD_SIZE};
pub use error::{AomKfError, AomKfResult};
pub use planner::{ClassifierConfig, GopSummary, KeyframeClassifier};
pub use stats::{FirstPassStats, LoadPolicy, StatsLoader};

/// Load a stats file leniently and predict keyframes with the default classifier
pub fn predict_keyframes<P: AsRef<Path>>(path: P) -> AomKfResult<Vec<usize>> {
    let stats = StatsLoader::new().load(path)?;
    Ok(KeyframeClassifier::new().classify(&stats))
}
