//! Stats file reader

use std::io::{ErrorKind, Read};
use std::path::Path;

use tracing::{debug, info, warn};

use crate::domain::model::{FrameStats, RECORD_SIZE};
use crate::domain::rules::LOOKAHEAD_FRAMES;
use crate::error::{AomKfError, AomKfResult};
use crate::stats::{FirstPassStats, LoadPolicy};

/// Loader for aom first-pass stats files
#[derive(Debug, Clone, Default)]
pub struct StatsLoader {
    policy: LoadPolicy,
}

impl StatsLoader {
    /// Create a new loader with lenient truncation handling
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the trailing-record policy
    pub fn with_policy(mut self, policy: LoadPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Current trailing-record policy
    pub fn policy(&self) -> LoadPolicy {
        self.policy
    }

    /// Read and decode a stats file in one pass
    pub fn load<P: AsRef<Path>>(&self, path: P) -> AomKfResult<FirstPassStats> {
        let path = path.as_ref();
        info!("Loading first-pass stats from: {}", path.display());

        let bytes = std::fs::read(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => AomKfError::StatsFileNotFound {
                path: path.display().to_string(),
            },
            _ => AomKfError::StatsReadError {
                path: path.display().to_string(),
                source: e,
            },
        })?;

        let mut stats = self.decode(&bytes)?;
        stats.source = Some(path.to_path_buf());
        Ok(stats)
    }

    /// Decode everything readable from `reader`
    pub fn read_from<R: Read>(&self, mut reader: R) -> AomKfResult<FirstPassStats> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        self.decode(&bytes)
    }

    /// Decode an in-memory stats buffer
    pub fn decode(&self, bytes: &[u8]) -> AomKfResult<FirstPassStats> {
        let chunks = bytes.chunks_exact(RECORD_SIZE);
        let trailing_bytes = chunks.remainder().len();
        let complete_records = bytes.len() / RECORD_SIZE;

        if trailing_bytes > 0 {
            match self.policy {
                LoadPolicy::Strict => {
                    return Err(AomKfError::TruncatedRecord {
                        complete_records,
                        trailing_bytes,
                    });
                }
                LoadPolicy::Lenient => {
                    debug!(
                        "Dropping {} trailing bytes after {} complete records",
                        trailing_bytes, complete_records
                    );
                }
            }
        }

        let frames: Vec<FrameStats> = chunks
            .map(|chunk| {
                let mut record = [0u8; RECORD_SIZE];
                record.copy_from_slice(chunk);
                FrameStats::from_record(&record)
            })
            .collect();

        // Frame 0, the lookahead window and the excluded final record leave no candidates
        if frames.len() <= LOOKAHEAD_FRAMES + 2 {
            warn!(
                "Stats hold only {} records; no keyframe candidates beyond frame 0",
                frames.len()
            );
        }

        debug!("Decoded {} first-pass records", frames.len());

        Ok(FirstPassStats {
            frames,
            trailing_bytes,
            source: None,
        })
    }
}
