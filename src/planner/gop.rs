//! GOP (Group of Pictures) summary for predicted keyframes

use serde::Serialize;

/// Summary of the GOP structure implied by a keyframe list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GopSummary {
    /// Number of keyframes
    pub keyframe_count: usize,
    /// Length in frames of each GOP; the last one runs to the end of the stream
    pub gop_lengths: Vec<usize>,
    /// Average GOP length in frames
    pub avg_gop_length: f64,
    /// Shortest GOP
    pub min_gop_length: usize,
    /// Longest GOP
    pub max_gop_length: usize,
}

impl GopSummary {
    /// Build a summary from sorted keyframe indices and the total frame count
    pub fn from_keyframes(keyframes: &[usize], total_frames: usize) -> Self {
        let gop_lengths: Vec<usize> = keyframes
            .iter()
            .enumerate()
            .map(|(i, &start)| {
                let end = keyframes.get(i + 1).copied().unwrap_or(total_frames);
                end.saturating_sub(start)
            })
            .collect();

        let avg_gop_length = if gop_lengths.is_empty() {
            0.0
        } else {
            gop_lengths.iter().sum::<usize>() as f64 / gop_lengths.len() as f64
        };

        Self {
            keyframe_count: keyframes.len(),
            min_gop_length: gop_lengths.iter().copied().min().unwrap_or(0),
            max_gop_length: gop_lengths.iter().copied().max().unwrap_or(0),
            avg_gop_length,
            gop_lengths,
        }
    }

    /// Generate a human-readable report
    pub fn generate_summary(&self) -> String {
        let mut summary = String::new();

        summary.push_str("GOP Summary:\n");
        summary.push_str(&format!("  Keyframes: {}\n", self.keyframe_count));
        summary.push_str(&format!("  Average GOP Length: {:.1} frames\n", self.avg_gop_length));
        summary.push_str(&format!(
            "  GOP Range: {} - {} frames\n",
            self.min_gop_length, self.max_gop_length
        ));

        summary
    }
}
