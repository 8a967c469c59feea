//! Keyframe classification over first-pass stats
//!
//! Classification is a fold: [`step`] maps `(state, window)` to
//! `(new_state, decision)` and [`Decisions`] drives it lazily across the
//! candidate range.

use tracing::{debug, info};

use crate::domain::model::{FrameStats, KeyframeDecision};
use crate::domain::rules::{
    passes_candidate_gate, scan_boost, second_ref_usage_thresh, LOOKAHEAD_FRAMES,
};
use crate::planner::ClassifierConfig;
use crate::stats::FirstPassStats;

/// Running state threaded through the candidate loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassifierState {
    /// Frames elapsed since the last keyframe
    pub frame_count_so_far: u32,
}

impl ClassifierState {
    /// State seen by candidate 1; frame 0 is always a keyframe
    pub fn initial() -> Self {
        Self {
            frame_count_so_far: 1,
        }
    }

    /// State seen by the next candidate
    pub fn advance(self, confirmed_keyframe: bool) -> Self {
        let base = if confirmed_keyframe {
            0
        } else {
            self.frame_count_so_far
        };
        Self {
            frame_count_so_far: base.saturating_add(1),
        }
    }
}

impl Default for ClassifierState {
    fn default() -> Self {
        Self::initial()
    }
}

/// Frames visible to one candidate evaluation
#[derive(Debug, Clone, Copy)]
pub struct CandidateWindow<'a> {
    /// Candidate frame index
    pub index: usize,
    pub previous: &'a FrameStats,
    pub current: &'a FrameStats,
    /// Frames `index + 1 ..= index + LOOKAHEAD_FRAMES`
    pub lookahead: &'a [FrameStats],
}

impl<'a> CandidateWindow<'a> {
    /// Window around `index`, or `None` if the frames do not cover it
    pub fn at(frames: &'a [FrameStats], index: usize) -> Option<Self> {
        if index == 0 || index + LOOKAHEAD_FRAMES >= frames.len() {
            return None;
        }
        Some(Self {
            index,
            previous: &frames[index - 1],
            current: &frames[index],
            lookahead: &frames[index + 1..=index + LOOKAHEAD_FRAMES],
        })
    }

    /// Frame right after the candidate
    pub fn future(&self) -> &'a FrameStats {
        &self.lookahead[0]
    }
}

/// Evaluate one candidate and advance the state.
pub fn step(
    state: ClassifierState,
    window: &CandidateWindow<'_>,
    config: &ClassifierConfig,
) -> (ClassifierState, KeyframeDecision) {
    let frame_count_so_far = state.frame_count_so_far;
    let gate_passed = passes_candidate_gate(
        window.previous,
        window.current,
        window.future(),
        frame_count_so_far,
        config.q_mode,
    );

    let (boost_score, lookahead_index, is_keyframe) = if gate_passed {
        let scan = scan_boost(window.lookahead);
        (scan.boost_score, Some(scan.last_index), scan.confirms_keyframe())
    } else {
        (0.0, None, false)
    };

    let decision = KeyframeDecision {
        frame: window.index,
        frame_count_so_far,
        second_ref_thresh: second_ref_usage_thresh(frame_count_so_far),
        gate_passed,
        boost_score,
        lookahead_index,
        is_keyframe,
    };

    (state.advance(is_keyframe), decision)
}

/// Lazy, restartable sequence of candidate decisions
#[derive(Debug, Clone)]
pub struct Decisions<'a> {
    frames: &'a [FrameStats],
    config: ClassifierConfig,
    state: ClassifierState,
    next_index: usize,
    end_index: usize,
}

impl<'a> Decisions<'a> {
    /// Decisions for candidates `1 .. frame_count - LOOKAHEAD_FRAMES`
    pub fn new(frames: &'a [FrameStats], frame_count: usize, config: ClassifierConfig) -> Self {
        let frame_count = frame_count.min(frames.len());
        Self {
            frames,
            config,
            state: ClassifierState::initial(),
            next_index: 1,
            end_index: frame_count.saturating_sub(LOOKAHEAD_FRAMES),
        }
    }

    /// State the next candidate will observe
    pub fn state(&self) -> ClassifierState {
        self.state
    }
}

impl Iterator for Decisions<'_> {
    type Item = KeyframeDecision;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next_index >= self.end_index {
            return None;
        }
        let window = CandidateWindow::at(self.frames, self.next_index)?;
        let (state, decision) = step(self.state, &window, &self.config);
        self.state = state;
        self.next_index += 1;

        if decision.gate_passed {
            debug!(
                frame = decision.frame,
                frame_count_so_far = decision.frame_count_so_far,
                boost_score = decision.boost_score,
                lookahead_index = ?decision.lookahead_index,
                is_keyframe = decision.is_keyframe,
                "Evaluated keyframe candidate"
            );
        }
        Some(decision)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end_index.saturating_sub(self.next_index);
        (remaining, Some(remaining))
    }
}

/// Predicts aom's two-pass keyframe placement
#[derive(Debug, Clone, Default)]
pub struct KeyframeClassifier {
    config: ClassifierConfig,
}

impl KeyframeClassifier {
    /// Create a classifier with the default (constant-q) configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a classifier with an explicit configuration
    pub fn with_config(config: ClassifierConfig) -> Self {
        Self { config }
    }

    /// Enable or disable the constant-q minimum keyframe distance
    pub fn with_q_mode(mut self, q_mode: bool) -> Self {
        self.config.q_mode = q_mode;
        self
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Per-candidate decisions over loaded stats
    pub fn decisions<'a>(&self, stats: &'a FirstPassStats) -> Decisions<'a> {
        self.decisions_for(&stats.frames, stats.usable_frame_count())
    }

    /// Per-candidate decisions over a raw record slice
    pub fn decisions_for<'a>(&self, frames: &'a [FrameStats], frame_count: usize) -> Decisions<'a> {
        Decisions::new(frames, frame_count, self.config.clone())
    }

    /// Predicted keyframe indices, starting with frame 0
    pub fn classify(&self, stats: &FirstPassStats) -> Vec<usize> {
        let keyframes: Vec<usize> = std::iter::once(0)
            .chain(self.decisions(stats).filter_map(|d| d.keyframe()))
            .collect();

        info!(
            "Predicted {} keyframes over {} frames",
            keyframes.len(),
            stats.usable_frame_count()
        );
        keyframes
    }

    /// Per-frame 0/1 flags: frame 0 followed by one entry per candidate
    pub fn keyframe_flags(&self, stats: &FirstPassStats) -> Vec<u8> {
        std::iter::once(1)
            .chain(self.decisions(stats).map(|d| u8::from(d.is_keyframe)))
            .collect()
    }
}
