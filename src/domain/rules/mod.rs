// Domain rules - aom's two-pass keyframe heuristic

use crate::domain::model::FrameStats;

/// Frames after which the second-reference threshold stops adapting
pub const SECOND_REF_ADAPT_UPTO: u32 = 32;
/// Second-reference usage threshold right after a keyframe
pub const MIN_SECOND_REF_USAGE_THRESH: f64 = 0.085;
/// Maximum amount the threshold grows by
pub const SECOND_REF_USAGE_THRESH_MAX_DELTA: f64 = 0.035;

/// Denominator offset used by `safe_divisor`
pub const DOUBLE_DIVIDE_EPSILON: f64 = 0.000001;

/// Minimum intra fraction for the intra-dominance branch
pub const MIN_INTRA_LEVEL: f64 = 0.25;
/// Required intra/inter ratio for the intra-dominance branch
pub const INTRA_VS_INTER_THRESH: f64 = 2.0;
/// Inter fraction below which a frame is a hard cut
pub const VERY_LOW_INTER_THRESH: f64 = 0.05;
/// Maximum intra/coded error ratio of the candidate
pub const KF_II_ERR_THRESHOLD: f64 = 2.5;
/// Relative error change versus the previous frame
pub const ERR_CHANGE_THRESHOLD: f64 = 0.4;
/// Intra/coded ratio of the next frame signalling improved prediction
pub const II_IMPROVEMENT_THRESHOLD: f64 = 3.5;

/// Number of frames the boost scan looks ahead
pub const LOOKAHEAD_FRAMES: usize = 16;
/// Multiplier applied to the intra/coded ratio in the boost scan
pub const BOOST_FACTOR: f64 = 12.5;
/// Cap on the per-frame boost ratio
pub const KF_II_MAX: f64 = 128.0;
/// Inter fraction above which decay follows `pcnt_inter` directly
pub const DECAY_INTER_THRESH: f64 = 0.85;
/// Per-frame ratio below which the scan stops
pub const MIN_BOOST_RATIO: f64 = 1.5;
/// Inter-minus-neutral fraction paired with `LOW_MOTION_BOOST_RATIO`
pub const MIN_MODIFIED_INTER: f64 = 0.20;
pub const LOW_MOTION_BOOST_RATIO: f64 = 3.0;
/// Minimum boost gained per frame to keep scanning
pub const MIN_BOOST_GAIN: f64 = 3.0;
/// Intra error below which the scan stops
pub const MIN_INTRA_ERROR: f64 = 200.0;
/// Boost score a candidate must exceed
pub const KF_BOOST_THRESHOLD: f64 = 30.0;
/// The scan must stop past this lookahead offset
pub const MIN_LOOKAHEAD_INDEX: usize = 3;

/// Second-reference usage threshold for a given distance from the last keyframe.
///
/// Grows linearly from 0.085 and saturates at 0.12 once 32 frames have passed.
pub fn second_ref_usage_thresh(frame_count_so_far: u32) -> f64 {
    if frame_count_so_far >= SECOND_REF_ADAPT_UPTO {
        return MIN_SECOND_REF_USAGE_THRESH + SECOND_REF_USAGE_THRESH_MAX_DELTA;
    }
    MIN_SECOND_REF_USAGE_THRESH
        + (frame_count_so_far as f64 / (SECOND_REF_ADAPT_UPTO - 1) as f64)
            * SECOND_REF_USAGE_THRESH_MAX_DELTA
}

/// Push `x` away from zero by a fixed epsilon, keeping its sign.
///
/// Matches the encoder's DOUBLE_DIVIDE_CHECK so ratios stay bit-compatible.
pub fn safe_divisor(x: f64) -> f64 {
    if x < 0.0 {
        x - DOUBLE_DIVIDE_EPSILON
    } else {
        x + DOUBLE_DIVIDE_EPSILON
    }
}

/// Whether a candidate is worth a lookahead scan.
///
/// `q_mode` enables the constant-q requirement that more than two frames
/// have passed since the last keyframe.
pub fn passes_candidate_gate(
    previous: &FrameStats,
    current: &FrameStats,
    future: &FrameStats,
    frame_count_so_far: u32,
    q_mode: bool,
) -> bool {
    let second_ref_thresh = second_ref_usage_thresh(frame_count_so_far);

    if q_mode && frame_count_so_far <= 2 {
        return false;
    }
    let low_second_ref =
        current.pcnt_second_ref < second_ref_thresh && future.pcnt_second_ref < second_ref_thresh;
    if !low_second_ref {
        return false;
    }
    if current.pcnt_inter < VERY_LOW_INTER_THRESH {
        return true;
    }

    let pcnt_intra = 1.0 - current.pcnt_inter;
    let modified_pcnt_inter = current.pcnt_inter - current.pcnt_neutral;

    let intra_dominant = pcnt_intra > MIN_INTRA_LEVEL
        && pcnt_intra > INTRA_VS_INTER_THRESH * modified_pcnt_inter
        && current.intra_error / safe_divisor(current.coded_error) < KF_II_ERR_THRESHOLD;
    if !intra_dominant {
        return false;
    }

    let coded_error_change =
        (previous.coded_error - current.coded_error).abs() / safe_divisor(current.coded_error);
    let intra_error_change =
        (previous.intra_error - current.intra_error).abs() / safe_divisor(current.intra_error);
    let future_ii_ratio = future.intra_error / safe_divisor(future.coded_error);

    coded_error_change > ERR_CHANGE_THRESHOLD
        || intra_error_change > ERR_CHANGE_THRESHOLD
        || future_ii_ratio > II_IMPROVEMENT_THRESHOLD
}

/// Result of the lookahead boost scan
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoostScan {
    /// Accumulated decay-weighted boost
    pub boost_score: f64,
    /// Lookahead offset at which the scan stopped
    pub last_index: usize,
}

impl BoostScan {
    /// Whether the scan confirms the candidate as a keyframe
    pub fn confirms_keyframe(&self) -> bool {
        self.boost_score > KF_BOOST_THRESHOLD && self.last_index > MIN_LOOKAHEAD_INDEX
    }
}

/// Accumulate the boost over up to `LOOKAHEAD_FRAMES` frames following the candidate.
pub fn scan_boost(lookahead: &[FrameStats]) -> BoostScan {
    let mut boost_score = 0.0;
    let mut old_boost_score = 0.0;
    let mut decay_accumulator = 1.0;
    let mut last_index = 0;

    for (j, next) in lookahead.iter().take(LOOKAHEAD_FRAMES).enumerate() {
        last_index = j;

        let next_ii_ratio =
            (BOOST_FACTOR * next.intra_error / safe_divisor(next.coded_error)).min(KF_II_MAX);

        // Prediction quality decays the further ahead we look.
        if next.pcnt_inter > DECAY_INTER_THRESH {
            decay_accumulator *= next.pcnt_inter;
        } else {
            decay_accumulator *= (DECAY_INTER_THRESH + next.pcnt_inter) / 2.0;
        }

        boost_score += decay_accumulator * next_ii_ratio;

        let breakout = next.pcnt_inter < VERY_LOW_INTER_THRESH
            || next_ii_ratio < MIN_BOOST_RATIO
            || (next.pcnt_inter - next.pcnt_neutral < MIN_MODIFIED_INTER
                && next_ii_ratio < LOW_MOTION_BOOST_RATIO)
            || boost_score - old_boost_score < MIN_BOOST_GAIN
            || next.intra_error < MIN_INTRA_ERROR;
        if breakout {
            break;
        }
        old_boost_score = boost_score;
    }

    BoostScan {
        boost_score,
        last_index,
    }
}
