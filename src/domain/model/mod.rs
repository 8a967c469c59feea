// Domain models - First-pass statistics records and classifier decisions

use serde::{Deserialize, Serialize};

/// Number of values in one first-pass record
pub const FIELD_COUNT: usize = 26;

/// Size in bytes of one first-pass record (26 doubles)
pub const RECORD_SIZE: usize = FIELD_COUNT * std::mem::size_of::<f64>();

/// Field names in on-disk order
pub const FIELD_NAMES: [&str; FIELD_COUNT] = [
    "frame",
    "weight",
    "intra_error",
    "frame_avg_wavelet_energy",
    "coded_error",
    "sr_coded_error",
    "tr_coded_error",
    "pcnt_inter",
    "pcnt_motion",
    "pcnt_second_ref",
    "pcnt_third_ref",
    "pcnt_neutral",
    "intra_skip_pct",
    "inactive_zone_rows",
    "inactive_zone_cols",
    "MVr",
    "mvr_abs",
    "MVc",
    "mvc_abs",
    "MVrv",
    "MVcv",
    "mv_in_out_count",
    "new_mv_count",
    "duration",
    "count",
    "raw_error_stdev",
];

/// Per-frame statistics written by the encoder's analysis pass.
///
/// Records are positional: `frame` is informational and never used as an index.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FrameStats {
    /// Frame number in display order
    pub frame: f64,
    /// Weight assigned by the intra and brightness factors
    pub weight: f64,
    /// Intra prediction error
    pub intra_error: f64,
    /// Average wavelet energy
    pub frame_avg_wavelet_energy: f64,
    /// Best of intra and inter error using the last frame as reference
    pub coded_error: f64,
    /// Same as `coded_error` using the golden frame
    pub sr_coded_error: f64,
    /// Same as `coded_error` using the altref frame
    pub tr_coded_error: f64,
    /// Fraction of blocks where inter error < intra error
    pub pcnt_inter: f64,
    /// Fraction of blocks using non-zero motion vectors
    pub pcnt_motion: f64,
    /// Fraction of blocks better predicted from the second reference
    pub pcnt_second_ref: f64,
    /// Fraction of blocks better predicted from the third reference
    pub pcnt_third_ref: f64,
    /// Weighted fraction of blocks where intra and inter errors were close
    pub pcnt_neutral: f64,
    /// Fraction of flat blocks with almost no intra residual
    pub intra_skip_pct: f64,
    /// Masked rows at top and bottom
    pub inactive_zone_rows: f64,
    /// Masked columns at left and right
    pub inactive_zone_cols: f64,
    #[serde(rename = "MVr")]
    pub mvr: f64,
    pub mvr_abs: f64,
    #[serde(rename = "MVc")]
    pub mvc: f64,
    pub mvc_abs: f64,
    #[serde(rename = "MVrv")]
    pub mvrv: f64,
    #[serde(rename = "MVcv")]
    pub mvcv: f64,
    pub mv_in_out_count: f64,
    pub new_mv_count: f64,
    pub duration: f64,
    pub count: f64,
    pub raw_error_stdev: f64,
}

impl FrameStats {
    /// Build a record from its values in on-disk order
    pub fn from_values(v: [f64; FIELD_COUNT]) -> Self {
        Self {
            frame: v[0],
            weight: v[1],
            intra_error: v[2],
            frame_avg_wavelet_energy: v[3],
            coded_error: v[4],
            sr_coded_error: v[5],
            tr_coded_error: v[6],
            pcnt_inter: v[7],
            pcnt_motion: v[8],
            pcnt_second_ref: v[9],
            pcnt_third_ref: v[10],
            pcnt_neutral: v[11],
            intra_skip_pct: v[12],
            inactive_zone_rows: v[13],
            inactive_zone_cols: v[14],
            mvr: v[15],
            mvr_abs: v[16],
            mvc: v[17],
            mvc_abs: v[18],
            mvrv: v[19],
            mvcv: v[20],
            mv_in_out_count: v[21],
            new_mv_count: v[22],
            duration: v[23],
            count: v[24],
            raw_error_stdev: v[25],
        }
    }

    /// Values in on-disk order
    pub fn values(&self) -> [f64; FIELD_COUNT] {
        [
            self.frame,
            self.weight,
            self.intra_error,
            self.frame_avg_wavelet_energy,
            self.coded_error,
            self.sr_coded_error,
            self.tr_coded_error,
            self.pcnt_inter,
            self.pcnt_motion,
            self.pcnt_second_ref,
            self.pcnt_third_ref,
            self.pcnt_neutral,
            self.intra_skip_pct,
            self.inactive_zone_rows,
            self.inactive_zone_cols,
            self.mvr,
            self.mvr_abs,
            self.mvc,
            self.mvc_abs,
            self.mvrv,
            self.mvcv,
            self.mv_in_out_count,
            self.new_mv_count,
            self.duration,
            self.count,
            self.raw_error_stdev,
        ]
    }

    /// Decode one record stored in the encoder's native byte order
    pub fn from_record(record: &[u8; RECORD_SIZE]) -> Self {
        let mut values = [0.0f64; FIELD_COUNT];
        for (value, bytes) in values.iter_mut().zip(record.chunks_exact(8)) {
            let mut raw = [0u8; 8];
            raw.copy_from_slice(bytes);
            *value = f64::from_ne_bytes(raw);
        }
        Self::from_values(values)
    }

    /// Encode into the native 208-byte layout
    pub fn to_record(&self) -> [u8; RECORD_SIZE] {
        let mut record = [0u8; RECORD_SIZE];
        for (bytes, value) in record.chunks_exact_mut(8).zip(self.values()) {
            bytes.copy_from_slice(&value.to_ne_bytes());
        }
        record
    }

    /// Look up a field by its on-disk name
    pub fn field(&self, name: &str) -> Option<f64> {
        FIELD_NAMES
            .iter()
            .position(|field| *field == name)
            .map(|index| self.values()[index])
    }
}

/// Outcome of evaluating one keyframe candidate
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyframeDecision {
    /// Candidate frame index
    pub frame: usize,
    /// Frames since the last keyframe, as seen by this candidate
    pub frame_count_so_far: u32,
    /// Second-reference usage threshold in effect
    pub second_ref_thresh: f64,
    /// Whether the gate allowed the lookahead scan to run
    pub gate_passed: bool,
    /// Accumulated boost score (0.0 when the gate failed)
    pub boost_score: f64,
    /// Lookahead offset at which the scan stopped
    pub lookahead_index: Option<usize>,
    /// Final verdict
    pub is_keyframe: bool,
}

impl KeyframeDecision {
    /// Frame index if this candidate was confirmed
    pub fn keyframe(&self) -> Option<usize> {
        self.is_keyframe.then_some(self.frame)
    }
}
