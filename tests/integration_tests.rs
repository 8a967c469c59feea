use std::fs;
use std::path::Path;
use tempfile::TempDir;
use aom_keyframes::*;

/// Test utilities for synthetic first-pass stats
mod test_utils {
    use super::*;

    pub fn static_frame(index: usize) -> FrameStats {
        FrameStats {
            frame: index as f64,
            weight: 1.0,
            intra_error: 2400.0,
            coded_error: 300.0,
            pcnt_inter: 0.97,
            pcnt_neutral: 0.05,
            pcnt_second_ref: 0.01,
            duration: 1.0,
            count: 1.0,
            ..Default::default()
        }
    }

    pub fn cut_frame(index: usize) -> FrameStats {
        FrameStats {
            frame: index as f64,
            weight: 1.0,
            intra_error: 2500.0,
            coded_error: 2450.0,
            pcnt_inter: 0.02,
            pcnt_second_ref: 0.0,
            duration: 1.0,
            count: 1.0,
            ..Default::default()
        }
    }

    /// Write a stats file with hard cuts at `cuts`, plus the trailing total record
    pub fn write_stats_file(path: &Path, frame_count: usize, cuts: &[usize], trailing: &[u8]) {
        let mut bytes = Vec::new();
        for i in 0..frame_count {
            let frame = if cuts.contains(&i) {
                cut_frame(i)
            } else {
                static_frame(i)
            };
            bytes.extend_from_slice(&frame.to_record());
        }
        let total = FrameStats {
            frame: frame_count as f64,
            count: frame_count as f64,
            ..Default::default()
        };
        bytes.extend_from_slice(&total.to_record());
        bytes.extend_from_slice(trailing);
        fs::write(path, bytes).unwrap();
    }
}

use test_utils::*;

#[test]
fn test_predicts_scene_cuts_from_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("stats.bin");
    write_stats_file(&path, 120, &[24, 60, 61, 95], &[]);

    let keyframes = predict_keyframes(&path).unwrap();

    // 60 is cut short by 61 right behind it
    assert_eq!(keyframes, vec![0, 24, 61, 95]);
}

#[test]
fn test_file_size_bounds_the_candidate_range() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("stats.bin");
    write_stats_file(&path, 50, &[33, 34], &[]);

    let stats = StatsLoader::new().load(&path).unwrap();
    assert_eq!(stats.record_count(), 51);
    assert_eq!(stats.usable_frame_count(), 50);

    // Candidates stop at 50 - 17 = 33
    let decisions: Vec<KeyframeDecision> = KeyframeClassifier::new().decisions(&stats).collect();
    assert_eq!(decisions.last().map(|d| d.frame), Some(33));

    // 33's lookahead breaks on the cut at 34, and 34 is never a candidate
    assert_eq!(KeyframeClassifier::new().classify(&stats), vec![0]);
}

#[test]
fn test_lenient_and_strict_loading() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("stats.bin");
    write_stats_file(&path, 64, &[30], &[0u8; 50]);

    let lenient = StatsLoader::new().load(&path).unwrap();
    assert_eq!(lenient.record_count(), 65);
    assert_eq!(lenient.trailing_bytes, 50);
    assert_eq!(KeyframeClassifier::new().classify(&lenient), vec![0, 30]);

    let strict = StatsLoader::new().with_policy(LoadPolicy::Strict).load(&path);
    assert!(matches!(
        strict,
        Err(AomKfError::TruncatedRecord {
            complete_records: 65,
            trailing_bytes: 50
        })
    ));
}

#[test]
fn test_missing_stats_file() {
    let temp_dir = TempDir::new().unwrap();
    let result = predict_keyframes(temp_dir.path().join("stats.bin"));

    match result {
        Err(AomKfError::StatsFileNotFound { path }) => assert!(path.ends_with("stats.bin")),
        other => panic!("expected StatsFileNotFound, got {:?}", other),
    }
}

#[test]
fn test_gop_summary_from_prediction() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("stats.bin");
    write_stats_file(&path, 100, &[40], &[]);

    let stats = StatsLoader::new().load(&path).unwrap();
    let keyframes = KeyframeClassifier::new().classify(&stats);
    let summary = GopSummary::from_keyframes(&keyframes, stats.usable_frame_count());

    assert_eq!(summary.gop_lengths, vec![40, 60]);
    assert_eq!(summary.avg_gop_length, 50.0);
}

/// Replays a real aomenc stats file against the keyframes of a real encode.
///
/// Set `AOMKF_REFERENCE_STATS` to the stats file and `AOMKF_REFERENCE_KEYFRAMES`
/// to a file with one keyframe index per line.
#[test]
#[ignore = "needs a reference encode"]
fn test_reference_encode_agreement() {
    let stats_path = std::env::var("AOMKF_REFERENCE_STATS").unwrap();
    let keyframes_path = std::env::var("AOMKF_REFERENCE_KEYFRAMES").unwrap();

    let expected: Vec<usize> = fs::read_to_string(keyframes_path)
        .unwrap()
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.trim().parse().unwrap())
        .collect();

    let stats = StatsLoader::new().load(stats_path).unwrap();
    let expected_flags: Vec<bool> = (0..stats.usable_frame_count())
        .map(|i| expected.binary_search(&i).is_ok())
        .collect();
    let predicted = KeyframeClassifier::new().classify(&stats);
    let mismatches = expected_flags
        .iter()
        .enumerate()
        .filter(|&(i, &is_key)| is_key != predicted.binary_search(&i).is_ok())
        .count();

    let mismatch_rate = mismatches as f64 / stats.usable_frame_count().max(1) as f64;
    assert!(mismatch_rate <= 0.01, "mismatch rate {:.4}", mismatch_rate);
}
