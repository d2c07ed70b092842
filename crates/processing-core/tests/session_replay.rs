use std::path::PathBuf;

use liftform_frame_model::exercise::ExerciseType;
use liftform_frame_model::frame::{read_frames, DetectionFrame, FrameLabels};
use liftform_frame_model::report::QualityRating;
use liftform_frame_model::thresholds::{AnalysisConfig, RepCounterConfig, SessionConfig};
use liftform_processing_core::MovementAnalyzer;

fn load_fixture_frames() -> Vec<DetectionFrame> {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("fixtures")
        .join("sessions")
        .join("squat_three_reps.jsonl");

    read_frames(path).expect("fixture frames should parse")
}

#[test]
fn squat_fixture_replay_is_stable() {
    let frames = load_fixture_frames();
    assert_eq!(frames.len(), 105);

    let mut analyzer = MovementAnalyzer::new(ExerciseType::Squat);
    let reports = analyzer.run(frames.iter().map(|f| &f.labels));

    let completed: Vec<u64> = reports
        .iter()
        .filter(|r| r.rep_completed)
        .map(|r| r.frame_index)
        .collect();
    assert_eq!(completed.len(), 3);

    let summary = analyzer.summary();
    assert_eq!(summary.frames_processed, 105);
    assert_eq!(summary.repetitions, 3);
    assert_eq!(summary.risk_frames, 35);

    let metrics = summary.metrics.expect("fixture has form and depth data");
    assert_eq!(metrics.frames_analyzed, 103);
    assert_eq!(metrics.repetitions, 3);
    assert!((metrics.form_metrics.average - 0.846_737_864).abs() < 1e-6);
    assert!((metrics.depth_metrics.average - 0.872_115_385).abs() < 1e-6);
    assert_eq!(metrics.form_metrics.min, 0.548);
    assert_eq!(metrics.form_metrics.max, 0.98);
    assert!((metrics.depth_metrics.consistency - 0.88).abs() < 1e-9);
    assert_eq!(metrics.movement_assessment.score, 8.6);
    assert_eq!(
        metrics.movement_assessment.form_quality,
        QualityRating::VeryGood
    );
    assert_eq!(
        metrics.movement_assessment.form_consistency,
        QualityRating::NeedsImprovement
    );
    assert_eq!(
        metrics.movement_assessment.depth_consistency,
        QualityRating::VeryGood
    );
}

#[test]
fn wrong_exercise_sees_no_form_signal() {
    // The fixture was recorded for a squat (`ibw`); a front squat reads `up`.
    let frames = load_fixture_frames();
    let mut analyzer = MovementAnalyzer::new(ExerciseType::FrontSquat);
    analyzer.run(frames.iter().map(|f| &f.labels));

    assert_eq!(analyzer.rep_count(), 0);
    assert!(analyzer.form_scores().is_empty());
    assert!(analyzer.metrics().is_none());
}

#[test]
fn single_threshold_mode_agrees_on_clean_reps() {
    let frames = load_fixture_frames();
    let config = AnalysisConfig {
        rep_counter: RepCounterConfig::single_threshold(0.89),
        ..Default::default()
    };
    let mut analyzer = MovementAnalyzer::with_config(config.for_exercise(ExerciseType::Squat));
    analyzer.run(frames.iter().map(|f| &f.labels));
    assert_eq!(analyzer.rep_count(), 3);
}

#[test]
fn hysteresis_rejects_jitter_that_single_threshold_counts() {
    let jitter: Vec<FrameLabels> = [0.90, 0.88, 0.90, 0.87, 0.91, 0.88, 0.90, 0.88, 0.91]
        .iter()
        .map(|&v| FrameLabels::from_detections([("ibw", v), ("down", 0.9)]))
        .collect();

    let mut hysteresis = MovementAnalyzer::new(ExerciseType::Squat);
    hysteresis.run(&jitter);
    assert_eq!(hysteresis.rep_count(), 0);

    let crossing = SessionConfig {
        smoothing_window: 1,
        rep_counter: RepCounterConfig::single_threshold(0.89),
        ..SessionConfig::new(ExerciseType::Squat)
    };
    let mut crossing = MovementAnalyzer::with_config(crossing);
    crossing.run(&jitter);
    assert_eq!(crossing.rep_count(), 4);
}

#[test]
fn summary_serializes_for_display() {
    let frames = load_fixture_frames();
    let mut analyzer = MovementAnalyzer::new(ExerciseType::Squat);
    analyzer.run(frames.iter().map(|f| &f.labels));

    let value = serde_json::to_value(analyzer.summary()).unwrap();
    assert_eq!(value["exercise"], "squat");
    assert_eq!(value["metrics"]["repetitions"], 3);
    assert_eq!(value["metrics"]["movement_assessment"]["depth_quality"], "Very Good");
}
