//! Per-frame injury-risk check.

use liftform_frame_model::exercise::ExerciseType;
use liftform_frame_model::frame::FrameLabels;
use liftform_frame_model::report::RiskLevel;
use liftform_frame_model::thresholds::RiskThresholds;

/// Classify one frame against the default thresholds.
pub fn evaluate(labels: &FrameLabels, exercise: ExerciseType) -> RiskLevel {
    evaluate_with(labels, exercise, &RiskThresholds::default())
}

/// Classify one frame.
///
/// Labels the detector did not report count as fully confident (1.0), so a
/// missed detection alone never raises the flag.
pub fn evaluate_with(
    labels: &FrameLabels,
    exercise: ExerciseType,
    thresholds: &RiskThresholds,
) -> RiskLevel {
    let form = labels.primary_form(exercise).unwrap_or(1.0);
    let depth = labels.depth(exercise).unwrap_or(1.0);

    if form < thresholds.min_form_confidence || depth < thresholds.min_depth_confidence {
        RiskLevel::Stop
    } else {
        RiskLevel::Safe
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(pairs: &[(&str, f64)]) -> FrameLabels {
        pairs.iter().map(|&(k, v)| (k, v)).collect()
    }

    #[test]
    fn test_shallow_depth_alone_triggers_stop() {
        let frame = labels(&[("ibw", 0.95), ("down", 0.65)]);
        assert_eq!(evaluate(&frame, ExerciseType::Squat), RiskLevel::Stop);
    }

    #[test]
    fn test_low_form_triggers_stop() {
        let frame = labels(&[("ibw", 0.79), ("down", 0.95)]);
        assert_eq!(
            evaluate(&frame, ExerciseType::RegularDeadlift),
            RiskLevel::Stop
        );
    }

    #[test]
    fn test_cutoffs_are_strict() {
        let frame = labels(&[("up", 0.80), ("down", 0.70)]);
        assert_eq!(evaluate(&frame, ExerciseType::ZercherSquat), RiskLevel::Safe);
    }

    #[test]
    fn test_missing_labels_are_safe() {
        assert_eq!(
            evaluate(&FrameLabels::new(), ExerciseType::FrontSquat),
            RiskLevel::Safe
        );
    }

    #[test]
    fn test_uses_exercise_specific_key() {
        // A low `ibw` is irrelevant for a sumo deadlift, which reads `up`.
        let frame = labels(&[("ibw", 0.1), ("up", 0.9), ("down", 0.9)]);
        assert_eq!(evaluate(&frame, ExerciseType::SumoDeadlift), RiskLevel::Safe);
        assert_eq!(evaluate(&frame, ExerciseType::Squat), RiskLevel::Stop);
    }

    #[test]
    fn test_custom_thresholds() {
        let frame = labels(&[("ibw", 0.85), ("down", 0.75)]);
        let strict = RiskThresholds {
            min_form_confidence: 0.9,
            min_depth_confidence: 0.7,
        };
        assert_eq!(evaluate(&frame, ExerciseType::Squat), RiskLevel::Safe);
        assert_eq!(
            evaluate_with(&frame, ExerciseType::Squat, &strict),
            RiskLevel::Stop
        );
    }
}
