//! Session metrics aggregation.
//!
//! Folds the form and depth histories into a [`MetricsSnapshot`]. The
//! overall score weights form at 60% and depth at 40%, scaled to 10.

use liftform_frame_model::report::{
    MetricsSnapshot, MovementAssessment, QualityRating, SeriesMetrics,
};

const FORM_WEIGHT: f64 = 0.6;
const DEPTH_WEIGHT: f64 = 0.4;

/// Map a `[0, 1]` value (an average or a consistency) to a rating.
pub fn quality_assessment(value: f64) -> QualityRating {
    if value >= 0.9 {
        QualityRating::Excellent
    } else if value >= 0.8 {
        QualityRating::VeryGood
    } else if value >= 0.7 {
        QualityRating::Good
    } else if value >= 0.6 {
        QualityRating::Fair
    } else {
        QualityRating::NeedsImprovement
    }
}

/// Average, extremes, and consistency of one series. `None` when empty.
pub fn series_metrics(values: &[f64]) -> Option<SeriesMetrics> {
    if values.is_empty() {
        return None;
    }

    let average = values.iter().sum::<f64>() / values.len() as f64;
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    Some(SeriesMetrics {
        average,
        min,
        max,
        consistency: 1.0 - (max - min),
    })
}

/// Build a snapshot from the accumulated histories.
///
/// Returns `None` until both series have at least one value.
pub fn aggregate(form: &[f64], depth: &[f64], repetitions: u32) -> Option<MetricsSnapshot> {
    let form_metrics = series_metrics(form)?;
    let depth_metrics = series_metrics(depth)?;

    let score = round_to_tenth(
        (form_metrics.average * FORM_WEIGHT + depth_metrics.average * DEPTH_WEIGHT) * 10.0,
    );

    Some(MetricsSnapshot {
        frames_analyzed: form.len(),
        repetitions,
        form_metrics,
        depth_metrics,
        movement_assessment: MovementAssessment {
            form_quality: quality_assessment(form_metrics.average),
            depth_quality: quality_assessment(depth_metrics.average),
            form_consistency: quality_assessment(form_metrics.consistency),
            depth_consistency: quality_assessment(depth_metrics.consistency),
            score,
        },
    })
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
