//! Analysis outputs: per-frame reports and aggregated metric snapshots.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::exercise::ExerciseType;

/// Injury-risk classification of a single frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Safe,
    Stop,
}

impl RiskLevel {
    pub fn is_stop(&self) -> bool {
        matches!(self, Self::Stop)
    }

    /// Lifter-facing message for overlays.
    pub fn message(&self) -> &'static str {
        match self {
            Self::Safe => "No significant risk",
            Self::Stop => "stop right now to prevent injury",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Qualitative bucket for a score in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QualityRating {
    #[serde(rename = "Excellent")]
    Excellent,
    #[serde(rename = "Very Good")]
    VeryGood,
    #[serde(rename = "Good")]
    Good,
    #[serde(rename = "Fair")]
    Fair,
    #[serde(rename = "Needs Improvement")]
    NeedsImprovement,
}

impl QualityRating {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::VeryGood => "Very Good",
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::NeedsImprovement => "Needs Improvement",
        }
    }
}

impl fmt::Display for QualityRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Summary statistics over one score series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesMetrics {
    pub average: f64,
    pub min: f64,
    pub max: f64,
    /// `1 - (max - min)`. Not clamped: a range wider than 1.0 goes negative.
    pub consistency: f64,
}

/// Qualitative assessment of a session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MovementAssessment {
    pub form_quality: QualityRating,
    pub depth_quality: QualityRating,
    pub form_consistency: QualityRating,
    pub depth_consistency: QualityRating,
    /// Overall score out of 10, rounded to one decimal.
    pub score: f64,
}

/// Point-in-time metrics derived from a session's history.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    /// Number of frames with a primary form observation.
    pub frames_analyzed: usize,
    pub repetitions: u32,
    pub form_metrics: SeriesMetrics,
    pub depth_metrics: SeriesMetrics,
    pub movement_assessment: MovementAssessment,
}

/// What the analyzer observed and decided for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameReport {
    /// Zero-based position of the frame in the session.
    pub frame_index: u64,
    /// Raw primary form confidence, if detected.
    pub form: Option<f64>,
    /// Raw depth confidence, if detected.
    pub depth: Option<f64>,
    /// Moving-average form value fed to the rep counter.
    pub smoothed_form: f64,
    pub risk: RiskLevel,
    /// Total repetitions after this frame.
    pub repetitions: u32,
    /// Whether a repetition completed on this frame.
    pub rep_completed: bool,
}

/// End-of-session summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub exercise: ExerciseType,
    pub frames_processed: u64,
    /// Frames classified as [`RiskLevel::Stop`].
    pub risk_frames: u64,
    pub repetitions: u32,
    /// `None` until both form and depth have been observed.
    pub metrics: Option<MetricsSnapshot>,
}
