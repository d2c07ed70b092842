//! Tunable analysis parameters.
//!
//! Defaults reproduce the reference policy: a 5-frame moving average,
//! hysteresis thresholds of 0.85/0.92, a 10-frame cooldown between reps,
//! and injury-risk cutoffs of 0.80 (form) and 0.70 (depth). Any of these
//! can be overridden globally or per exercise from a JSON file.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::exercise::ExerciseType;

/// Repetition state machine parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepCounterConfig {
    /// Smoothed form value below which a descent starts.
    pub rep_start_threshold: f64,

    /// Smoothed form value above which a rep is complete.
    /// Must be `>= rep_start_threshold`; the gap is the hysteresis band.
    pub rep_end_threshold: f64,

    /// Cooldown after a completed rep before a new descent may start.
    pub min_frames_between_reps: u32,

    /// Minimum frames a rep must last to be counted.
    pub min_rep_frames: u32,

    /// Frames in motion after which an incomplete rep is discarded.
    /// `None` derives it as `2 * min_frames_between_reps`.
    pub max_rep_frames: Option<u32>,
}

impl Default for RepCounterConfig {
    fn default() -> Self {
        Self {
            rep_start_threshold: 0.85,
            rep_end_threshold: 0.92,
            min_frames_between_reps: 10,
            min_rep_frames: 5,
            max_rep_frames: None,
        }
    }
}

impl RepCounterConfig {
    /// Single-threshold crossing detector: a rep starts when the signal
    /// drops below `threshold` and completes when it rises back above it,
    /// with no duration, cooldown, or abort guard.
    pub fn single_threshold(threshold: f64) -> Self {
        Self {
            rep_start_threshold: threshold,
            rep_end_threshold: threshold,
            min_frames_between_reps: 0,
            min_rep_frames: 1,
            max_rep_frames: Some(u32::MAX),
        }
    }

    /// Effective abort limit for an in-progress rep.
    pub fn abort_after_frames(&self) -> u32 {
        self.max_rep_frames
            .unwrap_or_else(|| self.min_frames_between_reps.saturating_mul(2))
    }
}

/// Injury-risk cutoffs. A frame is flagged when either confidence falls
/// strictly below its cutoff.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskThresholds {
    pub min_form_confidence: f64,
    pub min_depth_confidence: f64,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            min_form_confidence: 0.80,
            min_depth_confidence: 0.70,
        }
    }
}

/// Per-exercise replacement of any part of the global parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExerciseOverrides {
    pub smoothing_window: Option<usize>,
    pub rep_counter: Option<RepCounterConfig>,
    pub risk: Option<RiskThresholds>,
}

/// Complete analysis configuration as loaded from disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Moving-average window length (frames).
    pub smoothing_window: usize,
    pub rep_counter: RepCounterConfig,
    pub risk: RiskThresholds,
    pub overrides: BTreeMap<ExerciseType, ExerciseOverrides>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            smoothing_window: 5,
            rep_counter: RepCounterConfig::default(),
            risk: RiskThresholds::default(),
            overrides: BTreeMap::new(),
        }
    }
}

/// Effective parameters for one analysis session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionConfig {
    pub exercise: ExerciseType,
    pub smoothing_window: usize,
    pub rep_counter: RepCounterConfig,
    pub risk: RiskThresholds,
}

impl SessionConfig {
    /// Default parameters for `exercise`.
    pub fn new(exercise: ExerciseType) -> Self {
        AnalysisConfig::default().for_exercise(exercise)
    }
}

/// Errors that can occur when loading analysis configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read analysis config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse analysis config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Invalid analysis config: {message}")]
    Invalid { message: String },
}

impl AnalysisConfig {
    /// Load and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Resolve the effective parameters for `exercise`.
    pub fn for_exercise(&self, exercise: ExerciseType) -> SessionConfig {
        let overrides = self.overrides.get(&exercise);
        SessionConfig {
            exercise,
            smoothing_window: overrides
                .and_then(|o| o.smoothing_window)
                .unwrap_or(self.smoothing_window),
            rep_counter: overrides
                .and_then(|o| o.rep_counter)
                .unwrap_or(self.rep_counter),
            risk: overrides.and_then(|o| o.risk).unwrap_or(self.risk),
        }
    }

    /// Check every resolved session config for consistency.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for exercise in ExerciseType::ALL {
            validate_session(&self.for_exercise(exercise))?;
        }
        Ok(())
    }
}

fn validate_session(config: &SessionConfig) -> Result<(), ConfigError> {
    let invalid = |message: String| ConfigError::Invalid { message };
    let exercise = config.exercise;

    if config.smoothing_window == 0 {
        return Err(invalid(format!(
            "{exercise}: smoothing_window must be at least 1"
        )));
    }

    let rep = &config.rep_counter;
    let values = [
        ("rep_start_threshold", rep.rep_start_threshold),
        ("rep_end_threshold", rep.rep_end_threshold),
        ("min_form_confidence", config.risk.min_form_confidence),
        ("min_depth_confidence", config.risk.min_depth_confidence),
    ];
    if let Some((name, value)) = values.iter().find(|(_, v)| !v.is_finite()) {
        return Err(invalid(format!("{exercise}: {name} must be finite, got {value}")));
    }

    if rep.rep_start_threshold > rep.rep_end_threshold {
        return Err(invalid(format!(
            "{exercise}: rep_start_threshold ({}) exceeds rep_end_threshold ({})",
            rep.rep_start_threshold, rep.rep_end_threshold
        )));
    }

    Ok(())
}
