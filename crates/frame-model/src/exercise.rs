//! Supported exercise types.
//!
//! The exercise type decides which detector label carries the primary
//! "locked-out" form signal. Depth is always read from [`LABEL_DOWN`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Detector label for the locked-out position on regular deadlifts and squats.
pub const LABEL_IBW: &str = "ibw";

/// Detector label for the locked-out position on every other exercise.
pub const LABEL_UP: &str = "up";

/// Detector label for the bottom/depth position.
pub const LABEL_DOWN: &str = "down";

/// Strength-training movement being analyzed. Supplied by the caller,
/// never inferred from the frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseType {
    RegularDeadlift,
    SumoDeadlift,
    Squat,
    RomanianDeadlift,
    ZercherSquat,
    FrontSquat,
}

impl ExerciseType {
    /// Every supported exercise, in display order.
    pub const ALL: [ExerciseType; 6] = [
        ExerciseType::RegularDeadlift,
        ExerciseType::SumoDeadlift,
        ExerciseType::Squat,
        ExerciseType::RomanianDeadlift,
        ExerciseType::ZercherSquat,
        ExerciseType::FrontSquat,
    ];

    /// Canonical snake_case name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RegularDeadlift => "regular_deadlift",
            Self::SumoDeadlift => "sumo_deadlift",
            Self::Squat => "squat",
            Self::RomanianDeadlift => "romanian_deadlift",
            Self::ZercherSquat => "zercher_squat",
            Self::FrontSquat => "front_squat",
        }
    }

    /// Label key holding the primary form signal for this exercise.
    pub fn primary_label(&self) -> &'static str {
        match self {
            Self::RegularDeadlift | Self::Squat => LABEL_IBW,
            _ => LABEL_UP,
        }
    }

    /// Label key holding the depth signal (the same for every exercise).
    pub fn depth_label(&self) -> &'static str {
        LABEL_DOWN
    }
}

impl fmt::Display for ExerciseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when an exercise name is not one of the supported types.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown exercise type '{name}' (expected one of: regular_deadlift, sumo_deadlift, squat, romanian_deadlift, zercher_squat, front_squat)")]
pub struct ParseExerciseError {
    pub name: String,
}

impl FromStr for ExerciseType {
    type Err = ParseExerciseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|exercise| exercise.as_str() == normalized)
            .ok_or_else(|| ParseExerciseError {
                name: s.to_string(),
            })
    }
}
