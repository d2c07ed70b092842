//! Per-frame detector output and the detection log format.
//!
//! A detection log is JSONL: one [`DetectionFrame`] per line, in capture
//! order. Blank lines and lines starting with `#` are skipped so a log can
//! carry a header comment.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::exercise::ExerciseType;

/// Label confidences observed in one frame.
///
/// A missing key means "not detected this frame", which is different from
/// a confidence of zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FrameLabels(BTreeMap<String, f64>);

impl FrameLabels {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build labels from raw `(class name, confidence)` detections.
    ///
    /// When a class is detected more than once the later box wins.
    pub fn from_detections<I, S>(detections: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let mut labels = Self::new();
        for (name, confidence) in detections {
            labels.insert(name, confidence);
        }
        labels
    }

    pub fn insert(&mut self, label: impl Into<String>, confidence: f64) {
        self.0.insert(label.into(), confidence);
    }

    /// Confidence for `label`, if it was detected.
    pub fn get(&self, label: &str) -> Option<f64> {
        self.0.get(label).copied()
    }

    /// Primary form confidence for the given exercise.
    pub fn primary_form(&self, exercise: ExerciseType) -> Option<f64> {
        self.get(exercise.primary_label())
    }

    /// Depth confidence.
    pub fn depth(&self, exercise: ExerciseType) -> Option<f64> {
        self.get(exercise.depth_label())
    }

    /// True when the detector reported nothing at all for the frame.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for FrameLabels {
    fn from_iter<T: IntoIterator<Item = (S, f64)>>(iter: T) -> Self {
        Self::from_detections(iter)
    }
}

/// 2-D image-space keypoint `[x, y]`.
pub type Keypoint = [f64; 2];

/// One line of a detection log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionFrame {
    /// Capture index of the frame, if the producer recorded one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frame: Option<u64>,

    /// Label confidences for this frame.
    #[serde(default)]
    pub labels: FrameLabels,

    /// Keypoints of the first detected person. Carried through for
    /// rendering only; the analysis core never reads them.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keypoints: Vec<Keypoint>,
}

impl DetectionFrame {
    pub fn new(frame: u64, labels: FrameLabels) -> Self {
        Self {
            frame: Some(frame),
            labels,
            keypoints: Vec::new(),
        }
    }
}

/// Errors that can occur when reading a detection log.
#[derive(Debug, thiserror::Error)]
pub enum FrameStreamError {
    #[error("Failed to read detection log {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid detection frame on line {line}: {source}")]
    Parse {
        line: usize,
        source: serde_json::Error,
    },
}

/// Parse detection frames from JSONL content (one JSON object per line).
pub fn parse_frames(jsonl: &str) -> Result<Vec<DetectionFrame>, FrameStreamError> {
    jsonl
        .lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
        .map(|(line_no, line)| {
            serde_json::from_str(line).map_err(|source| FrameStreamError::Parse {
                line: line_no,
                source,
            })
        })
        .collect()
}

/// Read and parse a detection log from disk.
pub fn read_frames(path: impl AsRef<Path>) -> Result<Vec<DetectionFrame>, FrameStreamError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| FrameStreamError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_frames(&content)
}

/// Serialize detection frames to JSONL format.
pub fn serialize_frames(frames: &[DetectionFrame]) -> Result<String, serde_json::Error> {
    let mut output = String::new();
    for frame in frames {
        output.push_str(&serde_json::to_string(frame)?);
        output.push('\n');
    }
    Ok(output)
}
