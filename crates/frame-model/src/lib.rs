//! LiftForm Frame Model
//!
//! Defines the data contracts shared by the analysis core and its callers:
//! - **Exercise:** The closed set of supported lifts and their label keys
//! - **Frame:** Per-frame detector confidences and the JSONL detection log
//! - **Thresholds:** Tunable smoothing, repetition, and risk parameters
//! - **Report:** Per-frame reports and aggregated metric snapshots
//!
//! Confidence values are nominally in `[0.0, 1.0]` but are never clamped;
//! bounds checking belongs to the detector that produced them.

pub mod exercise;
pub mod frame;
pub mod report;
pub mod thresholds;

pub use exercise::*;
pub use frame::*;
pub use report::*;
pub use thresholds::*;
