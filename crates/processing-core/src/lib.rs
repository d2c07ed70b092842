//! LiftForm Processing Core — The Movement Analyzer
//!
//! Turns a stream of per-frame detector confidences into lifter feedback:
//! - **Smoothing:** Moving average over the primary form signal
//! - **Rep Counting:** Hysteresis state machine over the smoothed signal
//! - **Injury Risk:** Per-frame threshold check on form and depth
//! - **Metrics:** Session averages, consistency, ratings, and a 0-10 score
//!
//! This crate is pure computation — no I/O, no platform dependencies.
//! All inputs are data; all outputs are data.

pub mod analyzer;
pub mod metrics;
pub mod rep_counter;
pub mod risk;
pub mod smoothing;

pub use analyzer::MovementAnalyzer;
pub use rep_counter::{RepCounter, RepEvent, RepMotionState};
pub use smoothing::FormSmoother;
