//! Per-session movement analysis.
//!
//! A [`MovementAnalyzer`] is the state of one analysis session: one video or
//! one live stream. It is driven frame by frame, in capture order, by the
//! loop that owns it. Nothing is shared between sessions, so independent
//! sessions can run on separate threads without synchronization.

use liftform_common::error::{LiftformError, LiftformResult};
use liftform_frame_model::exercise::ExerciseType;
use liftform_frame_model::frame::FrameLabels;
use liftform_frame_model::report::{FrameReport, MetricsSnapshot, RiskLevel, SessionSummary};
use liftform_frame_model::thresholds::{AnalysisConfig, SessionConfig};

use crate::metrics;
use crate::rep_counter::{RepCounter, RepEvent, RepMotionState};
use crate::risk;
use crate::smoothing::FormSmoother;

/// Movement analysis state for a single session.
#[derive(Debug, Clone)]
pub struct MovementAnalyzer {
    config: SessionConfig,
    form_scores: Vec<f64>,
    depth_scores: Vec<f64>,
    smoother: FormSmoother,
    rep_counter: RepCounter,
    frames_processed: u64,
    risk_frames: u64,
    last_risk: Option<RiskLevel>,
}

impl MovementAnalyzer {
    /// Start a session for `exercise` with default thresholds.
    pub fn new(exercise: ExerciseType) -> Self {
        Self::with_config(SessionConfig::new(exercise))
    }

    /// Start a session with explicit parameters.
    pub fn with_config(config: SessionConfig) -> Self {
        tracing::debug!(
            exercise = %config.exercise,
            smoothing_window = config.smoothing_window,
            "starting analysis session"
        );
        Self {
            smoother: FormSmoother::new(config.smoothing_window),
            rep_counter: RepCounter::new(config.rep_counter),
            config,
            form_scores: Vec::new(),
            depth_scores: Vec::new(),
            frames_processed: 0,
            risk_frames: 0,
            last_risk: None,
        }
    }

    /// Start a session from a caller-supplied exercise name.
    ///
    /// Fails before any frame is processed if the name is not a supported
    /// exercise or the configuration is inconsistent.
    pub fn from_exercise_name(name: &str, config: &AnalysisConfig) -> LiftformResult<Self> {
        let exercise: ExerciseType = name
            .parse()
            .map_err(|e| LiftformError::invalid_input(format!("{e}")))?;
        config
            .validate()
            .map_err(|e| LiftformError::config(e.to_string()))?;
        Ok(Self::with_config(config.for_exercise(exercise)))
    }

    /// Process one frame and return its raw `(form, depth)` confidences.
    pub fn process_frame(&mut self, labels: &FrameLabels) -> (Option<f64>, Option<f64>) {
        let report = self.step(labels);
        (report.form, report.depth)
    }

    /// Process one frame and return the full per-frame report.
    pub fn step(&mut self, labels: &FrameLabels) -> FrameReport {
        let exercise = self.config.exercise;
        let form = labels.primary_form(exercise);
        let depth = labels.depth(exercise);

        if let Some(value) = form {
            self.form_scores.push(value);
        }
        if let Some(value) = depth {
            self.depth_scores.push(value);
        }

        let smoothed_form = self.smoother.smooth(form);

        // A frame with no detections at all carries no evidence about the
        // lift; only the cooldown advances.
        let signal = (!labels.is_empty()).then_some(smoothed_form);
        let rep_completed = matches!(
            self.rep_counter.update(signal),
            Some(RepEvent::Completed { .. })
        );

        let risk = risk::evaluate_with(labels, exercise, &self.config.risk);
        if risk.is_stop() {
            self.risk_frames += 1;
        }
        if self.last_risk != Some(risk) {
            tracing::debug!(frame = self.frames_processed, %risk, "injury risk changed");
            self.last_risk = Some(risk);
        }

        let report = FrameReport {
            frame_index: self.frames_processed,
            form,
            depth,
            smoothed_form,
            risk,
            repetitions: self.rep_counter.repetitions(),
            rep_completed,
        };
        self.frames_processed += 1;
        report
    }

    /// Process a sequence of frames in order.
    pub fn run<'a, I>(&mut self, frames: I) -> Vec<FrameReport>
    where
        I: IntoIterator<Item = &'a FrameLabels>,
    {
        frames.into_iter().map(|labels| self.step(labels)).collect()
    }

    /// Injury-risk classification of `labels` under this session's thresholds.
    /// Does not touch session state.
    pub fn risk(&self, labels: &FrameLabels) -> RiskLevel {
        risk::evaluate_with(labels, self.config.exercise, &self.config.risk)
    }

    /// Current metrics, or `None` until both form and depth were observed.
    pub fn metrics(&self) -> Option<MetricsSnapshot> {
        metrics::aggregate(
            &self.form_scores,
            &self.depth_scores,
            self.rep_counter.repetitions(),
        )
    }

    /// Session totals plus the current metrics snapshot.
    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            exercise: self.config.exercise,
            frames_processed: self.frames_processed,
            risk_frames: self.risk_frames,
            repetitions: self.rep_counter.repetitions(),
            metrics: self.metrics(),
        }
    }

    pub fn exercise(&self) -> ExerciseType {
        self.config.exercise
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn rep_count(&self) -> u32 {
        self.rep_counter.repetitions()
    }

    pub fn motion_state(&self) -> RepMotionState {
        self.rep_counter.state()
    }

    pub fn frames_processed(&self) -> u64 {
        self.frames_processed
    }

    /// Observed primary form values, in frame order.
    pub fn form_scores(&self) -> &[f64] {
        &self.form_scores
    }

    /// Observed depth values, in frame order.
    pub fn depth_scores(&self) -> &[f64] {
        &self.depth_scores
    }

    pub fn smoother(&self) -> &FormSmoother {
        &self.smoother
    }
}
