//! Repetition counting with hysteresis.
//!
//! The smoothed form signal sits near 1.0 at lockout and drops during the
//! descent. A rep starts when the signal falls below the start threshold and
//! completes when it climbs back above the (higher) end threshold. The gap
//! between the two thresholds, a minimum rep duration, a cooldown between
//! reps, and an abort limit together reject noise spikes, jitter, and
//! stalled motion.
//!
//! ```text
//!            v < start && cooldown elapsed
//!   Idle ───────────────────────────────────▶ InMotion
//!    ▲                                           │
//!    │  v > end && frames >= min   (count rep)   │
//!    ├───────────────────────────────────────────┤
//!    │  frames > abort limit       (discard)     │
//!    └───────────────────────────────────────────┘
//! ```

use liftform_frame_model::thresholds::RepCounterConfig;

/// Motion state of the rep counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RepMotionState {
    /// At lockout, waiting for a descent.
    Idle,
    /// A descent started and has not yet completed or been discarded.
    InMotion,
}

/// State change produced by one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepEvent {
    Started,
    Completed { repetitions: u32 },
    /// Motion exceeded the abort limit without completing.
    Aborted { frames: u32 },
}

/// Hysteresis state machine over smoothed form values.
#[derive(Debug, Clone)]
pub struct RepCounter {
    config: RepCounterConfig,
    state: RepMotionState,
    repetitions: u32,
    frames_since_last_rep: u32,
    current_rep_frames: u32,
}

impl RepCounter {
    /// Create a counter in the idle state.
    ///
    /// The cooldown counts as already elapsed so the first rep of a session
    /// can start immediately.
    pub fn new(config: RepCounterConfig) -> Self {
        Self {
            config,
            state: RepMotionState::Idle,
            repetitions: 0,
            frames_since_last_rep: config.min_frames_between_reps,
            current_rep_frames: 0,
        }
    }

    /// Advance by one frame.
    ///
    /// `None` means the frame had no detections at all: it still counts
    /// toward the cooldown but does not move the state machine.
    pub fn update(&mut self, value: Option<f64>) -> Option<RepEvent> {
        self.frames_since_last_rep = self.frames_since_last_rep.saturating_add(1);

        let value = value?;

        match self.state {
            RepMotionState::Idle => {
                if value < self.config.rep_start_threshold
                    && self.frames_since_last_rep > self.config.min_frames_between_reps
                {
                    self.state = RepMotionState::InMotion;
                    self.current_rep_frames = 1;
                    tracing::trace!(value, "rep motion started");
                    return Some(RepEvent::Started);
                }
                None
            }
            RepMotionState::InMotion => {
                self.current_rep_frames = self.current_rep_frames.saturating_add(1);

                if value > self.config.rep_end_threshold
                    && self.current_rep_frames >= self.config.min_rep_frames
                {
                    self.repetitions += 1;
                    tracing::debug!(
                        repetitions = self.repetitions,
                        frames = self.current_rep_frames,
                        "rep completed"
                    );
                    self.frames_since_last_rep = 0;
                    self.state = RepMotionState::Idle;
                    self.current_rep_frames = 0;
                    Some(RepEvent::Completed {
                        repetitions: self.repetitions,
                    })
                } else if self.current_rep_frames > self.config.abort_after_frames() {
                    let frames = self.current_rep_frames;
                    tracing::debug!(frames, "rep motion discarded after stalling");
                    self.state = RepMotionState::Idle;
                    self.current_rep_frames = 0;
                    Some(RepEvent::Aborted { frames })
                } else {
                    None
                }
            }
        }
    }

    /// Completed repetitions so far.
    pub fn repetitions(&self) -> u32 {
        self.repetitions
    }

    pub fn state(&self) -> RepMotionState {
        self.state
    }

    pub fn frames_since_last_rep(&self) -> u32 {
        self.frames_since_last_rep
    }

    pub fn current_rep_frames(&self) -> u32 {
        self.current_rep_frames
    }

    pub fn config(&self) -> &RepCounterConfig {
        &self.config
    }
}

impl Default for RepCounter {
    fn default() -> Self {
        Self::new(RepCounterConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(counter: &mut RepCounter, values: &[f64]) -> Vec<Option<RepEvent>> {
        values.iter().map(|&v| counter.update(Some(v))).collect()
    }

    #[test]
    fn test_single_rep_completes_on_last_frame() {
        let mut counter = RepCounter::default();
        let events = feed(&mut counter, &[1.0, 1.0, 0.80, 0.80, 0.80, 0.80, 0.80, 0.95]);

        assert_eq!(counter.repetitions(), 1);
        assert_eq!(events[2], Some(RepEvent::Started));
        assert_eq!(events[7], Some(RepEvent::Completed { repetitions: 1 }));
        assert!(events[3..7].iter().all(Option::is_none));
        assert_eq!(counter.state(), RepMotionState::Idle);
    }

    #[test]
    fn test_shallow_dip_is_not_counted() {
        let mut counter = RepCounter::default();
        feed(&mut counter, &[1.0, 1.0, 0.86, 0.95, 1.0]);
        assert_eq!(counter.repetitions(), 0);
        assert_eq!(counter.state(), RepMotionState::Idle);
    }

    #[test]
    fn test_too_short_motion_is_not_counted() {
        let mut counter = RepCounter::default();
        // Back above the end threshold after only 3 frames in motion.
        feed(&mut counter, &[0.80, 0.80, 0.95]);
        assert_eq!(counter.repetitions(), 0);
        assert_eq!(counter.state(), RepMotionState::InMotion);
    }

    #[test]
    fn test_value_inside_dead_zone_does_not_complete() {
        let mut counter = RepCounter::default();
        feed(&mut counter, &[0.80, 0.80, 0.80, 0.80, 0.80, 0.90, 0.91]);
        assert_eq!(counter.repetitions(), 0);
        counter.update(Some(0.93));
        assert_eq!(counter.repetitions(), 1);
    }

    #[test]
    fn test_cooldown_blocks_immediate_second_rep() {
        let mut counter = RepCounter::default();
        let dip = [0.80, 0.80, 0.80, 0.80, 0.80, 0.95];

        feed(&mut counter, &dip);
        assert_eq!(counter.repetitions(), 1);

        // Second dip right after the first: cooldown has not elapsed.
        feed(&mut counter, &dip);
        assert_eq!(counter.repetitions(), 1);
        assert_eq!(counter.state(), RepMotionState::Idle);
    }

    #[test]
    fn test_second_rep_after_cooldown() {
        let mut counter = RepCounter::default();
        let dip = [0.80, 0.80, 0.80, 0.80, 0.80, 0.95];

        feed(&mut counter, &dip);
        feed(&mut counter, &[1.0; 10]);
        feed(&mut counter, &dip);
        assert_eq!(counter.repetitions(), 2);
    }

    #[test]
    fn test_stalled_motion_is_aborted() {
        let mut counter = RepCounter::default();
        let events = feed(&mut counter, &[0.5; 21]);

        assert_eq!(events[0], Some(RepEvent::Started));
        assert_eq!(events[20], Some(RepEvent::Aborted { frames: 21 }));
        assert_eq!(counter.state(), RepMotionState::Idle);
        assert_eq!(counter.current_rep_frames(), 0);
        assert_eq!(counter.repetitions(), 0);
    }

    #[test]
    fn test_missing_frame_only_advances_cooldown() {
        let mut counter = RepCounter::default();
        feed(&mut counter, &[0.80, 0.80]);
        let frames_before = counter.current_rep_frames();
        let cooldown_before = counter.frames_since_last_rep();

        assert_eq!(counter.update(None), None);
        assert_eq!(counter.current_rep_frames(), frames_before);
        assert_eq!(counter.frames_since_last_rep(), cooldown_before + 1);
        assert_eq!(counter.state(), RepMotionState::InMotion);
    }

    #[test]
    fn test_single_threshold_mode_counts_every_crossing() {
        let mut counter = RepCounter::new(RepCounterConfig::single_threshold(0.89));
        feed(&mut counter, &[0.95, 0.85, 0.95, 0.80, 0.90, 0.70, 0.99]);
        assert_eq!(counter.repetitions(), 3);
    }

    #[test]
    fn test_single_threshold_mode_never_aborts() {
        let mut counter = RepCounter::new(RepCounterConfig::single_threshold(0.89));
        feed(&mut counter, &[0.5; 500]);
        assert_eq!(counter.state(), RepMotionState::InMotion);
        counter.update(Some(0.95));
        assert_eq!(counter.repetitions(), 1);
    }
}
