//! Moving-average smoothing of the primary form signal.
//!
//! Detector confidences flicker from frame to frame. The smoother keeps the
//! last N raw observations and reports their mean, so the rep counter sees a
//! stable signal. A frame with no observation holds the previous output
//! instead of dragging the average toward zero.

use std::collections::VecDeque;

/// Default moving-average window length (frames).
pub const DEFAULT_WINDOW: usize = 5;

/// Bounded moving-average filter.
#[derive(Debug, Clone)]
pub struct FormSmoother {
    window: VecDeque<f64>,
    capacity: usize,
    last_output: Option<f64>,
}

impl FormSmoother {
    /// Create a smoother averaging over `capacity` frames (at least one).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            window: VecDeque::with_capacity(capacity + 1),
            capacity,
            last_output: None,
        }
    }

    /// Feed one frame's raw value and return the smoothed value.
    ///
    /// An absent value is replaced by the most recent smoothed output, or by
    /// 0.0 when nothing has been observed yet.
    pub fn smooth(&mut self, raw: Option<f64>) -> f64 {
        let value = raw.unwrap_or_else(|| self.last_output.unwrap_or(0.0));

        self.window.push_back(value);
        if self.window.len() > self.capacity {
            self.window.pop_front();
        }

        let mean = self.window.iter().sum::<f64>() / self.window.len() as f64;
        self.last_output = Some(mean);
        mean
    }

    /// Most recent smoothed output.
    pub fn last_output(&self) -> Option<f64> {
        self.last_output
    }

    /// Current window contents, oldest first.
    pub fn window(&self) -> impl Iterator<Item = f64> + '_ {
        self.window.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.window.len()
    }

    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for FormSmoother {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_missing_value_yields_zero() {
        let mut smoother = FormSmoother::default();
        assert_eq!(smoother.smooth(None), 0.0);
        assert_eq!(smoother.len(), 1);
    }

    #[test]
    fn test_mean_of_partial_window() {
        let mut smoother = FormSmoother::default();
        smoother.smooth(Some(1.0));
        let out = smoother.smooth(Some(0.5));
        assert!((out - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_oldest_value_is_evicted() {
        let mut smoother = FormSmoother::new(3);
        for v in [0.0, 1.0, 1.0, 1.0] {
            smoother.smooth(Some(v));
        }
        assert_eq!(smoother.len(), 3);
        assert_eq!(smoother.window().collect::<Vec<_>>(), vec![1.0, 1.0, 1.0]);
        assert_eq!(smoother.last_output(), Some(1.0));
    }

    #[test]
    fn test_missing_value_holds_previous_output() {
        let mut smoother = FormSmoother::default();
        smoother.smooth(Some(1.0));
        let before = smoother.smooth(Some(0.6));
        let held = smoother.smooth(None);

        // Window is [1.0, 0.6, 0.8]; the gap did not pull the mean to zero.
        assert!((before - 0.8).abs() < 1e-12);
        assert!((held - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_zero_capacity_is_clamped() {
        let mut smoother = FormSmoother::new(0);
        assert_eq!(smoother.capacity(), 1);
        smoother.smooth(Some(0.2));
        assert_eq!(smoother.smooth(Some(0.9)), 0.9);
    }
}
