/// Fixed-rate simulation clock driven by variable render-frame deltas.
///
/// Frame time is accumulated and paid out in whole steps of `step` seconds,
/// so anything driven by [`FixedTimestep::advance`] runs the same number of
/// times for the same wall-clock span regardless of frame rate.
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    /// Length of one simulation step in seconds.
    step: f32,
    /// Unspent frame time carried into the next frame.
    accumulator: f32,
    /// Cap on steps paid out in a single frame (spiral-of-death guard).
    max_steps: u32,
}

impl FixedTimestep {
    /// Default catch-up cap per frame.
    pub const DEFAULT_MAX_STEPS: u32 = 8;

    /// Create a clock with the given step length in seconds.
    ///
    /// Non-positive or non-finite steps fall back to 1/50 s.
    #[must_use]
    pub fn new(step: f32) -> Self {
        let step = if step.is_finite() && step > 0.0 {
            step
        } else {
            1.0 / 50.0
        };
        Self {
            step,
            accumulator: 0.0,
            max_steps: Self::DEFAULT_MAX_STEPS,
        }
    }

    /// Override the per-frame catch-up cap (minimum 1).
    #[must_use]
    pub fn with_max_steps(mut self, max_steps: u32) -> Self {
        self.max_steps = max_steps.max(1);
        self
    }

    /// Step length in seconds.
    #[must_use]
    pub fn step(&self) -> f32 {
        self.step
    }

    /// Fraction of a step currently accumulated, in `[0, 1)`.
    #[must_use]
    pub fn alpha(&self) -> f32 {
        self.accumulator / self.step
    }

    /// Add a frame's elapsed time and return how many fixed steps are due.
    ///
    /// When more than `max_steps` are owed, the surplus time is dropped.
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        if frame_dt.is_finite() && frame_dt > 0.0 {
            self.accumulator += frame_dt;
        }

        let mut steps = 0;
        while self.accumulator >= self.step && steps < self.max_steps {
            self.accumulator -= self.step;
            steps += 1;
        }
        if steps == self.max_steps && self.accumulator >= self.step {
            // Drop the backlog instead of catching up forever.
            self.accumulator %= self.step;
        }
        steps
    }
}

impl Default for FixedTimestep {
    fn default() -> Self {
        Self::new(1.0 / 50.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pays_out_whole_steps() {
        let mut clock = FixedTimestep::new(0.25);
        assert_eq!(clock.advance(0.1), 0);
        assert_eq!(clock.advance(0.1), 0);
        assert_eq!(clock.advance(0.1), 1);
        assert!((clock.alpha() - 0.2).abs() < 1e-5);
        assert_eq!(clock.advance(0.5), 2);
    }

    #[test]
    fn same_span_same_steps_regardless_of_frame_rate() {
        let mut fast = FixedTimestep::new(0.5);
        let mut slow = FixedTimestep::new(0.5);
        let fast_steps: u32 = (0..40).map(|_| fast.advance(0.125)).sum();
        let slow_steps: u32 = (0..10).map(|_| slow.advance(0.5)).sum();
        assert_eq!(fast_steps, 10);
        assert_eq!(slow_steps, 10);
    }

    #[test]
    fn backlog_is_capped() {
        let mut clock = FixedTimestep::new(0.5).with_max_steps(3);
        assert_eq!(clock.advance(10.0), 3);
        assert!(clock.alpha() < 1.0);
        assert_eq!(clock.advance(0.0), 0);
    }

    #[test]
    fn ignores_bad_deltas() {
        let mut clock = FixedTimestep::new(0.5);
        assert_eq!(clock.advance(-1.0), 0);
        assert_eq!(clock.advance(f32::NAN), 0);
        assert_eq!(clock.advance(f32::INFINITY), 0);
        assert_eq!(FixedTimestep::new(0.0).step(), 1.0 / 50.0);
    }
}
