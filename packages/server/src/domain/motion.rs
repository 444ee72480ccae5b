//! Driver motion along one leg of a ride.
//!
//! A leg is `steps` evenly spaced points from `from` to `to`, excluding the
//! start and ending exactly on the target. The timing of a leg lives in the
//! use case layer (`usecase::motion`); this module only describes *where*
//! the driver is after each step.

use std::{iter::FusedIterator, time::Duration};

use super::value_object::Coordinate;

/// Number of interpolation steps per leg.
pub const DEFAULT_STEPS: u32 = 30;

/// Delay between two consecutive steps.
pub const DEFAULT_STEP_DELAY: Duration = Duration::from_millis(1500);

/// Pacing of a motion run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MotionConfig {
    pub steps: u32,
    pub step_delay: Duration,
}

impl MotionConfig {
    /// `steps` is raised to at least 1.
    pub fn new(steps: u32, step_delay: Duration) -> Self {
        Self {
            steps: steps.max(1),
            step_delay,
        }
    }

    /// Nominal duration of one full leg, saturating at `Duration::MAX`.
    pub fn leg_duration(&self) -> Duration {
        self.step_delay
            .checked_mul(self.steps)
            .unwrap_or(Duration::MAX)
    }
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self::new(DEFAULT_STEPS, DEFAULT_STEP_DELAY)
    }
}

/// Lazy, finite sequence of interpolated positions for one leg.
///
/// Yields `from + i/N * (to - from)` for `i = 1..=N`. The final item is `to`
/// itself rather than the floating point result of the formula.
#[derive(Debug, Clone)]
pub struct MotionPlan {
    from: Coordinate,
    to: Coordinate,
    steps: u32,
    // u64 so that stepping past `u32::MAX` cannot overflow
    next_step: u64,
}

impl MotionPlan {
    pub fn new(from: Coordinate, to: Coordinate, steps: u32) -> Self {
        Self {
            from,
            to,
            steps: steps.max(1),
            next_step: 1,
        }
    }
}

impl Iterator for MotionPlan {
    type Item = Coordinate;

    fn next(&mut self) -> Option<Self::Item> {
        let steps = u64::from(self.steps);
        if self.next_step > steps {
            return None;
        }
        let step = self.next_step;
        self.next_step += 1;

        if step == steps {
            return Some(self.to);
        }
        let fraction = step as f64 / f64::from(self.steps);
        Some(self.from.lerp(&self.to, fraction))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (u64::from(self.steps) + 1).saturating_sub(self.next_step);
        let remaining = usize::try_from(remaining).unwrap_or(usize::MAX);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for MotionPlan {}

impl FusedIterator for MotionPlan {}
