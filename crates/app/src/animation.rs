//! Timing of the brightness animations.

use std::time::Duration;

/// Number of steps of a full brightness ramp.
pub const RAMP_STEPS: u32 = 100;
/// Each ramp step costs up to this number of command delays.
const DELAYS_PER_STEP: u32 = 3;

/// Step count and per-step pause of a ramp with the given duration.
///
/// The bridge cannot accept commands faster than the command delay, so the short ramps
/// skip intermediate levels instead of squeezing the pauses.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationPlan {
    /// Distance between two consecutive ramp levels.
    pub step: u32,
    /// Number of steps the ramp duration is split into.
    pub total_steps: f64,
    /// Pause after each step, never shorter than the command delay.
    pub step_delay: Duration,
}

impl AnimationPlan {
    /// Computes a plan for the ramp which should last `duration`.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn new(duration: Duration, command_delay: Duration) -> Self {
        let min_duration = command_delay * RAMP_STEPS * DELAYS_PER_STEP;

        let step = if duration >= min_duration {
            1
        } else if duration.is_zero() {
            RAMP_STEPS
        } else {
            let ratio = min_duration.as_secs_f64() / duration.as_secs_f64();
            (ratio.ceil() as u32).clamp(1, RAMP_STEPS)
        };

        let total_steps = f64::from(RAMP_STEPS) / f64::from(step);
        let step_delay = duration.div_f64(total_steps).max(command_delay);
        Self {
            step,
            total_steps,
            step_delay,
        }
    }

    /// Ramp levels in percents of the full progress.
    pub fn levels(&self) -> impl Iterator<Item = u32> {
        (0..RAMP_STEPS).step_by(self.step as usize)
    }
}
