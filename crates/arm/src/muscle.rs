//! Muscle actuation noise and low-pass filtering.

use crate::types::{Command, MUSCLES};

/// Converts a raw commanded activation vector into the noisy, smoothed
/// command the dynamics actually sees.
///
/// Each muscle is perturbed independently by multiplicative noise
/// `u * (1 + k * n)` with `n` uniform in [-1, 1], then passed through a
/// first-order low-pass emulating motor-unit response latency. The previous
/// filtered output is owned state, zeroed by [`reset`] at episode start so
/// nothing leaks across episodes.
///
/// The random source is injected as a seed so tests can reproduce noise
/// exactly; with noise disabled only the smoothing applies.
///
/// [`reset`]: MuscleFilter::reset
#[derive(Debug)]
pub struct MuscleFilter {
    knoise: [f32; MUSCLES],
    smoothing: f32,
    noise_enabled: bool,
    rng: fastrand::Rng,
    previous: Command,
}

impl MuscleFilter {
    #[must_use]
    pub fn new(knoise: [f32; MUSCLES], smoothing: f32, noise_enabled: bool, seed: u64) -> Self {
        Self {
            knoise,
            smoothing,
            noise_enabled,
            rng: fastrand::Rng::with_seed(seed),
            previous: [0.0; MUSCLES],
        }
    }

    /// Clears the low-pass history for a new episode.
    pub fn reset(&mut self) {
        self.previous = [0.0; MUSCLES];
    }

    pub fn set_noise_enabled(&mut self, enabled: bool) {
        self.noise_enabled = enabled;
    }

    /// Perturbs and smooths one command. Always succeeds; post-filter values
    /// may leave [0, 1] and are clamped downstream by the dynamics.
    pub fn filter(&mut self, command: &Command) -> Command {
        let out = self.preview(command);
        self.commit(&out);
        out
    }

    /// Perturbs and smooths one command without persisting the low-pass
    /// history, so a caller can discard the result if the step it feeds
    /// fails. The noise draw is consumed either way.
    pub fn preview(&mut self, command: &Command) -> Command {
        let mut out = [0.0; MUSCLES];
        for i in 0..MUSCLES {
            let mut u = command[i];
            if self.noise_enabled {
                let n = self.rng.f32() * 2.0 - 1.0;
                u *= 1.0 + self.knoise[i] * n;
            }
            out[i] = self.previous[i] + self.smoothing * (u - self.previous[i]);
        }
        out
    }

    /// Persists a previewed output as the low-pass history for the next
    /// call.
    pub fn commit(&mut self, output: &Command) {
        self.previous = *output;
    }
}
