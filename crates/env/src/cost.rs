//! Episode cost and termination policy.

use arm::Command;

/// Cartesian target zone: center plus a scalar tolerance width.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TargetSpec {
    pub x: f32,
    pub y: f32,
    /// Width of the tolerance zone, not a radius: both modes compare
    /// against `size / 2`.
    pub size: f32,
}

/// How hand proximity to the target is judged.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum ToleranceMode {
    /// The target is a horizontal segment: the hand must cross its height
    /// within `size / 2` laterally.
    #[default]
    Lateral,
    /// Euclidean distance to the center within `size / 2`.
    Radial,
}

/// Termination and reward policy, owned here rather than by the loop.
#[derive(Copy, Clone, Debug)]
pub struct CostConfig {
    pub mode: ToleranceMode,
    /// Weight on the per-step squared-activation effort penalty.
    pub effort_weight: f32,
    /// Terminal reward scale on reaching the target.
    pub success_reward: f32,
    /// Time constant of the terminal reward decay, seconds.
    pub time_scale: f32,
    /// Episode step budget.
    pub max_steps: u32,
    /// Episode time budget, seconds.
    pub max_time: f32,
}

impl Default for CostConfig {
    fn default() -> Self {
        Self {
            mode: ToleranceMode::Lateral,
            effort_weight: 1e-4,
            success_reward: 10.0,
            time_scale: 0.5,
            max_steps: 1000,
            max_time: 10.0,
        }
    }
}

/// Scores one step: effort penalty every step, a time-discounted bonus on
/// reaching the target, and termination on success or an exhausted budget.
#[derive(Clone, Debug)]
pub struct CostEvaluator {
    config: CostConfig,
}

impl CostEvaluator {
    #[must_use]
    pub fn new(config: CostConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &CostConfig {
        &self.config
    }

    /// Whether `hand` lies inside the target's tolerance zone.
    #[must_use]
    pub fn reached(&self, hand: [f32; 2], target: &TargetSpec) -> bool {
        let half = target.size / 2.0;
        match self.config.mode {
            ToleranceMode::Lateral => (hand[0] - target.x).abs() < half && hand[1] >= target.y,
            ToleranceMode::Radial => {
                let dx = hand[0] - target.x;
                let dy = hand[1] - target.y;
                (dx * dx + dy * dy).sqrt() < half
            }
        }
    }

    /// Produces the `(cost, done)` pair for one step. Never fails.
    #[must_use]
    pub fn evaluate(
        &self,
        hand: [f32; 2],
        target: &TargetSpec,
        t: f32,
        steps: u32,
        command: &Command,
    ) -> (f32, bool) {
        let effort: f32 = command.iter().map(|u| u * u).sum();
        let mut cost = -self.config.effort_weight * effort;

        if self.reached(hand, target) {
            cost += self.config.success_reward * (-t / self.config.time_scale).exp();
            return (cost, true);
        }
        // steps counts completed steps; this one makes it steps + 1.
        let exhausted = steps + 1 >= self.config.max_steps || t >= self.config.max_time;
        (cost, exhausted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TARGET: TargetSpec = TargetSpec { x: 0.0, y: 0.55, size: 0.04 };

    fn eval(mode: ToleranceMode) -> CostEvaluator {
        CostEvaluator::new(CostConfig { mode, ..CostConfig::default() })
    }

    #[test]
    fn lateral_mode_requires_crossing_target_height() {
        let e = eval(ToleranceMode::Lateral);
        assert!(e.reached([0.01, 0.56], &TARGET));
        assert!(!e.reached([0.01, 0.54], &TARGET));
        assert!(!e.reached([0.03, 0.56], &TARGET));
    }

    #[test]
    fn radial_mode_measures_distance() {
        let e = eval(ToleranceMode::Radial);
        assert!(e.reached([0.01, 0.56], &TARGET));
        assert!(!e.reached([0.0, 0.58], &TARGET));
    }

    #[test]
    fn success_reward_decays_with_elapsed_time() {
        let e = eval(ToleranceMode::Radial);
        let hand = [0.0, 0.55];
        let (early, done_early) = e.evaluate(hand, &TARGET, 0.1, 10, &[0.0; 6]);
        let (late, done_late) = e.evaluate(hand, &TARGET, 2.0, 200, &[0.0; 6]);
        assert!(done_early && done_late);
        assert!(early > late);
        assert!(late > 0.0);
    }

    #[test]
    fn effort_penalty_is_negative_away_from_target() {
        let e = eval(ToleranceMode::Lateral);
        let (cost, done) = e.evaluate([0.3, 0.1], &TARGET, 0.5, 50, &[0.5; 6]);
        assert!(!done);
        assert!((cost - (-1e-4 * 6.0 * 0.25)).abs() < 1e-9);
    }

    #[test]
    fn step_budget_terminates_without_reward() {
        let e = CostEvaluator::new(CostConfig { max_steps: 100, ..CostConfig::default() });
        let (cost, done) = e.evaluate([0.3, 0.1], &TARGET, 0.99, 99, &[0.0; 6]);
        assert!(done);
        assert!(cost <= 0.0);
    }

    #[test]
    fn time_budget_terminates() {
        let e = CostEvaluator::new(CostConfig { max_time: 1.0, ..CostConfig::default() });
        let (_, done) = e.evaluate([0.3, 0.1], &TARGET, 1.0, 5, &[0.0; 6]);
        assert!(done);
    }
}
