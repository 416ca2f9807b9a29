//! Episode state machine orchestrating filter, dynamics, delay, and cost.

use crate::cost::{CostConfig, CostEvaluator, TargetSpec};
use crate::delay::DelayBuffer;
use crate::error::EnvError;
use arm::{ArmModel, ArmState, Command, MuscleFilter, MUSCLES};

/// Where an episode is in its lifecycle.
///
/// `Done` is terminal: only an explicit `reset` leaves it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    Uninitialized,
    Ready,
    Stepping,
    Done,
}

/// Step and time counters, recreated on every reset.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct EpisodeCounters {
    pub steps: u32,
    pub t: f32,
}

/// Loop-level settings; the cost block is owned by the evaluator.
#[derive(Clone, Debug)]
pub struct ReachConfig {
    /// Integration timestep, seconds.
    pub dt: f32,
    /// Sensorimotor delay depth in steps.
    pub delay: usize,
    /// Angular speed bound used for the observation box.
    pub max_speed: f32,
    pub target: TargetSpec,
    pub cost: CostConfig,
}

impl Default for ReachConfig {
    fn default() -> Self {
        Self {
            dt: 0.01,
            delay: 3,
            max_speed: 5.0,
            target: TargetSpec { x: 0.0, y: 0.55, size: 0.04 },
            cost: CostConfig::default(),
        }
    }
}

/// Diagnostic record of one step, mirroring the loop's internals: the true
/// states on both sides of integration, the raw and filtered commands, and
/// the resulting geometry. Returned to the caller, never persisted.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct StepTrace {
    pub state_before: ArmState,
    pub action: Command,
    pub filtered: Command,
    pub state_after: ArmState,
    pub elbow: [f32; 2],
    pub hand: [f32; 2],
}

impl StepTrace {
    /// Flattened numeric row for external logging.
    #[must_use]
    pub fn as_row(&self) -> Vec<f32> {
        let mut row = Vec::with_capacity(24);
        row.extend_from_slice(&self.state_before.as_array());
        row.extend_from_slice(&self.action);
        row.extend_from_slice(&self.filtered);
        row.extend_from_slice(&self.state_after.as_array());
        row.extend_from_slice(&self.elbow);
        row.extend_from_slice(&self.hand);
        row
    }
}

/// Everything one `step` hands back.
#[derive(Copy, Clone, Debug)]
pub struct StepOutcome {
    /// The delayed state. Callers never see the instantaneous truth here.
    pub observation: ArmState,
    pub reward: f32,
    pub done: bool,
    pub trace: StepTrace,
}

/// The target-reaching environment.
///
/// Per step: raw action -> [`MuscleFilter`] -> [`ArmModel::advance`] ->
/// forward kinematics -> [`DelayBuffer`] -> [`CostEvaluator`]. The true
/// state drives dynamics and cost; the returned observation always lags by
/// the configured delay.
///
/// Single-threaded and synchronous; a host wanting parallel episodes gives
/// each one its own instance.
pub struct ReachEnv {
    model: Box<dyn ArmModel>,
    filter: MuscleFilter,
    delay: DelayBuffer,
    evaluator: CostEvaluator,
    target: TargetSpec,
    table: Vec<[f32; 2]>,
    dt: f32,
    max_speed: f32,
    state: ArmState,
    elbow: [f32; 2],
    hand: [f32; 2],
    phase: Phase,
    counters: EpisodeCounters,
}

impl ReachEnv {
    #[must_use]
    pub fn new(
        mut model: Box<dyn ArmModel>,
        filter: MuscleFilter,
        table: Vec<[f32; 2]>,
        config: ReachConfig,
    ) -> Self {
        model.set_dt(config.dt);
        Self {
            model,
            filter,
            delay: DelayBuffer::new(config.delay),
            evaluator: CostEvaluator::new(config.cost),
            target: config.target,
            table,
            dt: config.dt,
            max_speed: config.max_speed,
            state: ArmState::ZERO,
            elbow: [0.0; 2],
            hand: [0.0; 2],
            phase: Phase::Uninitialized,
            counters: EpisodeCounters::default(),
        }
    }

    /// Starts an episode at entry `start_index` of the initial-position
    /// table and returns the initial (true) state; delayed reads begin with
    /// the first step.
    ///
    /// # Errors
    ///
    /// [`EnvError::IndexOutOfRange`] when the index exceeds the table, and
    /// [`arm::ArmError::UnreachableTarget`] (via `Arm`) when the table entry
    /// lies outside the workspace; both leave counters and the delay buffer
    /// untouched.
    pub fn reset(&mut self, start_index: usize) -> Result<ArmState, EnvError> {
        let start = *self
            .table
            .get(start_index)
            .ok_or(EnvError::IndexOutOfRange { index: start_index, len: self.table.len() })?;
        let theta = self.model.inverse_kinematics(start)?;

        self.state = ArmState::at_rest(theta);
        let (elbow, hand) = self.model.forward_kinematics(theta);
        self.elbow = elbow;
        self.hand = hand;
        self.delay.reset();
        self.filter.reset();
        self.counters = EpisodeCounters::default();
        self.phase = Phase::Ready;
        tracing::debug!(start_index, ?theta, ?hand, "episode reset");
        Ok(self.state)
    }

    /// Advances the episode by one action.
    ///
    /// # Errors
    ///
    /// [`EnvError::InvalidState`] outside `Ready`/`Stepping`,
    /// [`EnvError::InvalidActionShape`] for a wrong-length action (both
    /// checked before any mutation), and arm-level failures from the
    /// dynamics.
    pub fn step(&mut self, action: &[f32]) -> Result<StepOutcome, EnvError> {
        if !matches!(self.phase, Phase::Ready | Phase::Stepping) {
            return Err(EnvError::InvalidState(self.phase));
        }
        let command: Command = action
            .try_into()
            .map_err(|_| EnvError::InvalidActionShape { expected: MUSCLES, got: action.len() })?;

        // The filter history is only committed once the dynamics accepts the
        // step, keeping a failing advance free of side effects.
        let filtered = self.filter.preview(&command);
        let state_before = self.state;
        let state_after = self.model.advance(&state_before, &filtered)?;
        self.filter.commit(&filtered);
        self.state = state_after;

        let (elbow, hand) = self.model.forward_kinematics(state_after.theta);
        self.elbow = elbow;
        self.hand = hand;

        let observation = self.delay.push(state_after);
        let (reward, done) = self.evaluator.evaluate(
            hand,
            &self.target,
            self.counters.t,
            self.counters.steps,
            &filtered,
        );
        self.counters.steps += 1;
        self.counters.t += self.dt;

        self.phase = if done {
            tracing::trace!(steps = self.counters.steps, t = self.counters.t, "episode done");
            Phase::Done
        } else {
            Phase::Stepping
        };

        Ok(StepOutcome {
            observation,
            reward,
            done,
            trace: StepTrace { state_before, action: command, filtered, state_after, elbow, hand },
        })
    }

    /// Observation box `(low, high)` in state order: velocities bounded by
    /// the configured maximum speed, angles by the joint limits.
    #[must_use]
    pub fn observation_bounds(&self) -> ([f32; 4], [f32; 4]) {
        let b = self.model.bounds();
        (
            [-self.max_speed, -self.max_speed, b.lower[0], b.lower[1]],
            [self.max_speed, self.max_speed, b.upper[0], b.upper[1]],
        )
    }

    /// Action box `(low, high)`: each activation in the closed unit interval.
    #[must_use]
    pub fn action_bounds(&self) -> ([f32; MUSCLES], [f32; MUSCLES]) {
        ([0.0; MUSCLES], [1.0; MUSCLES])
    }

    /// The joint-space state that would place the hand at the target center,
    /// at rest.
    ///
    /// # Errors
    ///
    /// Propagates [`arm::ArmError::UnreachableTarget`] for an unreachable
    /// target configuration.
    pub fn target_joint_state(&self) -> Result<ArmState, EnvError> {
        let theta = self.model.inverse_kinematics([self.target.x, self.target.y])?;
        Ok(ArmState::at_rest(theta))
    }

    /// Current true elbow and hand positions, for read-only hosts such as a
    /// renderer.
    #[must_use]
    pub fn elbow_hand(&self) -> ([f32; 2], [f32; 2]) {
        (self.elbow, self.hand)
    }

    #[must_use]
    pub fn target(&self) -> &TargetSpec {
        &self.target
    }

    #[must_use]
    pub fn start_table(&self) -> &[[f32; 2]] {
        &self.table
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn counters(&self) -> EpisodeCounters {
        self.counters
    }

    #[must_use]
    pub fn dt(&self) -> f32 {
        self.dt
    }
}
