#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
//! # Reaching Environment
//!
//! Episodic target-reaching on top of the [`arm`] crate: a fixed-timestep
//! loop that noise-filters each muscle command, advances the joint-space
//! dynamics, lags the observable state through a sensorimotor delay line,
//! and scores the hand against a target zone.
//!
//! The defining contract: callers only ever see the *delayed* state.
//! The true physical state drives dynamics and cost internally and is
//! exposed solely inside the per-step diagnostic trace.
//!
//! Action sequences are supplied externally; nothing in this crate selects
//! actions.

pub mod cost;
pub mod delay;
pub mod error;
pub mod reach;

pub use cost::{CostConfig, CostEvaluator, TargetSpec, ToleranceMode};
pub use delay::DelayBuffer;
pub use error::EnvError;
pub use reach::{EpisodeCounters, Phase, ReachConfig, ReachEnv, StepOutcome, StepTrace};
