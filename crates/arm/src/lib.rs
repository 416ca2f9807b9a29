#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
//! # Two-Joint Arm Model
//!
//! Joint-space dynamics, kinematics, and muscle actuation for a planar
//! two-link, six-muscle arm.
//!
//! ## Key Components
//!
//! -   **State and parameters:** [`ArmState`] holds the joint-space state in
//!     velocity-then-position order; [`ArmParameters`] and
//!     [`MusclesParameters`] hold the immutable physical description,
//!     validated at construction. These live in the [`types`] and [`params`]
//!     modules.
//! -   **Dynamics:** the [`ArmModel`] trait is the capability seam between
//!     the episode loop and a concrete arm; [`Arm26`] is the supported
//!     variant (two links driven by three antagonist muscle pairs). Variants
//!     are selected by name through [`ArmVariant`].
//! -   **Actuation:** [`MuscleFilter`] perturbs a commanded activation vector
//!     with per-muscle noise and smooths it through a first-order low-pass,
//!     emulating motor-unit response latency.
//!
//! The crate performs no I/O and holds no global state; everything an
//! episode mutates is owned by the caller.

pub mod arm26;
pub mod error;
pub mod model;
pub mod muscle;
pub mod params;
pub mod types;

pub use arm26::Arm26;
pub use error::ArmError;
pub use model::{ArmModel, ArmVariant};
pub use muscle::MuscleFilter;
pub use params::{ArmParameters, MusclesParameters};
pub use types::{ArmState, BoundPolicy, Command, JointBounds, MUSCLES};
