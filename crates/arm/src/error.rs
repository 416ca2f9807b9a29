use thiserror::Error;

/// Arm model error taxonomy.
///
/// `UnknownVariant`, `BadParameters`, and `SingularInertia` are
/// configuration-class failures: the simulation must not proceed.
/// `UnreachableTarget` is recoverable by the caller supplying a valid
/// Cartesian point. `NonFinite` flags a NaN/Inf state after integration and
/// is treated as a configuration failure detected post hoc.
#[derive(Error, Debug)]
pub enum ArmError {
    #[error("unknown arm model variant: {0}")]
    UnknownVariant(String),
    #[error("invalid physical parameters: {0}")]
    BadParameters(&'static str),
    #[error("inertia matrix is not positive definite (det = {det})")]
    SingularInertia { det: f32 },
    #[error("non-finite state after integration")]
    NonFinite,
    #[error("joint {joint} angle {angle} outside [{lower}, {upper}]")]
    OutOfBounds {
        joint: usize,
        angle: f32,
        lower: f32,
        upper: f32,
    },
    #[error("target ({x}, {y}) is outside the reachable workspace")]
    UnreachableTarget { x: f32, y: f32 },
}
