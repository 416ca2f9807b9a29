//! Capability trait over arm model variants.

use crate::arm26::Arm26;
use crate::error::ArmError;
use crate::params::{ArmParameters, MusclesParameters};
use crate::types::{ArmState, Command, JointBounds, MUSCLES};

/// Interface the episode loop is written against.
///
/// A variant owns its physical parameters and timestep; `advance` must be
/// deterministic given identical inputs (all randomness lives in the muscle
/// filter, upstream of the dynamics).
pub trait ArmModel {
    /// Sets the integration timestep in seconds.
    fn set_dt(&mut self, dt: f32);

    /// Records the per-muscle noise coefficients active this run. The filter
    /// applies them; the model keeps them for introspection.
    fn set_noise(&mut self, knoise: [f32; MUSCLES]);

    /// Integrates one timestep from `state` under the filtered `command`.
    ///
    /// # Errors
    ///
    /// [`ArmError::SingularInertia`] if the inertia matrix degenerates,
    /// [`ArmError::NonFinite`] if integration produces NaN/Inf, and
    /// [`ArmError::OutOfBounds`] under the `Reject` bound policy.
    fn advance(&self, state: &ArmState, command: &Command) -> Result<ArmState, ArmError>;

    /// Closed-form elbow and hand positions for the given joint angles.
    /// Output for angles outside the configured bounds is undefined.
    fn forward_kinematics(&self, theta: [f32; 2]) -> ([f32; 2], [f32; 2]);

    /// Joint angles placing the hand at `xy`.
    ///
    /// # Errors
    ///
    /// [`ArmError::UnreachableTarget`] when `xy` lies outside the annulus
    /// reachable by the two segments.
    fn inverse_kinematics(&self, xy: [f32; 2]) -> Result<[f32; 2], ArmError>;

    /// Configured joint angle limits.
    fn bounds(&self) -> &JointBounds;
}

/// Named registry of supported arm models.
pub struct ArmVariant;

impl ArmVariant {
    /// Constructs a variant by its configuration name with reference
    /// parameters.
    ///
    /// # Errors
    ///
    /// [`ArmError::UnknownVariant`] for names with no registered model;
    /// parameter validation errors from the variant's constructor.
    pub fn by_name(name: &str) -> Result<Box<dyn ArmModel>, ArmError> {
        Self::build(name, ArmParameters::default(), MusclesParameters::default())
    }

    /// Constructs a variant by name from explicit parameter sets.
    ///
    /// # Errors
    ///
    /// Same conditions as [`ArmVariant::by_name`].
    pub fn build(
        name: &str,
        arm: ArmParameters,
        muscles: MusclesParameters,
    ) -> Result<Box<dyn ArmModel>, ArmError> {
        match name {
            "arm26" => Ok(Box::new(Arm26::new(arm, muscles)?)),
            other => Err(ArmError::UnknownVariant(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_resolves_arm26() {
        assert!(ArmVariant::by_name("arm26").is_ok());
    }

    #[test]
    fn registry_rejects_unknown_names() {
        assert!(matches!(
            ArmVariant::by_name("arm38"),
            Err(ArmError::UnknownVariant(_))
        ));
    }
}
