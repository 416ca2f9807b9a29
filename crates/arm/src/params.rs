//! Immutable physical and muscular parameter sets.

use crate::error::ArmError;
use crate::types::{BoundPolicy, JointBounds, MUSCLES};

/// Physical description of the two-link arm.
///
/// Immutable for the lifetime of a simulation instance; [`validate`] runs at
/// model construction and rejects non-physical values.
///
/// [`validate`]: ArmParameters::validate
#[derive(Clone, Debug)]
pub struct ArmParameters {
    /// Segment lengths (upper arm, forearm) in meters.
    pub lengths: [f32; 2],
    /// Segment masses in kg.
    pub masses: [f32; 2],
    /// Link moments of inertia about their proximal joints, kg m^2.
    pub inertias: [f32; 2],
    /// Forearm center-of-mass offset from the elbow, meters.
    pub com_forearm: f32,
    /// Viscous joint friction matrix.
    pub friction: [[f32; 2]; 2],
    /// Joint angle limits.
    pub bounds: JointBounds,
    /// Behavior when integration leaves the limits.
    pub bound_policy: BoundPolicy,
}

impl Default for ArmParameters {
    fn default() -> Self {
        Self {
            lengths: [0.3, 0.33],
            masses: [1.4, 1.1],
            inertias: [0.025, 0.045],
            com_forearm: 0.16,
            friction: [[0.05, 0.025], [0.025, 0.05]],
            bounds: JointBounds {
                lower: [-0.6, -0.2],
                upper: [2.6, 3.0],
            },
            bound_policy: BoundPolicy::Clamp,
        }
    }
}

impl ArmParameters {
    /// # Errors
    ///
    /// Returns [`ArmError::BadParameters`] when a length, mass, or inertia is
    /// not strictly positive, the center of mass lies outside the forearm, or
    /// a lower joint bound exceeds its upper bound.
    pub fn validate(&self) -> Result<(), ArmError> {
        if self.lengths.iter().any(|&l| l <= 0.0) {
            return Err(ArmError::BadParameters("segment lengths must be positive"));
        }
        if self.masses.iter().any(|&m| m <= 0.0) {
            return Err(ArmError::BadParameters("segment masses must be positive"));
        }
        if self.inertias.iter().any(|&i| i <= 0.0) {
            return Err(ArmError::BadParameters("link inertias must be positive"));
        }
        if self.com_forearm <= 0.0 || self.com_forearm > self.lengths[1] {
            return Err(ArmError::BadParameters(
                "forearm center of mass must lie within the segment",
            ));
        }
        if (0..2).any(|i| self.bounds.lower[i] >= self.bounds.upper[i]) {
            return Err(ArmError::BadParameters("joint bounds must be ordered"));
        }
        Ok(())
    }
}

/// Muscular description: maximum forces, moment arms, and noise coefficients.
///
/// The moment-arm matrix maps the six activations onto the two joint
/// torques. Columns are ordered shoulder flexor, shoulder extensor, elbow
/// flexor, elbow extensor, biarticular flexor, biarticular extensor.
#[derive(Clone, Debug)]
pub struct MusclesParameters {
    /// Maximum isometric force per muscle, newtons.
    pub fmax: [f32; MUSCLES],
    /// Moment arms in meters, one row per joint.
    pub moment_arms: [[f32; MUSCLES]; 2],
    /// Multiplicative noise coefficient per muscle.
    pub knoise: [f32; MUSCLES],
    /// First-order low-pass coefficient in (0, 1]; 1 disables smoothing.
    pub smoothing: f32,
}

impl Default for MusclesParameters {
    fn default() -> Self {
        Self {
            fmax: [700.0, 382.0, 572.0, 445.0, 159.0, 318.0],
            moment_arms: [
                [0.04, -0.04, 0.0, 0.0, 0.028, -0.035],
                [0.0, 0.0, 0.025, -0.025, 0.028, -0.035],
            ],
            knoise: [0.25; MUSCLES],
            smoothing: 0.5,
        }
    }
}

impl MusclesParameters {
    /// # Errors
    ///
    /// Returns [`ArmError::BadParameters`] for non-positive maximum forces,
    /// negative noise coefficients, or a smoothing coefficient outside
    /// (0, 1].
    pub fn validate(&self) -> Result<(), ArmError> {
        if self.fmax.iter().any(|&f| f <= 0.0) {
            return Err(ArmError::BadParameters("muscle forces must be positive"));
        }
        if self.knoise.iter().any(|&k| k < 0.0) {
            return Err(ArmError::BadParameters(
                "noise coefficients must be non-negative",
            ));
        }
        if self.smoothing <= 0.0 || self.smoothing > 1.0 {
            return Err(ArmError::BadParameters("smoothing must lie in (0, 1]"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_parameters_are_valid() {
        assert!(ArmParameters::default().validate().is_ok());
        assert!(MusclesParameters::default().validate().is_ok());
    }

    #[test]
    fn negative_length_is_rejected() {
        let mut p = ArmParameters::default();
        p.lengths[1] = -0.33;
        assert!(matches!(p.validate(), Err(ArmError::BadParameters(_))));
    }

    #[test]
    fn inverted_bounds_are_rejected() {
        let mut p = ArmParameters::default();
        p.bounds.lower[0] = p.bounds.upper[0] + 1.0;
        assert!(matches!(p.validate(), Err(ArmError::BadParameters(_))));
    }

    #[test]
    fn smoothing_outside_unit_interval_is_rejected() {
        let mut m = MusclesParameters::default();
        m.smoothing = 0.0;
        assert!(m.validate().is_err());
        m.smoothing = 1.5;
        assert!(m.validate().is_err());
    }
}
