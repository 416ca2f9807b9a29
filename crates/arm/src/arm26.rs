//! Two-link, six-muscle planar arm variant.

use crate::error::ArmError;
use crate::model::ArmModel;
use crate::params::{ArmParameters, MusclesParameters};
use crate::types::{ArmState, BoundPolicy, Command, JointBounds, MUSCLES};

/// Smallest inertia determinant accepted before the step fails.
const MIN_INERTIA_DET: f32 = 1e-6;

/// The reference arm: shoulder and elbow in the horizontal plane, driven by
/// three antagonist muscle pairs through a fixed moment-arm matrix.
///
/// The plane is horizontal, so gravity never enters the equations of motion:
/// at rest under a zero command the state is a fixed point.
pub struct Arm26 {
    arm: ArmParameters,
    muscles: MusclesParameters,
    dt: f32,
    // Inertia constants: m11 = ka + 2 kb cos(theta2), m12 = m21 = kc + kb cos(theta2), m22 = kc.
    ka: f32,
    kb: f32,
    kc: f32,
}

impl Arm26 {
    /// Builds the variant from validated parameter sets.
    ///
    /// # Errors
    ///
    /// Propagates [`ArmError::BadParameters`] from validation; returns
    /// [`ArmError::SingularInertia`] when the constants make the inertia
    /// matrix degenerate anywhere in the workspace.
    pub fn new(arm: ArmParameters, muscles: MusclesParameters) -> Result<Self, ArmError> {
        arm.validate()?;
        muscles.validate()?;

        let ka = arm.inertias[0] + arm.inertias[1] + arm.masses[1] * arm.lengths[0].powi(2);
        let kb = arm.masses[1] * arm.lengths[0] * arm.com_forearm;
        let kc = arm.inertias[1];

        // det(theta2) = ka kc - kc^2 - kb^2 cos^2(theta2); minimal at cos = +-1.
        let det_worst = ka * kc - kc * kc - kb * kb;
        if det_worst <= MIN_INERTIA_DET {
            return Err(ArmError::SingularInertia { det: det_worst });
        }

        Ok(Self { arm, muscles, dt: 0.01, ka, kb, kc })
    }

    /// Builds the variant with the reference parameter values.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Arm26::new`]; cannot occur for the shipped
    /// defaults.
    pub fn with_defaults() -> Result<Self, ArmError> {
        Self::new(ArmParameters::default(), MusclesParameters::default())
    }

    /// Joint torques from a filtered activation vector: moment arms times
    /// per-muscle force, activations clamped back into [0, 1] first.
    fn muscle_torque(&self, command: &Command) -> [f32; 2] {
        let mut torque = [0.0; 2];
        for (i, &u) in command.iter().enumerate().take(MUSCLES) {
            let force = self.muscles.fmax[i] * u.clamp(0.0, 1.0);
            torque[0] += self.muscles.moment_arms[0][i] * force;
            torque[1] += self.muscles.moment_arms[1][i] * force;
        }
        torque
    }
}

impl ArmModel for Arm26 {
    fn set_dt(&mut self, dt: f32) {
        self.dt = dt;
    }

    fn set_noise(&mut self, knoise: [f32; MUSCLES]) {
        self.muscles.knoise = knoise;
    }

    fn advance(&self, state: &ArmState, command: &Command) -> Result<ArmState, ArmError> {
        let [w1, w2] = state.omega;
        let cos2 = state.theta[1].cos();
        let sin2 = state.theta[1].sin();

        // Inertia matrix and its determinant at the current configuration.
        let m11 = self.ka + 2.0 * self.kb * cos2;
        let m12 = self.kc + self.kb * cos2;
        let m22 = self.kc;
        let det = m11 * m22 - m12 * m12;
        if det <= MIN_INERTIA_DET {
            return Err(ArmError::SingularInertia { det });
        }

        // Coriolis/centripetal vector.
        let c1 = -w2 * (2.0 * w1 + w2) * self.kb * sin2;
        let c2 = w1 * w1 * self.kb * sin2;

        let gamma = self.muscle_torque(command);
        let b = &self.arm.friction;
        let rhs1 = gamma[0] - c1 - (b[0][0] * w1 + b[0][1] * w2);
        let rhs2 = gamma[1] - c2 - (b[1][0] * w1 + b[1][1] * w2);

        let acc1 = (m22 * rhs1 - m12 * rhs2) / det;
        let acc2 = (m11 * rhs2 - m12 * rhs1) / det;

        // Semi-implicit Euler: velocities first, then positions.
        let mut omega = [w1 + acc1 * self.dt, w2 + acc2 * self.dt];
        let mut theta = [
            state.theta[0] + omega[0] * self.dt,
            state.theta[1] + omega[1] * self.dt,
        ];

        // Checked before bound handling so a runaway value is reported, not
        // clamped into a plausible-looking state.
        if !(ArmState { omega, theta }).is_finite() {
            return Err(ArmError::NonFinite);
        }

        let bounds = &self.arm.bounds;
        for i in 0..2 {
            if theta[i] < bounds.lower[i] || theta[i] > bounds.upper[i] {
                match self.arm.bound_policy {
                    BoundPolicy::Clamp => {
                        theta[i] = theta[i].clamp(bounds.lower[i], bounds.upper[i]);
                        omega[i] = 0.0;
                    }
                    BoundPolicy::Reject => {
                        return Err(ArmError::OutOfBounds {
                            joint: i,
                            angle: theta[i],
                            lower: bounds.lower[i],
                            upper: bounds.upper[i],
                        });
                    }
                }
            }
        }

        Ok(ArmState { omega, theta })
    }

    fn forward_kinematics(&self, theta: [f32; 2]) -> ([f32; 2], [f32; 2]) {
        let [l1, l2] = self.arm.lengths;
        let elbow = [l1 * theta[0].cos(), l1 * theta[0].sin()];
        let sum = theta[0] + theta[1];
        let hand = [elbow[0] + l2 * sum.cos(), elbow[1] + l2 * sum.sin()];
        (elbow, hand)
    }

    fn inverse_kinematics(&self, xy: [f32; 2]) -> Result<[f32; 2], ArmError> {
        let [l1, l2] = self.arm.lengths;
        let r2 = xy[0] * xy[0] + xy[1] * xy[1];
        let cos_elbow = (r2 - l1 * l1 - l2 * l2) / (2.0 * l1 * l2);
        if !(-1.0..=1.0).contains(&cos_elbow) {
            return Err(ArmError::UnreachableTarget { x: xy[0], y: xy[1] });
        }
        let theta2 = cos_elbow.acos();
        let theta1 =
            xy[1].atan2(xy[0]) - (l2 * theta2.sin()).atan2(l1 + l2 * theta2.cos());
        // Fold into [-pi, pi): the subtraction can leave the principal range
        // when the hand direction and elbow offset straddle the branch cut.
        let theta1 = (theta1 + std::f32::consts::PI).rem_euclid(std::f32::consts::TAU)
            - std::f32::consts::PI;
        Ok([theta1, theta2])
    }

    fn bounds(&self) -> &JointBounds {
        &self.arm.bounds
    }
}
