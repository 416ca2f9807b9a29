//! Plain joint-space state and bound types shared across the workspace.

/// Number of muscles actuating the arm (three antagonist pairs).
pub const MUSCLES: usize = 6;

/// A commanded or filtered activation vector, one entry per muscle.
pub type Command = [f32; MUSCLES];

/// Joint-space state of the two-link arm.
///
/// Field order is fixed: angular velocities first, joint angles second. The
/// delay buffer, observations, and trace rows all preserve this layout.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ArmState {
    /// Angular velocities (shoulder, elbow) in rad/s.
    pub omega: [f32; 2],
    /// Joint angles (shoulder, elbow) in rad.
    pub theta: [f32; 2],
}

impl ArmState {
    pub const ZERO: Self = Self { omega: [0.0; 2], theta: [0.0; 2] };

    #[must_use]
    pub const fn new(omega: [f32; 2], theta: [f32; 2]) -> Self {
        Self { omega, theta }
    }

    /// State at rest with the given joint angles.
    #[must_use]
    pub const fn at_rest(theta: [f32; 2]) -> Self {
        Self { omega: [0.0; 2], theta }
    }

    /// Flattened `(omega1, omega2, theta1, theta2)` row.
    #[must_use]
    pub const fn as_array(&self) -> [f32; 4] {
        [self.omega[0], self.omega[1], self.theta[0], self.theta[1]]
    }

    /// True when every component is a finite number.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.as_array().iter().all(|v| v.is_finite())
    }
}

/// Per-joint angle limits in radians.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct JointBounds {
    pub lower: [f32; 2],
    pub upper: [f32; 2],
}

impl JointBounds {
    #[must_use]
    pub fn contains(&self, theta: [f32; 2]) -> bool {
        (0..2).all(|i| theta[i] >= self.lower[i] && theta[i] <= self.upper[i])
    }
}

/// What `advance` does when integration carries a joint past its limit.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum BoundPolicy {
    /// Clamp the angle to the limit and zero that joint's velocity.
    #[default]
    Clamp,
    /// Fail the step with [`crate::ArmError::OutOfBounds`].
    Reject,
}
