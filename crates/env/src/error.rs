use crate::reach::Phase;
use arm::ArmError;
use thiserror::Error;

/// Episode-loop error taxonomy.
///
/// `IndexOutOfRange` is a bad reset argument, recoverable by the caller.
/// `InvalidActionShape` and `InvalidState` are misuses of the step contract
/// and leave the environment untouched. Arm-level failures propagate via
/// `Arm`.
#[derive(Error, Debug)]
pub enum EnvError {
    #[error("start index {index} out of range for a table of {len} positions")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("action has {got} components, expected {expected}")]
    InvalidActionShape { expected: usize, got: usize },
    #[error("step is not valid in the {0:?} phase; call reset first")]
    InvalidState(Phase),
    #[error(transparent)]
    Arm(#[from] ArmError),
}
