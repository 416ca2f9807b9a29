//! Sensorimotor transmission delay line.

use arm::ArmState;

/// Fixed-depth, most-recent-first store of raw arm states.
///
/// `push` shifts every entry back one slot, discards the oldest, inserts the
/// new state at the front, and returns the entry now sitting at index
/// `depth - 1`. The buffer length equals the configured depth for the whole
/// episode; `reset` refills it with zeroed states. Depth 0 stores nothing
/// and the delayed read is the input itself.
#[derive(Clone, Debug)]
pub struct DelayBuffer {
    depth: usize,
    states: Vec<ArmState>,
}

impl DelayBuffer {
    #[must_use]
    pub fn new(depth: usize) -> Self {
        Self {
            depth,
            states: vec![ArmState::ZERO; depth],
        }
    }

    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Zero-fills the buffer for a new episode.
    pub fn reset(&mut self) {
        self.states.clear();
        self.states.resize(self.depth, ArmState::ZERO);
    }

    /// Stores `state` and returns the delayed read.
    pub fn push(&mut self, state: ArmState) -> ArmState {
        if self.depth == 0 {
            return state;
        }
        for i in (1..self.depth).rev() {
            self.states[i] = self.states[i - 1];
        }
        self.states[0] = state;
        self.states[self.depth - 1]
    }
}
