//! Shallow history for interrupt-capable regions

use smith_core::StateId;

/// Remembers the leaf that was active when an interrupt state was entered,
/// so the matching resume event can return to it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct History {
    remembered: Option<StateId>,
}

impl History {
    pub const fn new() -> Self {
        Self { remembered: None }
    }

    /// Record the leaf being interrupted
    pub fn record(&mut self, state: StateId) {
        debug_assert!(state.is_leaf());
        self.remembered = Some(state);
    }

    /// Remembered leaf, without consuming it
    pub fn peek(&self) -> Option<StateId> {
        self.remembered
    }

    /// Consume the remembered leaf
    pub fn take(&mut self) -> Option<StateId> {
        self.remembered.take()
    }

    pub fn clear(&mut self) {
        self.remembered = None;
    }
}
