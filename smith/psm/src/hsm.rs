//! Transition path computation over the state hierarchy

use heapless::Vec;
use smith_core::{StateId, MAX_STATE_DEPTH};

/// Chain of states bounded by the hierarchy depth
pub type StatePath = Vec<StateId, MAX_STATE_DEPTH>;

/// Get the path from a state to the top of the hierarchy, innermost first
pub fn state_path(state: StateId) -> StatePath {
    let mut path = StatePath::new();
    let mut current = Some(state);
    while let Some(s) = current {
        if path.push(s).is_err() {
            break;
        }
        current = s.parent();
    }
    path
}

/// Find the Least Common Ancestor of two states.
///
/// A state counts as its own ancestor, so the LCA of a state and one of its
/// descendants is the state itself.
pub fn find_lca(source: StateId, target: StateId) -> Option<StateId> {
    let target_path = state_path(target);
    state_path(source)
        .iter()
        .copied()
        .find(|s| target_path.contains(s))
}

/// States left and entered by one transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionPath {
    /// States to exit (from innermost to outermost)
    exits: StatePath,
    /// States to enter (from outermost to innermost)
    entries: StatePath,
}

impl TransitionPath {
    /// Path of an external transition from `source` to `target`.
    ///
    /// A self-transition exits and re-enters the state.
    pub fn between(source: StateId, target: StateId) -> Self {
        let lca = if source == target {
            source.parent()
        } else {
            find_lca(source, target)
        };

        let mut exits = StatePath::new();
        for s in state_path(source) {
            if Some(s) == lca {
                break;
            }
            let _ = exits.push(s);
        }

        let mut entries = StatePath::new();
        for s in state_path(target) {
            if Some(s) == lca {
                break;
            }
            let _ = entries.push(s);
        }
        entries.reverse();

        Self { exits, entries }
    }

    /// Path of the initial transition: enter every state from the top down
    /// to `target`
    pub fn initial(target: StateId) -> Self {
        let mut entries = state_path(target);
        entries.reverse();
        Self {
            exits: StatePath::new(),
            entries,
        }
    }

    pub fn exits(&self) -> &[StateId] {
        &self.exits
    }

    pub fn entries(&self) -> &[StateId] {
        &self.entries
    }
}
