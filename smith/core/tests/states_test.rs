//! State hierarchy tests for smith-core

use smith_core::{StateId, MAX_STATE_DEPTH};

#[test]
fn test_every_leaf_reaches_the_top() {
    for leaf in StateId::LEAVES {
        assert!(leaf.is_leaf());
        assert!(leaf.is_within(StateId::PrinterOn));
        assert!(leaf.depth() < MAX_STATE_DEPTH);
    }
}

#[test]
fn test_composites_are_not_leaves() {
    for state in [StateId::PrinterOn, StateId::DoorClosed, StateId::Printing] {
        assert!(!state.is_leaf());
        assert!(!StateId::LEAVES.contains(&state));
    }
}

#[test]
fn test_print_cycle_nests_under_door_closed() {
    assert_eq!(StateId::Separating.parent(), Some(StateId::Printing));
    assert_eq!(StateId::Printing.parent(), Some(StateId::DoorClosed));
    assert!(StateId::Paused.is_within(StateId::DoorClosed));
    assert!(!StateId::DoorOpen.is_within(StateId::DoorClosed));
    assert!(!StateId::Idle.is_within(StateId::Printing));
}

#[test]
fn test_interrupt_states() {
    let interrupts: Vec<_> = StateId::LEAVES
        .into_iter()
        .filter(|s| s.is_interrupt())
        .collect();
    assert_eq!(interrupts, vec![StateId::DoorOpen, StateId::Paused]);
}

#[test]
fn test_initial_leaf() {
    assert_eq!(StateId::INITIAL, StateId::Initializing);
    assert_eq!(StateId::INITIAL.depth(), 2);
    assert_eq!(StateId::PrinterOn.depth(), 0);
}
