//! Property-based tests for the printer transition table.
//!
//! Each property drives a fresh machine to a leaf along the canonical path
//! and then checks how that leaf reacts to arbitrary events.

use proptest::prelude::*;
use smith_core::{Event, StateId};
use smith_psm::{LayerOutcome, PrinterActions, PrinterStateMachine};

/// Actions that always succeed and report two-layer jobs
#[derive(Default)]
struct Quiet {
    settings: u8,
    layers_done: u32,
}

impl PrinterActions for Quiet {
    type Error = &'static str;

    fn initialize(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
    fn start_homing(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
    fn begin_job(&mut self) {
        self.layers_done = 0;
    }
    fn request_settings(&mut self) {
        self.settings = 0;
    }
    fn record_setting(&mut self) -> u8 {
        self.settings = (self.settings + 1).min(2);
        self.settings
    }
    fn move_to_start(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
    fn start_exposure(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
    fn start_separation(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
    fn end_layer(&mut self) -> LayerOutcome {
        self.layers_done += 1;
        if self.layers_done >= 2 {
            LayerOutcome::Complete
        } else {
            LayerOutcome::NextLayer
        }
    }
    fn cancel_job(&mut self) {}
    fn abort_job(&mut self) {}
    fn pause_motion(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
    fn resume_motion(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
    fn make_safe(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

fn path_to(leaf: StateId) -> Vec<Event> {
    use Event::*;
    let to_separating = vec![
        Initialized,
        AtHome,
        StartPrint,
        GotSetting,
        GotSetting,
        AtStartPosition,
        Exposed,
    ];
    match leaf {
        StateId::Initializing => vec![],
        StateId::DoorOpen => vec![DoorOpened],
        StateId::Homing => vec![Initialized],
        StateId::Home => vec![Initialized, AtHome],
        StateId::Idle => vec![Error],
        StateId::PrintSetup => to_separating[..3].to_vec(),
        StateId::MovingToStartPosition => to_separating[..5].to_vec(),
        StateId::Exposing => to_separating[..6].to_vec(),
        StateId::Separating => to_separating,
        StateId::Paused => [to_separating, vec![Pause]].concat(),
        StateId::EndingPrint => [to_separating, vec![Separated]].concat(),
        other => panic!("{other} is not a leaf"),
    }
}

fn machine_in(leaf: StateId) -> PrinterStateMachine<Quiet> {
    let mut psm = PrinterStateMachine::new(Quiet::default());
    psm.start();
    for event in path_to(leaf) {
        psm.process(event);
    }
    assert_eq!(psm.state(), leaf);
    psm
}

/// Events that move the machine out of `leaf`, freshly reached
fn leaves_state(leaf: StateId, event: Event) -> bool {
    use Event::*;
    if event == Error {
        return leaf != StateId::Idle;
    }
    if event == DoorOpened {
        return !matches!(leaf, StateId::Idle | StateId::DoorOpen);
    }
    matches!(
        (leaf, event),
        (StateId::Initializing, Initialized)
            | (StateId::DoorOpen, DoorClosed)
            | (StateId::DoorOpen, Reset)
            | (StateId::Homing, AtHome)
            | (StateId::Home, StartPrint)
            | (StateId::Idle, StartPrint)
            | (StateId::MovingToStartPosition, AtStartPosition)
            | (StateId::Exposing, Exposed)
            | (StateId::Separating, Separated)
            | (StateId::Separating, Pause)
            | (StateId::Paused, Resume)
            | (StateId::EndingPrint, PrintEnded)
    )
}

fn any_leaf() -> impl Strategy<Value = StateId> {
    prop::sample::select(StateId::LEAVES.to_vec())
}

fn any_event() -> impl Strategy<Value = Event> {
    prop::sample::select(Event::ALL.to_vec())
}

proptest! {
    #[test]
    fn unmatched_events_keep_the_state(leaf in any_leaf(), event in any_event()) {
        prop_assume!(!leaves_state(leaf, event));
        let mut psm = machine_in(leaf);
        psm.process(event);
        prop_assert_eq!(psm.state(), leaf);
    }

    #[test]
    fn door_round_trip_returns_to_origin(leaf in any_leaf()) {
        prop_assume!(!matches!(leaf, StateId::Idle | StateId::DoorOpen));
        let mut psm = machine_in(leaf);
        psm.process(Event::DoorOpened);
        prop_assert_eq!(psm.state(), StateId::DoorOpen);
        psm.process(Event::DoorClosed);
        prop_assert_eq!(psm.state(), leaf);
    }

    #[test]
    fn error_always_lands_in_idle(leaf in any_leaf()) {
        let mut psm = machine_in(leaf);
        psm.process(Event::Error);
        prop_assert_eq!(psm.state(), StateId::Idle);
        prop_assert!(!psm.print_pending());
        prop_assert_eq!(psm.door_history(), None);
    }

    #[test]
    fn idle_leaves_only_on_start_print(event in any_event()) {
        let mut psm = machine_in(StateId::Idle);
        psm.process(event);
        if event == Event::StartPrint {
            prop_assert_eq!(psm.state(), StateId::Homing);
        } else {
            prop_assert_eq!(psm.state(), StateId::Idle);
        }
    }

    #[test]
    fn arbitrary_sequences_stay_on_leaves(
        events in prop::collection::vec(any_event(), 0..64)
    ) {
        let mut psm = PrinterStateMachine::new(Quiet::default());
        psm.start();
        for event in events {
            psm.process(event);
            prop_assert!(psm.state().is_leaf());
            if psm.state() == StateId::DoorOpen {
                prop_assert!(psm.door_history().map_or(true, |s| s != StateId::DoorOpen));
            }
            if psm.state() == StateId::Idle {
                prop_assert!(!psm.print_pending());
            }
        }
    }
}
