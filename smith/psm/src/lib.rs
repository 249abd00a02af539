#![no_std]
#![forbid(unsafe_code)]

//! # Printer State Machine
//!
//! Hierarchical state machine sequencing the printer: initialization,
//! homing, the per-layer expose/separate cycle, door and pause interrupts
//! with history-based resume, and error recovery into `Idle`.
//!
//! The machine owns no hardware. Entry, exit and internal actions are
//! delegated to a [`PrinterActions`] implementation held by the machine and
//! invoked synchronously from [`PrinterStateMachine::process`]. Events are
//! processed to completion one at a time; events raised while processing
//! (a failed action raising `Error`) are deferred until the current event
//! has finished.

#[cfg(test)]
extern crate std;

use heapless::Deque;
use log::{debug, error, trace, warn};
use smith_core::{Event, StateId};

pub mod actions;
pub mod history;
pub mod hsm;

pub use actions::{LayerOutcome, PrinterActions};
pub use history::History;
pub use hsm::{StatePath, TransitionPath};


/// Number of `GotSetting` events required before motion starts
pub const REQUIRED_SETTINGS: u8 = 2;

/// Capacity of the queue of events raised while processing another event
pub const DEFERRED_CAPACITY: usize = 4;

/// Result of offering an event to one state handler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Reaction {
    /// Event consumed without a state change
    Handled,
    /// Not handled here; offer it to the given superstate
    Super(StateId),
    /// Not handled anywhere up the hierarchy
    Unhandled,
    /// External transition to a leaf
    Transition(StateId),
    /// Return to a leaf remembered by history
    Resume(StateId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TransitionKind {
    Normal,
    Resume,
}

/// The printer's hierarchical state machine
pub struct PrinterStateMachine<A: PrinterActions> {
    actions: A,
    /// Active leaf, or the top state before `start`
    state: StateId,
    started: bool,
    halted: bool,
    door_history: History,
    pause_history: History,
    print_pending: bool,
    deferred: Deque<Event, DEFERRED_CAPACITY>,
}

impl<A: PrinterActions> PrinterStateMachine<A> {
    /// Create a state machine driving `actions`. No action runs until
    /// [`start`](Self::start).
    pub fn new(actions: A) -> Self {
        Self {
            actions,
            state: StateId::PrinterOn,
            started: false,
            halted: false,
            door_history: History::new(),
            pause_history: History::new(),
            print_pending: false,
            deferred: Deque::new(),
        }
    }

    /// Take the initial transition into `Initializing`, running the entry
    /// actions of every state on the way. Calling it again has no effect.
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        debug!("start -> {}", StateId::INITIAL);

        let path = TransitionPath::initial(StateId::INITIAL);
        self.state = StateId::INITIAL;
        for &s in path.entries() {
            self.enter(s);
        }
        self.drain_deferred();
    }

    /// Deliver one event and run it, and anything it raises, to completion.
    ///
    /// Events with no transition from the current state are ignored.
    pub fn process(&mut self, event: Event) {
        if !self.started {
            warn!("{} delivered before start, ignored", event);
            return;
        }
        if self.halted {
            warn!("{} delivered to halted machine, ignored", event);
            return;
        }
        self.dispatch(event);
        self.drain_deferred();
    }

    /// Active leaf state (`PrinterOn` before start)
    pub fn state(&self) -> StateId {
        self.state
    }

    /// Active leaf followed by all of its ancestors
    pub fn active_chain(&self) -> StatePath {
        hsm::state_path(self.state)
    }

    /// True if `state` is the active leaf or one of its ancestors
    pub fn is_in(&self, state: StateId) -> bool {
        self.state.is_within(state)
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    /// True once the `Idle` safety action has failed. A halted machine
    /// ignores every event and runs no further actions.
    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// True if the next `AtHome` proceeds straight to `PrintSetup`
    pub fn print_pending(&self) -> bool {
        self.print_pending
    }

    /// Leaf to return to when the door closes
    pub fn door_history(&self) -> Option<StateId> {
        self.door_history.peek()
    }

    /// Leaf to return to on `Resume`
    pub fn pause_history(&self) -> Option<StateId> {
        self.pause_history.peek()
    }

    pub fn actions(&self) -> &A {
        &self.actions
    }

    pub fn actions_mut(&mut self) -> &mut A {
        &mut self.actions
    }

    fn drain_deferred(&mut self) {
        while let Some(event) = self.deferred.pop_front() {
            if self.halted {
                self.deferred.clear();
                break;
            }
            self.dispatch(event);
        }
    }

    fn defer(&mut self, event: Event) {
        if self.deferred.push_back(event).is_err() {
            error!("deferred event queue full, dropping {}", event);
        }
    }

    /// Offer the event to the active leaf and then to its superstates until
    /// one of them reacts.
    fn dispatch(&mut self, event: Event) {
        let source = self.state;
        let mut s = source;

        loop {
            match self.react(s, event) {
                Reaction::Handled => {
                    trace!("{} handled in {}", event, s);
                    return;
                }
                Reaction::Super(parent) => {
                    s = parent;
                }
                Reaction::Unhandled => {
                    trace!("{} ignored in {}", event, source);
                    return;
                }
                Reaction::Transition(target) => {
                    debug!("{} --{}--> {}", source, event, target);
                    self.transition(target, TransitionKind::Normal);
                    return;
                }
                Reaction::Resume(target) => {
                    debug!("{} --{}--> {} (history)", source, event, target);
                    self.transition(target, TransitionKind::Resume);
                    return;
                }
            }
        }
    }

    fn transition(&mut self, target: StateId, kind: TransitionKind) {
        let path = TransitionPath::between(self.state, target);

        for &s in path.exits() {
            self.exit(s, kind, target);
        }

        self.state = target;

        for &s in path.entries() {
            // Returning through history resumes the interrupted leaf rather
            // than restarting its hardware action.
            if kind == TransitionKind::Resume && s == target {
                continue;
            }
            self.enter(s);
        }
    }

    fn enter(&mut self, state: StateId) {
        trace!("enter {}", state);
        match state {
            StateId::Initializing => {
                let result = self.actions.initialize();
                self.check(state, result);
            }
            StateId::Homing => {
                let result = self.actions.start_homing();
                self.check(state, result);
            }
            StateId::PrintSetup => self.actions.request_settings(),
            StateId::MovingToStartPosition => {
                let result = self.actions.move_to_start();
                self.check(state, result);
            }
            StateId::Exposing => {
                let result = self.actions.start_exposure();
                self.check(state, result);
            }
            StateId::Separating => {
                let result = self.actions.start_separation();
                self.check(state, result);
            }
            StateId::EndingPrint => {
                if self.actions.end_layer() == LayerOutcome::NextLayer {
                    self.print_pending = true;
                }
            }
            StateId::DoorOpen | StateId::Paused => {
                let result = self.actions.pause_motion();
                self.check(state, result);
            }
            StateId::Idle => {
                if let Err(e) = self.actions.make_safe() {
                    error!("safety action failed entering Idle: {}; halting", e);
                    self.halted = true;
                }
            }
            StateId::PrinterOn | StateId::DoorClosed | StateId::Printing | StateId::Home => {}
        }
    }

    fn exit(&mut self, state: StateId, kind: TransitionKind, target: StateId) {
        trace!("exit {}", state);
        if state.is_interrupt() && kind == TransitionKind::Resume && !target.is_interrupt() {
            let result = self.actions.resume_motion();
            self.check(state, result);
        }
    }

    /// Turn a failed action into a deferred `Error` event
    fn check(&mut self, state: StateId, result: Result<(), A::Error>) {
        if let Err(e) = result {
            error!("action for {} failed: {}", state, e);
            self.defer(Event::Error);
        }
    }

    /// Forget the interrupted job so that only a new `StartPrint` prints again
    fn discard_job(&mut self) {
        self.actions.cancel_job();
        self.print_pending = false;
        self.door_history.clear();
        self.pause_history.clear();
    }

    fn react(&mut self, state: StateId, event: Event) -> Reaction {
        match state {
            StateId::PrinterOn => self.printer_on(event),
            StateId::DoorClosed => self.door_closed(event),
            StateId::Printing => self.printing(event),
            StateId::Initializing => self.initializing(event),
            StateId::DoorOpen => self.door_open(event),
            StateId::Homing => self.homing(event),
            StateId::Home => self.home(event),
            StateId::Idle => self.idle(event),
            StateId::PrintSetup => self.print_setup(event),
            StateId::MovingToStartPosition => self.moving_to_start_position(event),
            StateId::Exposing => self.exposing(event),
            StateId::Separating => self.separating(event),
            StateId::Paused => self.paused(event),
            StateId::EndingPrint => self.ending_print(event),
        }
    }

    // State handlers

    fn printer_on(&mut self, event: Event) -> Reaction {
        match event {
            Event::Error => {
                self.actions.abort_job();
                self.print_pending = false;
                self.door_history.clear();
                self.pause_history.clear();
                Reaction::Transition(StateId::Idle)
            }
            _ => Reaction::Unhandled,
        }
    }

    fn door_closed(&mut self, event: Event) -> Reaction {
        match event {
            Event::DoorOpened => {
                self.door_history.record(self.state);
                Reaction::Transition(StateId::DoorOpen)
            }
            _ => Reaction::Super(StateId::PrinterOn),
        }
    }

    fn printing(&mut self, _event: Event) -> Reaction {
        Reaction::Super(StateId::DoorClosed)
    }

    fn initializing(&mut self, event: Event) -> Reaction {
        match event {
            Event::Reset => {
                self.discard_job();
                Reaction::Transition(StateId::Initializing)
            }
            Event::Initialized => Reaction::Transition(StateId::Homing),
            _ => Reaction::Super(StateId::DoorClosed),
        }
    }

    fn door_open(&mut self, event: Event) -> Reaction {
        match event {
            Event::DoorClosed => match self.door_history.take() {
                Some(previous) => Reaction::Resume(previous),
                None => Reaction::Transition(StateId::Initializing),
            },
            Event::Reset => {
                self.discard_job();
                Reaction::Transition(StateId::Initializing)
            }
            Event::DoorOpened => Reaction::Handled,
            _ => Reaction::Super(StateId::PrinterOn),
        }
    }

    fn homing(&mut self, event: Event) -> Reaction {
        match event {
            Event::AtHome => {
                if core::mem::take(&mut self.print_pending) {
                    Reaction::Transition(StateId::PrintSetup)
                } else {
                    Reaction::Transition(StateId::Home)
                }
            }
            Event::Cancel => {
                self.actions.cancel_job();
                self.print_pending = false;
                Reaction::Handled
            }
            _ => Reaction::Super(StateId::DoorClosed),
        }
    }

    fn home(&mut self, event: Event) -> Reaction {
        match event {
            Event::StartPrint => {
                self.actions.begin_job();
                Reaction::Transition(StateId::PrintSetup)
            }
            _ => Reaction::Super(StateId::DoorClosed),
        }
    }

    fn idle(&mut self, event: Event) -> Reaction {
        match event {
            Event::StartPrint => {
                self.actions.begin_job();
                self.print_pending = true;
                Reaction::Transition(StateId::Homing)
            }
            // The door may be opened freely while idle
            Event::DoorOpened => Reaction::Handled,
            _ => Reaction::Super(StateId::DoorClosed),
        }
    }

    fn print_setup(&mut self, event: Event) -> Reaction {
        match event {
            Event::GotSetting => {
                if self.actions.record_setting() >= REQUIRED_SETTINGS {
                    Reaction::Transition(StateId::MovingToStartPosition)
                } else {
                    Reaction::Handled
                }
            }
            _ => Reaction::Super(StateId::Printing),
        }
    }

    fn moving_to_start_position(&mut self, event: Event) -> Reaction {
        match event {
            Event::AtStartPosition => Reaction::Transition(StateId::Exposing),
            _ => Reaction::Super(StateId::Printing),
        }
    }

    fn exposing(&mut self, event: Event) -> Reaction {
        match event {
            Event::Pulse => Reaction::Handled,
            Event::Exposed => Reaction::Transition(StateId::Separating),
            _ => Reaction::Super(StateId::Printing),
        }
    }

    fn separating(&mut self, event: Event) -> Reaction {
        match event {
            Event::Pulse => Reaction::Handled,
            Event::Separated => Reaction::Transition(StateId::EndingPrint),
            Event::Pause => {
                self.pause_history.record(self.state);
                Reaction::Transition(StateId::Paused)
            }
            _ => Reaction::Super(StateId::Printing),
        }
    }

    fn paused(&mut self, event: Event) -> Reaction {
        match event {
            Event::Resume => {
                Reaction::Resume(self.pause_history.take().unwrap_or(StateId::Separating))
            }
            _ => Reaction::Super(StateId::Printing),
        }
    }

    fn ending_print(&mut self, event: Event) -> Reaction {
        match event {
            Event::PrintEnded => Reaction::Transition(StateId::Homing),
            _ => Reaction::Super(StateId::Printing),
        }
    }
}

#[cfg(feature = "defmt")]
impl<A: PrinterActions> defmt::Format for PrinterStateMachine<A> {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "PrinterStateMachine({})", self.state);
    }
}
