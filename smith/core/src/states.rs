//! State identifiers and the printer state hierarchy

use core::fmt;

/// A node of the printer state hierarchy.
///
/// Composite states group leaves and define transitions shared by all of
/// their substates. Only leaves are ever the active state once the machine
/// has started.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateId {
    /// Top state, active only before the machine is started
    PrinterOn,
    /// Composite of every state that requires the door to be closed
    DoorClosed,
    /// Composite of the per-layer print cycle
    Printing,

    Initializing,
    DoorOpen,
    Homing,
    Home,
    Idle,
    PrintSetup,
    MovingToStartPosition,
    Exposing,
    Separating,
    Paused,
    EndingPrint,
}

impl StateId {
    /// Every leaf state.
    pub const LEAVES: [StateId; 11] = [
        StateId::Initializing,
        StateId::DoorOpen,
        StateId::Homing,
        StateId::Home,
        StateId::Idle,
        StateId::PrintSetup,
        StateId::MovingToStartPosition,
        StateId::Exposing,
        StateId::Separating,
        StateId::Paused,
        StateId::EndingPrint,
    ];

    /// Leaf entered by the initial transition.
    pub const INITIAL: StateId = StateId::Initializing;

    /// Immediate superstate, `None` for the top state
    pub const fn parent(self) -> Option<StateId> {
        match self {
            StateId::PrinterOn => None,
            StateId::DoorClosed | StateId::DoorOpen => Some(StateId::PrinterOn),
            StateId::Initializing
            | StateId::Homing
            | StateId::Home
            | StateId::Idle
            | StateId::Printing => Some(StateId::DoorClosed),
            StateId::PrintSetup
            | StateId::MovingToStartPosition
            | StateId::Exposing
            | StateId::Separating
            | StateId::Paused
            | StateId::EndingPrint => Some(StateId::Printing),
        }
    }

    pub const fn is_leaf(self) -> bool {
        !matches!(
            self,
            StateId::PrinterOn | StateId::DoorClosed | StateId::Printing
        )
    }

    /// Interrupt states suspend the state they replace and resume it
    /// through history.
    pub const fn is_interrupt(self) -> bool {
        matches!(self, StateId::DoorOpen | StateId::Paused)
    }

    /// Number of ancestors above this state
    pub fn depth(self) -> usize {
        let mut depth = 0;
        let mut state = self;
        while let Some(parent) = state.parent() {
            depth += 1;
            state = parent;
        }
        depth
    }

    /// True if `self` is `ancestor` or nested anywhere below it
    pub fn is_within(self, ancestor: StateId) -> bool {
        let mut state = Some(self);
        while let Some(s) = state {
            if s == ancestor {
                return true;
            }
            state = s.parent();
        }
        false
    }

    pub const fn name(self) -> &'static str {
        match self {
            StateId::PrinterOn => "PrinterOn",
            StateId::DoorClosed => "DoorClosed",
            StateId::Printing => "Printing",
            StateId::Initializing => "Initializing",
            StateId::DoorOpen => "DoorOpen",
            StateId::Homing => "Homing",
            StateId::Home => "Home",
            StateId::Idle => "Idle",
            StateId::PrintSetup => "PrintSetup",
            StateId::MovingToStartPosition => "MovingToStartPosition",
            StateId::Exposing => "Exposing",
            StateId::Separating => "Separating",
            StateId::Paused => "Paused",
            StateId::EndingPrint => "EndingPrint",
        }
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for StateId {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "{=str}", self.name());
    }
}
