//! Event and signal definitions for the printer control core

use core::fmt;
use core::str::FromStr;

/// Numeric identifier of an event, accepted in place of its name on the
/// host command channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Signal(pub u16);

impl Signal {
    /// First signal value assigned to a printer event.
    ///
    /// Values below this are reserved for framework use (entry, exit, init).
    pub const USER: Signal = Signal(4);

    /// Create a new signal from a raw value
    pub const fn new(signal: u16) -> Self {
        Signal(signal)
    }

    /// Get the raw signal value
    pub const fn raw(self) -> u16 {
        self.0
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SIG({:#06x})", self.0)
    }
}

/// Discrete stimuli delivered to the printer state machine.
///
/// Events carry no payload. `GotSetting` only counts: the value of the
/// setting is handled outside the control core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum Event {
    Reset = 4,
    DoorOpened,
    DoorClosed,
    Initialized,
    AtHome,
    StartPrint,
    GotSetting,
    AtStartPosition,
    Pulse,
    Exposed,
    Separated,
    PrintEnded,
    Cancel,
    Error,
    Pause,
    Resume,
}

impl Event {
    /// Every event, in signal order.
    pub const ALL: [Event; 16] = [
        Event::Reset,
        Event::DoorOpened,
        Event::DoorClosed,
        Event::Initialized,
        Event::AtHome,
        Event::StartPrint,
        Event::GotSetting,
        Event::AtStartPosition,
        Event::Pulse,
        Event::Exposed,
        Event::Separated,
        Event::PrintEnded,
        Event::Cancel,
        Event::Error,
        Event::Pause,
        Event::Resume,
    ];

    /// Signal identifying this event
    pub const fn signal(self) -> Signal {
        Signal(self as u16)
    }

    /// Look up the event carrying `signal`
    pub fn from_signal(signal: Signal) -> Option<Event> {
        Event::ALL.iter().copied().find(|e| e.signal() == signal)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Event::Reset => "Reset",
            Event::DoorOpened => "DoorOpened",
            Event::DoorClosed => "DoorClosed",
            Event::Initialized => "Initialized",
            Event::AtHome => "AtHome",
            Event::StartPrint => "StartPrint",
            Event::GotSetting => "GotSetting",
            Event::AtStartPosition => "AtStartPosition",
            Event::Pulse => "Pulse",
            Event::Exposed => "Exposed",
            Event::Separated => "Separated",
            Event::PrintEnded => "PrintEnded",
            Event::Cancel => "Cancel",
            Event::Error => "Error",
            Event::Pause => "Pause",
            Event::Resume => "Resume",
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Event {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "{=str}", self.name());
    }
}

/// Error returned when a string names no known event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseEventError;

impl fmt::Display for ParseEventError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown event name")
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParseEventError {}

impl FromStr for Event {
    type Err = ParseEventError;

    /// Parses an event from its name, ignoring ASCII case and surrounding
    /// whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Event::ALL
            .iter()
            .copied()
            .find(|e| e.name().eq_ignore_ascii_case(s))
            .ok_or(ParseEventError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signals_start_after_reserved_range() {
        assert_eq!(Event::Reset.signal(), Signal::USER);
        assert_eq!(Event::Resume.signal().raw(), Signal::USER.raw() + 15);
    }

    #[test]
    fn signal_lookup_matches_event() {
        for event in Event::ALL {
            assert_eq!(Event::from_signal(event.signal()), Some(event));
        }
        assert_eq!(Event::from_signal(Signal::new(0)), None);
    }

    #[test]
    fn parse_ignores_case_and_whitespace() {
        assert_eq!("doorOpened".parse::<Event>(), Ok(Event::DoorOpened));
        assert_eq!("  PRINTENDED\n".parse::<Event>(), Ok(Event::PrintEnded));
        assert_eq!("Exploded".parse::<Event>(), Err(ParseEventError));
    }
}
