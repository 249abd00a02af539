//! Common error types for HAL operations

use core::fmt;

/// HAL operation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HalError {
    /// Invalid parameter provided
    InvalidParameter,
    /// Operation timed out
    Timeout,
    /// Device did not acknowledge its address or data
    NoAcknowledge,
    /// Bus-level fault (arbitration loss, bus error, overrun)
    BusError,
    /// Fewer bytes were transferred than requested
    ShortTransfer,
    /// The device or its transport has gone away
    Disconnected,
    /// Failure injected or reported by a host-side device
    HardwareError,
    /// Host I/O failure underneath a substitute device
    #[cfg(feature = "std")]
    Io(std::io::ErrorKind),
}

impl fmt::Display for HalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParameter => write!(f, "invalid parameter"),
            Self::Timeout => write!(f, "operation timeout"),
            Self::NoAcknowledge => write!(f, "device did not acknowledge"),
            Self::BusError => write!(f, "bus error"),
            Self::ShortTransfer => write!(f, "short transfer"),
            Self::Disconnected => write!(f, "device disconnected"),
            Self::HardwareError => write!(f, "hardware error"),
            #[cfg(feature = "std")]
            Self::Io(kind) => write!(f, "i/o error: {}", kind),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for HalError {}

#[cfg(feature = "std")]
impl From<std::io::Error> for HalError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::UnexpectedEof | std::io::ErrorKind::WriteZero => {
                Self::ShortTransfer
            }
            std::io::ErrorKind::BrokenPipe => Self::Disconnected,
            std::io::ErrorKind::TimedOut | std::io::ErrorKind::WouldBlock => Self::Timeout,
            kind => Self::Io(kind),
        }
    }
}

/// Result type for HAL operations
pub type HalResult<T> = Result<T, HalError>;
