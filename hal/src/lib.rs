//! Hardware Abstraction Layer (HAL) for the Smith printer
//!
//! This crate provides the byte-oriented bus interface through which the
//! print engine commands motor and exposure hardware, plus the door-switch
//! input. Implementations:
//! - [`bus::BusDevice`]: real driver over any `embedded-hal` I2C bus
//! - [`pipe::StreamI2cDevice`]: test substitute over a pair of byte streams
//!   (named pipes in practice)
//! - [`recording::RecordingDevice`]: in-process device that logs operations

#![cfg_attr(not(feature = "std"), no_std)]

pub mod error;
pub mod gpio;
pub mod i2c;

#[cfg(feature = "embedded-hal")]
pub mod bus;

#[cfg(feature = "std")]
pub mod pipe;

#[cfg(feature = "std")]
pub mod recording;

// Re-export commonly used types
pub use error::{HalError, HalResult};
pub use gpio::{InputPin, Level};
pub use i2c::I2cDevice;

#[cfg(feature = "std")]
pub use gpio::SysfsPin;
