//! Command protocol of the printer's motor and exposure controller.
//!
//! The controller is a single register-addressed device on the bus. Motion
//! and exposure are commanded by writing command codes to their command
//! registers; the slice to expose is written as a big-endian 16-bit number
//! ahead of the exposure start command.

use log::debug;
use smith_hal::{HalError, I2cDevice};

use crate::error::{EngineError, EngineResult, HardwareError};

/// Controller register map
pub mod registers {
    /// Status byte, see [`STATUS_READY`](super::STATUS_READY)
    pub const STATUS: u8 = 0x00;
    pub const MOTOR_COMMAND: u8 = 0x20;
    /// Two bytes, big-endian slice number
    pub const EXPOSURE_LAYER: u8 = 0x30;
    pub const EXPOSURE_COMMAND: u8 = 0x31;
}

/// Single byte that resets the controller
pub const BOARD_RESET: u8 = 0xA5;

/// Status bit set once the controller has finished resetting
pub const STATUS_READY: u8 = 0x01;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum MotorCommand {
    Home = 0x01,
    MoveToStart = 0x02,
    Separate = 0x03,
    Pause = 0x04,
    Resume = 0x05,
    Stop = 0x06,
}

impl MotorCommand {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Home => "motor home",
            Self::MoveToStart => "motor move to start",
            Self::Separate => "motor separate",
            Self::Pause => "motor pause",
            Self::Resume => "motor resume",
            Self::Stop => "motor stop",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExposureCommand {
    Start = 0x01,
    Stop = 0x02,
    Pause = 0x03,
    Resume = 0x04,
}

impl ExposureCommand {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Start => "exposure start",
            Self::Stop => "exposure stop",
            Self::Pause => "exposure pause",
            Self::Resume => "exposure resume",
        }
    }
}

/// Exclusive owner of the controller device
pub struct Hardware<D> {
    device: D,
}

impl<D: I2cDevice> Hardware<D> {
    pub fn new(device: D) -> Self {
        Self { device }
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    /// Reset the controller and confirm it reports ready
    pub fn reset(&mut self) -> EngineResult<()> {
        self.device
            .write(BOARD_RESET)
            .map_err(|e| HardwareError::new("board reset", e))?;
        let status = self
            .device
            .read_register(registers::STATUS)
            .map_err(|e| HardwareError::new("status read", e))?;
        if status & STATUS_READY == 0 {
            return Err(EngineError::NotReady(status));
        }
        debug!("controller ready (status {:#04x})", status);
        Ok(())
    }

    pub fn motor(&mut self, command: MotorCommand) -> Result<(), HardwareError> {
        debug!("{}", command.name());
        self.device
            .write_register(registers::MOTOR_COMMAND, command as u8)
            .map_err(|e| HardwareError::new(command.name(), e))
    }

    pub fn exposure(&mut self, command: ExposureCommand) -> Result<(), HardwareError> {
        debug!("{}", command.name());
        self.device
            .write_register(registers::EXPOSURE_COMMAND, command as u8)
            .map_err(|e| HardwareError::new(command.name(), e))
    }

    /// Select slice `slice` (1-based) and start exposing it
    pub fn expose_slice(&mut self, slice: u32) -> Result<(), HardwareError> {
        let slice = u16::try_from(slice)
            .map_err(|_| HardwareError::new("exposure layer select", HalError::InvalidParameter))?;
        self.device
            .write_register_buf(registers::EXPOSURE_LAYER, &slice.to_be_bytes())
            .map_err(|e| HardwareError::new("exposure layer select", e))?;
        self.exposure(ExposureCommand::Start)
    }
}
