//! I2C (Inter-Integrated Circuit) device abstraction

use crate::error::HalResult;

/// 7-bit I2C slave address
pub type I2cAddress = u8;

/// A register-addressed device on a byte-oriented bus.
///
/// Each operation either completes or reports why it did not; callers treat
/// any error as a failed hardware command.
pub trait I2cDevice: Send {
    /// Write a single byte
    fn write(&mut self, data: u8) -> HalResult<()>;

    /// Write a single byte to a register
    fn write_register(&mut self, register: u8, data: u8) -> HalResult<()>;

    /// Write a buffer starting at a register
    fn write_register_buf(&mut self, register: u8, data: &[u8]) -> HalResult<()>;

    /// Read a single byte from a register
    fn read_register(&mut self, register: u8) -> HalResult<u8>;
}

#[cfg(feature = "std")]
impl<D: I2cDevice + ?Sized> I2cDevice for Box<D> {
    fn write(&mut self, data: u8) -> HalResult<()> {
        (**self).write(data)
    }

    fn write_register(&mut self, register: u8, data: u8) -> HalResult<()> {
        (**self).write_register(register, data)
    }

    fn write_register_buf(&mut self, register: u8, data: &[u8]) -> HalResult<()> {
        (**self).write_register_buf(register, data)
    }

    fn read_register(&mut self, register: u8) -> HalResult<u8> {
        (**self).read_register(register)
    }
}
