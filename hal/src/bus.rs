//! Real bus driver over an `embedded-hal` I2C implementation

use embedded_hal::i2c::{ErrorKind, I2c};

use crate::error::{HalError, HalResult};
use crate::i2c::{I2cAddress, I2cDevice};

/// Largest buffer accepted by [`I2cDevice::write_register_buf`], excluding
/// the register byte
pub const MAX_WRITE_LEN: usize = 32;

/// One slave on an I2C bus
pub struct BusDevice<I> {
    bus: I,
    address: I2cAddress,
}

impl<I: I2c> BusDevice<I> {
    pub fn new(bus: I, address: I2cAddress) -> Self {
        Self { bus, address }
    }

    /// Get device address
    pub fn address(&self) -> I2cAddress {
        self.address
    }

    /// Release the underlying bus
    pub fn release(self) -> I {
        self.bus
    }
}

fn map_error<E: embedded_hal::i2c::Error>(err: E) -> HalError {
    match err.kind() {
        ErrorKind::NoAcknowledge(_) => HalError::NoAcknowledge,
        ErrorKind::Bus | ErrorKind::ArbitrationLoss | ErrorKind::Overrun => HalError::BusError,
        _ => HalError::HardwareError,
    }
}

impl<I: I2c + Send> I2cDevice for BusDevice<I> {
    fn write(&mut self, data: u8) -> HalResult<()> {
        self.bus.write(self.address, &[data]).map_err(map_error)
    }

    fn write_register(&mut self, register: u8, data: u8) -> HalResult<()> {
        self.bus
            .write(self.address, &[register, data])
            .map_err(map_error)
    }

    fn write_register_buf(&mut self, register: u8, data: &[u8]) -> HalResult<()> {
        if data.len() > MAX_WRITE_LEN {
            return Err(HalError::InvalidParameter);
        }
        let mut frame = [0u8; MAX_WRITE_LEN + 1];
        frame[0] = register;
        frame[1..=data.len()].copy_from_slice(data);
        self.bus
            .write(self.address, &frame[..=data.len()])
            .map_err(map_error)
    }

    fn read_register(&mut self, register: u8) -> HalResult<u8> {
        let mut value = [0u8; 1];
        self.bus
            .write_read(self.address, &[register], &mut value)
            .map_err(map_error)?;
        Ok(value[0])
    }
}
