//! Bus substitute backed by a pair of unidirectional byte streams.
//!
//! Writes are framed onto the outbound stream exactly as they would appear
//! on the wire after the address byte: `[data]`, `[register, data]` or
//! `[register, data...]`. A register read sends `[register]` and then
//! blocks for one reply byte on the inbound stream. A peer process (a
//! hardware simulator) sits on the other ends of the two named pipes.

use std::fs::{File, OpenOptions};
use std::io::{Read, Write};
use std::path::Path;

use log::trace;

use crate::error::HalResult;
use crate::i2c::I2cDevice;

/// Device speaking the bus framing over any reader/writer pair
pub struct StreamI2cDevice<R, W> {
    inbound: R,
    outbound: W,
}

/// Device backed by two named pipes (FIFOs)
pub type NamedPipeI2cDevice = StreamI2cDevice<File, File>;

impl<R: Read, W: Write> StreamI2cDevice<R, W> {
    pub fn new(inbound: R, outbound: W) -> Self {
        Self { inbound, outbound }
    }

    /// Get the streams back
    pub fn into_inner(self) -> (R, W) {
        (self.inbound, self.outbound)
    }

    fn send(&mut self, frame: &[u8]) -> HalResult<()> {
        trace!("bus out {:02x?}", frame);
        self.outbound.write_all(frame)?;
        self.outbound.flush()?;
        Ok(())
    }
}

impl NamedPipeI2cDevice {
    /// Open the inbound and outbound FIFOs.
    ///
    /// Opening a FIFO blocks until the peer opens the other end, so the
    /// simulator must open `read_pipe` for writing and `write_pipe` for
    /// reading.
    pub fn open(read_pipe: impl AsRef<Path>, write_pipe: impl AsRef<Path>) -> HalResult<Self> {
        let outbound = OpenOptions::new().write(true).open(write_pipe)?;
        let inbound = OpenOptions::new().read(true).open(read_pipe)?;
        Ok(Self::new(inbound, outbound))
    }
}

impl<R: Read + Send, W: Write + Send> I2cDevice for StreamI2cDevice<R, W> {
    fn write(&mut self, data: u8) -> HalResult<()> {
        self.send(&[data])
    }

    fn write_register(&mut self, register: u8, data: u8) -> HalResult<()> {
        self.send(&[register, data])
    }

    fn write_register_buf(&mut self, register: u8, data: &[u8]) -> HalResult<()> {
        let mut frame = Vec::with_capacity(data.len() + 1);
        frame.push(register);
        frame.extend_from_slice(data);
        self.send(&frame)
    }

    fn read_register(&mut self, register: u8) -> HalResult<u8> {
        self.send(&[register])?;
        let mut value = [0u8; 1];
        self.inbound.read_exact(&mut value)?;
        trace!("bus in {:02x}", value[0]);
        Ok(value[0])
    }
}
