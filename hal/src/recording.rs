//! In-process device that records every bus operation.
//!
//! Used to run the engine without hardware and to observe the exact command
//! sequence in tests. Clones share one log, so a test keeps a clone as a
//! probe after handing the device to the engine.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::{HalError, HalResult};
use crate::i2c::I2cDevice;

/// One operation seen by a [`RecordingDevice`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BusOp {
    Write(u8),
    WriteRegister { register: u8, data: u8 },
    WriteBuffer { register: u8, data: Vec<u8> },
    Read { register: u8 },
}

#[derive(Default)]
struct Shared {
    ops: Vec<BusOp>,
    registers: HashMap<u8, u8>,
    failing_writes: HashMap<(u8, u8), HalError>,
    fail_all: Option<HalError>,
}

/// Recording device with injectable failures.
///
/// Failed operations are recorded as attempted before the error is returned.
#[derive(Clone, Default)]
pub struct RecordingDevice {
    shared: Arc<Mutex<Shared>>,
}

impl RecordingDevice {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value returned by reads of `register` (0 when never set)
    pub fn set_register(&self, register: u8, value: u8) {
        self.shared.lock().registers.insert(register, value);
    }

    /// Make every write of `data` to `register` fail with `error`
    pub fn fail_write(&self, register: u8, data: u8, error: HalError) {
        self.shared
            .lock()
            .failing_writes
            .insert((register, data), error);
    }

    /// Make every operation fail with `error`
    pub fn fail_all(&self, error: HalError) {
        self.shared.lock().fail_all = Some(error);
    }

    pub fn clear_failures(&self) {
        let mut shared = self.shared.lock();
        shared.failing_writes.clear();
        shared.fail_all = None;
    }

    /// Operations recorded so far
    pub fn ops(&self) -> Vec<BusOp> {
        self.shared.lock().ops.clone()
    }

    /// Operations recorded so far, clearing the log
    pub fn take_ops(&self) -> Vec<BusOp> {
        std::mem::take(&mut self.shared.lock().ops)
    }

    fn record(&self, op: BusOp) -> HalResult<()> {
        let mut shared = self.shared.lock();
        let failure = match &op {
            BusOp::WriteRegister { register, data } => {
                shared.failing_writes.get(&(*register, *data)).copied()
            }
            _ => None,
        };
        shared.ops.push(op);
        match shared.fail_all.or(failure) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl I2cDevice for RecordingDevice {
    fn write(&mut self, data: u8) -> HalResult<()> {
        self.record(BusOp::Write(data))
    }

    fn write_register(&mut self, register: u8, data: u8) -> HalResult<()> {
        self.record(BusOp::WriteRegister { register, data })
    }

    fn write_register_buf(&mut self, register: u8, data: &[u8]) -> HalResult<()> {
        self.record(BusOp::WriteBuffer {
            register,
            data: data.to_vec(),
        })
    }

    fn read_register(&mut self, register: u8) -> HalResult<u8> {
        self.record(BusOp::Read { register })?;
        let shared = self.shared.lock();
        Ok(shared.registers.get(&register).copied().unwrap_or(0))
    }
}
