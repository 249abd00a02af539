//! Hardware-backed actions for the printer state machine

use log::{info, warn};
use smith_hal::I2cDevice;
use smith_psm::{LayerOutcome, PrinterActions, REQUIRED_SETTINGS};

use crate::error::{EngineError, HardwareError};
use crate::hardware::{ExposureCommand, Hardware, MotorCommand};
use crate::job::PrintJob;

/// Implements the state machine's actions on the controller hardware and
/// keeps the job counters.
pub struct EngineActions<D> {
    hardware: Hardware<D>,
    job: PrintJob,
    motion_paused: bool,
    fatal: Option<HardwareError>,
}

impl<D: I2cDevice> EngineActions<D> {
    pub fn new(hardware: Hardware<D>, num_layers: u32) -> Self {
        Self {
            hardware,
            job: PrintJob::new(num_layers),
            motion_paused: false,
            fatal: None,
        }
    }

    pub fn job(&self) -> &PrintJob {
        &self.job
    }

    pub fn set_num_layers(&mut self, layers: u32) {
        self.job.num_layers = layers;
    }

    pub fn hardware(&self) -> &Hardware<D> {
        &self.hardware
    }

    /// True while motion and exposure are held by a pause command
    pub fn is_motion_paused(&self) -> bool {
        self.motion_paused
    }

    /// The failure that prevented the hardware from being made safe
    pub fn fatal_error(&self) -> Option<&HardwareError> {
        self.fatal.as_ref()
    }
}

impl<D: I2cDevice> PrinterActions for EngineActions<D> {
    type Error = EngineError;

    fn initialize(&mut self) -> Result<(), EngineError> {
        self.motion_paused = false;
        self.hardware.reset()
    }

    fn start_homing(&mut self) -> Result<(), EngineError> {
        Ok(self.hardware.motor(MotorCommand::Home)?)
    }

    fn begin_job(&mut self) {
        self.job.begin();
        info!("print started: {} layers", self.job.num_layers);
    }

    fn request_settings(&mut self) {
        self.job.settings_received = 0;
    }

    fn record_setting(&mut self) -> u8 {
        if self.job.settings_received < REQUIRED_SETTINGS {
            self.job.settings_received += 1;
        }
        self.job.settings_received
    }

    fn move_to_start(&mut self) -> Result<(), EngineError> {
        Ok(self.hardware.motor(MotorCommand::MoveToStart)?)
    }

    fn start_exposure(&mut self) -> Result<(), EngineError> {
        let slice = self.job.slice_number();
        info!("exposing layer {} of {}", slice, self.job.num_layers);
        Ok(self.hardware.expose_slice(slice)?)
    }

    fn start_separation(&mut self) -> Result<(), EngineError> {
        Ok(self.hardware.motor(MotorCommand::Separate)?)
    }

    fn end_layer(&mut self) -> LayerOutcome {
        if self.job.finish_layer() {
            info!("print complete: {} layers", self.job.num_layers);
            LayerOutcome::Complete
        } else {
            LayerOutcome::NextLayer
        }
    }

    fn cancel_job(&mut self) {
        if self.job.is_active() {
            info!("print cancelled at layer {}", self.job.current_layer);
        }
        self.job.cancel();
    }

    fn abort_job(&mut self) {
        if self.job.is_active() {
            warn!("print aborted at layer {}", self.job.slice_number());
        }
        self.job.abort();
    }

    fn pause_motion(&mut self) -> Result<(), EngineError> {
        if self.motion_paused {
            return Ok(());
        }
        self.hardware.motor(MotorCommand::Pause)?;
        self.hardware.exposure(ExposureCommand::Pause)?;
        self.motion_paused = true;
        Ok(())
    }

    fn resume_motion(&mut self) -> Result<(), EngineError> {
        if !self.motion_paused {
            return Ok(());
        }
        self.motion_paused = false;
        self.hardware.motor(MotorCommand::Resume)?;
        self.hardware.exposure(ExposureCommand::Resume)?;
        Ok(())
    }

    fn make_safe(&mut self) -> Result<(), EngineError> {
        self.motion_paused = false;
        // Both stops are attempted even if the first fails.
        let exposure = self.hardware.exposure(ExposureCommand::Stop);
        let motor = self.hardware.motor(MotorCommand::Stop);
        match exposure.and(motor) {
            Ok(()) => Ok(()),
            Err(e) => {
                self.fatal = Some(e);
                Err(e.into())
            }
        }
    }
}
