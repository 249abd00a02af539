//! The print engine: state machine, hardware actions and event queue

use log::{info, warn};
use smith_core::{Event, StateId};
use smith_hal::I2cDevice;
use smith_psm::PrinterStateMachine;

use crate::actions::EngineActions;
use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult, HardwareError};
use crate::hardware::Hardware;
use crate::job::PrintJob;
use crate::print_data;
use crate::queue::{EventPoster, EventQueue};
use crate::settings::Settings;

/// Drives the printer over the bus device `D`.
///
/// Events reach the engine either directly through [`process`](Self::process)
/// or through the queue ([`poster`](Self::poster) on other threads,
/// [`dispatch_pending`](Self::dispatch_pending) on the engine's thread).
/// Either way each event runs to completion before the next one starts.
pub struct PrintEngine<D: I2cDevice> {
    machine: PrinterStateMachine<EngineActions<D>>,
    queue: EventQueue,
}

impl<D: I2cDevice> PrintEngine<D> {
    pub fn new(device: D) -> Self {
        Self::with_config(device, EngineConfig::default())
    }

    pub fn with_config(device: D, config: EngineConfig) -> Self {
        let actions = EngineActions::new(Hardware::new(device), config.num_layers);
        Self {
            machine: PrinterStateMachine::new(actions),
            queue: EventQueue::new(config.queue_capacity),
        }
    }

    pub fn set_num_layers(&mut self, layers: u32) {
        self.machine.actions_mut().set_num_layers(layers);
    }

    /// Start the state machine. Has no effect once started.
    pub fn begin(&mut self) -> EngineResult<()> {
        if self.machine.is_started() {
            return Ok(());
        }
        if self.job().num_layers == 0 {
            return Err(EngineError::InvalidConfig("number of layers not set"));
        }
        info!("print engine starting, {} layers", self.job().num_layers);
        self.machine.start();
        Ok(())
    }

    pub fn state_machine(&self) -> &PrinterStateMachine<EngineActions<D>> {
        &self.machine
    }

    pub fn state_machine_mut(&mut self) -> &mut PrinterStateMachine<EngineActions<D>> {
        &mut self.machine
    }

    /// Active leaf state
    pub fn state(&self) -> StateId {
        self.machine.state()
    }

    /// Process one event to completion on the caller's thread
    pub fn process(&mut self, event: Event) {
        self.machine.process(event);
    }

    pub fn job(&self) -> &PrintJob {
        self.machine.actions().job()
    }

    /// Handle for queueing events from other threads
    pub fn poster(&self) -> EventPoster {
        self.queue.poster()
    }

    /// Process queued events until the queue is empty or the engine halts.
    /// Returns the number of events processed.
    pub fn dispatch_pending(&mut self) -> usize {
        let mut processed = 0;
        while !self.machine.is_halted() {
            let Some(event) = self.queue.pop() else {
                break;
            };
            self.machine.process(event);
            processed += 1;
        }
        processed
    }

    pub fn is_halted(&self) -> bool {
        self.machine.is_halted()
    }

    /// The hardware failure that halted the engine
    pub fn fatal_error(&self) -> Option<&HardwareError> {
        self.machine.actions().fatal_error()
    }

    /// Set the layer count from the slice images in the configured print data directory
    pub fn load_print_data(&mut self, settings: &Settings) -> EngineResult<u32> {
        let dir = settings.print_data_dir();
        let slices = print_data::count_slices(&dir)?;
        if slices == 0 {
            warn!("no slices found in {}", dir.display());
            return Err(EngineError::NoPrintData(dir));
        }
        info!("{} slices in {}", slices, dir.display());
        self.set_num_layers(slices);
        Ok(slices)
    }

    pub fn device(&self) -> &D {
        self.machine.actions().hardware().device()
    }
}
