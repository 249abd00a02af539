//! Host runner for the Smith print engine.
//!
//! [`PosixPort`] drives a [`PrintEngine`] from the engine's own thread:
//! it samples the door switch, dispatches queued events and sleeps between
//! passes until stopped or until the engine halts. Events arrive on the
//! queue from other threads, typically the command reader in [`input`].

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use log::{info, warn};
use smith_engine::{DoorMonitor, PrintEngine};
use smith_hal::{I2cDevice, InputPin};

pub mod input;
pub mod logger;

/// Requests that a running [`PosixPort`] return
#[derive(Clone, Debug, Default)]
pub struct StopHandle {
    stopped: Arc<AtomicBool>,
}

impl StopHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }
}

/// Why [`PosixPort::run`] returned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Stopped,
    /// The engine could not make the hardware safe
    Halted,
}

pub struct PosixPort {
    stop: StopHandle,
    poll_interval: Duration,
}

impl PosixPort {
    pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(10);

    pub fn new() -> Self {
        Self::with_poll_interval(Self::DEFAULT_POLL_INTERVAL)
    }

    pub fn with_poll_interval(poll_interval: Duration) -> Self {
        Self {
            stop: StopHandle::new(),
            poll_interval,
        }
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Run the engine until stopped or halted.
    ///
    /// Events queued before the stop request are still processed.
    pub fn run<D, P>(
        &self,
        engine: &mut PrintEngine<D>,
        mut door: Option<&mut DoorMonitor<P>>,
    ) -> RunOutcome
    where
        D: I2cDevice,
        P: InputPin,
    {
        info!("running in {}", engine.state());
        let mut door_failed = false;

        loop {
            let stopping = self.stop.is_stopped();

            if let Some(door) = door.as_deref_mut() {
                match door.poll() {
                    Ok(_) => door_failed = false,
                    Err(e) if !door_failed => {
                        warn!("door switch: {}", e);
                        door_failed = true;
                    }
                    Err(_) => {}
                }
            }

            engine.dispatch_pending();
            if engine.is_halted() {
                return RunOutcome::Halted;
            }
            if stopping {
                info!("stopped in {}", engine.state());
                return RunOutcome::Stopped;
            }
            thread::sleep(self.poll_interval);
        }
    }
}

impl Default for PosixPort {
    fn default() -> Self {
        Self::new()
    }
}
