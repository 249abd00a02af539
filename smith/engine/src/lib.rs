//! # Smith Print Engine
//!
//! Connects the printer state machine to the motor and exposure controller.
//! [`PrintEngine`] owns the state machine, whose actions
//! ([`EngineActions`]) turn state entries into controller commands and keep
//! the [`PrintJob`] counters. Around it sit the pieces a running printer
//! needs: a thread-safe [`EventQueue`], the [`DoorMonitor`], the
//! [`Settings`] store and discovery of the slice images to print.
//!
//! ```no_run
//! use smith_core::Event;
//! use smith_engine::PrintEngine;
//! use smith_hal::pipe::NamedPipeI2cDevice;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let device = NamedPipeI2cDevice::open("/tmp/smith_read", "/tmp/smith_write")?;
//! let mut engine = PrintEngine::new(device);
//! engine.set_num_layers(2);
//! engine.begin()?;
//! engine.process(Event::Initialized);
//! # Ok(())
//! # }
//! ```

pub mod actions;
pub mod config;
pub mod door;
pub mod engine;
pub mod error;
pub mod hardware;
pub mod job;
pub mod print_data;
pub mod queue;
pub mod settings;

pub use actions::EngineActions;
pub use config::{EngineConfig, EngineConfigBuilder};
pub use door::DoorMonitor;
pub use engine::PrintEngine;
pub use error::{EngineError, EngineResult, HardwareError};
pub use job::{JobStatus, PrintJob};
pub use queue::{EventPoster, EventQueue};
pub use settings::{SettingKey, Settings, SettingsError};
