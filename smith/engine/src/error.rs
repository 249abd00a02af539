//! Error types for the print engine

use std::io;
use std::path::PathBuf;

use smith_core::Event;
use smith_hal::HalError;
use thiserror::Error;

/// A hardware command that the bus refused
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("{command} failed: {source}")]
pub struct HardwareError {
    pub command: &'static str,
    #[source]
    pub source: HalError,
}

impl HardwareError {
    pub fn new(command: &'static str, source: HalError) -> Self {
        Self { command, source }
    }
}

/// Errors surfaced by the print engine
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),
    #[error(transparent)]
    Hardware(#[from] HardwareError),
    #[error("hardware not ready (status {0:#04x})")]
    NotReady(u8),
    #[error("event queue full, dropped {0}")]
    QueueFull(Event),
    #[error("no print data in {}", .0.display())]
    NoPrintData(PathBuf),
    #[error("print data: {0}")]
    PrintData(#[from] io::Error),
}

/// Result type for print engine operations
pub type EngineResult<T> = Result<T, EngineError>;
