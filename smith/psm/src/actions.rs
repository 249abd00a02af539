//! Capability interface through which the state machine drives its host

/// Result of finishing a layer in `EndingPrint`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerOutcome {
    /// More layers remain; the next `AtHome` proceeds to print setup
    NextLayer,
    /// The last layer has been printed
    Complete,
}

/// Operations the printer state machine invokes on entry, exit and internal
/// transitions.
///
/// Every operation runs synchronously inside
/// [`PrinterStateMachine::process`](crate::PrinterStateMachine::process).
/// A failed operation is reported back to the machine, which raises a
/// deferred `Error` event once the current event has completed. A failed
/// [`make_safe`](PrinterActions::make_safe) halts the machine instead.
pub trait PrinterActions {
    /// Error produced by failing hardware operations
    type Error: core::fmt::Display;

    /// Entering `Initializing`: reset the hardware and check it is ready
    fn initialize(&mut self) -> Result<(), Self::Error>;

    /// Entering `Homing`: command the build head home
    fn start_homing(&mut self) -> Result<(), Self::Error>;

    /// `StartPrint` accepted: reset the print job for a new attempt
    fn begin_job(&mut self);

    /// Entering `PrintSetup`: forget settings received for a previous layer
    fn request_settings(&mut self);

    /// `GotSetting` in `PrintSetup`: returns the number of settings received
    fn record_setting(&mut self) -> u8;

    /// Entering `MovingToStartPosition`
    fn move_to_start(&mut self) -> Result<(), Self::Error>;

    /// Entering `Exposing`: expose the current layer
    fn start_exposure(&mut self) -> Result<(), Self::Error>;

    /// Entering `Separating`: end exposure and peel the layer off the tray
    fn start_separation(&mut self) -> Result<(), Self::Error>;

    /// Entering `EndingPrint`: advance the layer counter
    fn end_layer(&mut self) -> LayerOutcome;

    /// `Cancel` in `Homing`: drop the pending job
    fn cancel_job(&mut self);

    /// `Error` from any state: drop in-flight job state
    fn abort_job(&mut self);

    /// Entering an interrupt state. Must tolerate repeated calls.
    fn pause_motion(&mut self) -> Result<(), Self::Error>;

    /// Leaving an interrupt state through its resume transition.
    /// Must tolerate calls while not paused.
    fn resume_motion(&mut self) -> Result<(), Self::Error>;

    /// Entering `Idle`: disable exposure and motors. Failure is fatal.
    fn make_safe(&mut self) -> Result<(), Self::Error>;
}
