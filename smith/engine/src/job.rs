//! Bookkeeping for the print job in progress

/// Lifecycle of a print job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JobStatus {
    /// No job has been started
    #[default]
    Idle,
    InProgress,
    Complete,
    Cancelled,
    /// Ended by an error
    Aborted,
}

/// Layer and settings counters of the current job
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PrintJob {
    /// Layers in a complete print
    pub num_layers: u32,
    /// Layers finished so far; also the 0-based index of the layer being printed
    pub current_layer: u32,
    /// Settings received since the last `PrintSetup` entry
    pub settings_received: u8,
    pub status: JobStatus,
}

impl PrintJob {
    pub fn new(num_layers: u32) -> Self {
        Self {
            num_layers,
            ..Self::default()
        }
    }

    /// Start over at the first layer
    pub fn begin(&mut self) {
        self.current_layer = 0;
        self.settings_received = 0;
        self.status = JobStatus::InProgress;
    }

    /// 1-based number of the slice being printed
    pub fn slice_number(&self) -> u32 {
        self.current_layer + 1
    }

    /// Count one finished layer. Returns true if that was the last.
    pub fn finish_layer(&mut self) -> bool {
        self.current_layer = self.current_layer.saturating_add(1);
        if self.current_layer >= self.num_layers {
            self.status = JobStatus::Complete;
            true
        } else {
            false
        }
    }

    pub fn cancel(&mut self) {
        self.current_layer = 0;
        self.settings_received = 0;
        if self.status == JobStatus::InProgress {
            self.status = JobStatus::Cancelled;
        }
    }

    pub fn abort(&mut self) {
        self.settings_received = 0;
        if self.status == JobStatus::InProgress {
            self.status = JobStatus::Aborted;
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == JobStatus::InProgress
    }
}
