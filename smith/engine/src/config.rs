//! Print engine configuration

use crate::queue::DEFAULT_QUEUE_CAPACITY;

/// Configuration for a [`PrintEngine`](crate::PrintEngine).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Layers in a complete print; must be set before `begin`
    pub num_layers: u32,
    /// Capacity of the external event queue
    pub queue_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            num_layers: 0,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
        }
    }
}

impl EngineConfig {
    /// Create a new builder for engine configuration
    pub fn builder() -> EngineConfigBuilder {
        EngineConfigBuilder::default()
    }
}

/// Builder for [`EngineConfig`]
#[derive(Debug, Default)]
pub struct EngineConfigBuilder {
    config: EngineConfig,
}

impl EngineConfigBuilder {
    pub fn num_layers(mut self, layers: u32) -> Self {
        self.config.num_layers = layers;
        self
    }

    /// Set the event queue capacity (at least 1)
    pub fn queue_capacity(mut self, capacity: usize) -> Self {
        self.config.queue_capacity = capacity.max(1);
        self
    }

    pub fn build(self) -> EngineConfig {
        self.config
    }
}
