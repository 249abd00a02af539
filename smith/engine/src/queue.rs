//! Bounded event queue feeding the engine from other threads.
//!
//! The engine owns the [`EventQueue`] and drains it on its own thread;
//! producers (door monitor, command input, hardware interrupts) hold
//! cloned [`EventPoster`]s.

use std::collections::VecDeque;
use std::sync::Arc;

use log::warn;
use parking_lot::Mutex;
use smith_core::Event;

use crate::error::EngineError;

pub const DEFAULT_QUEUE_CAPACITY: usize = 32;

struct Shared {
    events: Mutex<VecDeque<Event>>,
    capacity: usize,
}

/// Consumer side of the event queue
pub struct EventQueue {
    shared: Arc<Shared>,
}

impl EventQueue {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            shared: Arc::new(Shared {
                events: Mutex::new(VecDeque::with_capacity(capacity)),
                capacity,
            }),
        }
    }

    /// Handle for posting events from any thread
    pub fn poster(&self) -> EventPoster {
        EventPoster {
            shared: Arc::clone(&self.shared),
        }
    }

    pub fn pop(&self) -> Option<Event> {
        self.shared.events.lock().pop_front()
    }

    pub fn len(&self) -> usize {
        self.shared.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.shared.capacity
    }
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new(DEFAULT_QUEUE_CAPACITY)
    }
}

/// Producer side of the event queue
#[derive(Clone)]
pub struct EventPoster {
    shared: Arc<Shared>,
}

impl EventPoster {
    /// Append `event`, failing if the queue is at capacity
    pub fn post(&self, event: Event) -> Result<(), EngineError> {
        let mut events = self.shared.events.lock();
        if events.len() >= self.shared.capacity {
            warn!("event queue full, dropping {}", event);
            return Err(EngineError::QueueFull(event));
        }
        events.push_back(event);
        Ok(())
    }
}
