//! Door switch monitoring

use log::{debug, warn};
use smith_core::Event;
use smith_hal::{InputPin, Level};

use crate::error::{EngineResult, HardwareError};
use crate::queue::EventPoster;

/// Posts `DoorOpened`/`DoorClosed` when the door switch changes level.
///
/// A high switch level means the door is open. The door is assumed closed
/// before the first poll, so a door found open on the first poll is
/// reported immediately.
pub struct DoorMonitor<P> {
    pin: P,
    poster: EventPoster,
    last: Level,
}

impl<P: InputPin> DoorMonitor<P> {
    pub fn new(pin: P, poster: EventPoster) -> Self {
        Self {
            pin,
            poster,
            last: Level::Low,
        }
    }

    /// Sample the switch once. Returns the event posted, if any.
    pub fn poll(&mut self) -> EngineResult<Option<Event>> {
        let level = self
            .pin
            .read()
            .map_err(|e| HardwareError::new("door switch read", e))?;
        if level == self.last {
            return Ok(None);
        }

        let event = match level {
            Level::High => Event::DoorOpened,
            Level::Low => Event::DoorClosed,
        };
        debug!("door switch {:?} -> {:?}", self.last, level);
        if let Err(e) = self.poster.post(event) {
            // Keep the old level so the change is reported again next poll.
            warn!("door event not queued: {}", e);
            return Err(e);
        }
        self.last = level;
        Ok(Some(event))
    }

    pub fn is_open(&self) -> bool {
        self.last == Level::High
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queue::EventQueue;
    use crate::EngineError;
    use parking_lot::Mutex;
    use smith_hal::{HalError, HalResult};
    use std::sync::Arc;

    #[derive(Clone)]
    struct FakeSwitch(Arc<Mutex<HalResult<Level>>>);

    impl FakeSwitch {
        fn new() -> Self {
            Self(Arc::new(Mutex::new(Ok(Level::Low))))
        }

        fn set(&self, level: HalResult<Level>) {
            *self.0.lock() = level;
        }
    }

    impl InputPin for FakeSwitch {
        fn read(&self) -> HalResult<Level> {
            *self.0.lock()
        }
    }

    #[test]
    fn level_changes_post_door_events() {
        let queue = EventQueue::new(8);
        let switch = FakeSwitch::new();
        let mut monitor = DoorMonitor::new(switch.clone(), queue.poster());

        assert_eq!(monitor.poll().unwrap(), None);
        switch.set(Ok(Level::High));
        assert_eq!(monitor.poll().unwrap(), Some(Event::DoorOpened));
        assert_eq!(monitor.poll().unwrap(), None);
        assert!(monitor.is_open());
        switch.set(Ok(Level::Low));
        assert_eq!(monitor.poll().unwrap(), Some(Event::DoorClosed));

        assert_eq!(queue.pop(), Some(Event::DoorOpened));
        assert_eq!(queue.pop(), Some(Event::DoorClosed));
        assert!(queue.is_empty());
    }

    #[test]
    fn read_failure_is_reported() {
        let queue = EventQueue::new(8);
        let switch = FakeSwitch::new();
        switch.set(Err(HalError::Disconnected));
        let mut monitor = DoorMonitor::new(switch.clone(), queue.poster());

        let err = monitor.poll().unwrap_err();
        assert!(matches!(err, EngineError::Hardware(e) if e.source == HalError::Disconnected));
    }

    #[test]
    fn change_is_retried_when_queue_is_full() {
        let queue = EventQueue::new(1);
        queue.poster().post(Event::Pulse).unwrap();
        let switch = FakeSwitch::new();
        switch.set(Ok(Level::High));
        let mut monitor = DoorMonitor::new(switch.clone(), queue.poster());

        assert!(monitor.poll().is_err());
        assert!(!monitor.is_open());
        queue.pop();
        assert_eq!(monitor.poll().unwrap(), Some(Event::DoorOpened));
    }
}
