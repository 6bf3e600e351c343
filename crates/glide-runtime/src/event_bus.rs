//! FIFO queue of host events

use crate::event::HostEvent;
use std::collections::VecDeque;

/// A simple event queue that the host pushes to and the dispatcher drains.
///
/// Events come out in the order they went in.
pub struct EventBus {
    events: VecDeque<HostEvent>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            events: VecDeque::new(),
        }
    }

    /// Push an event onto the bus
    pub fn push(&mut self, event: HostEvent) {
        self.events.push_back(event);
    }

    /// Pop the oldest pending event
    pub fn pop(&mut self) -> Option<HostEvent> {
        self.events.pop_front()
    }

    /// Drain all events from the bus, returning them in arrival order
    pub fn drain(&mut self) -> Vec<HostEvent> {
        self.events.drain(..).collect()
    }

    /// Check if there are pending events
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of pending events
    pub fn len(&self) -> usize {
        self.events.len()
    }
}
