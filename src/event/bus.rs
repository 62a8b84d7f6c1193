use crate::event::{EventHandler, WheelEvent};
use std::collections::VecDeque;

/// A queue of wheel events.
///
/// The controller pushes events while advancing a frame; the host drains
/// them afterwards and hands them to whichever handlers it owns. No handler
/// references are held across frames.
#[derive(Default)]
pub struct EventBus {
    pending: VecDeque<WheelEvent>,
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("pending", &format!("<{} events>", self.pending.len()))
            .finish()
    }
}

impl EventBus {
    /// Creates a new event bus
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an event for the next drain
    pub fn emit(&mut self, event: WheelEvent) {
        self.pending.push_back(event);
    }

    /// Take every queued event in emission order
    pub fn drain(&mut self) -> Vec<WheelEvent> {
        self.pending.drain(..).collect()
    }

    /// Drain the queue into each handler, in emission order
    pub fn dispatch(&mut self, handlers: &mut [&mut dyn EventHandler]) {
        for event in self.pending.drain(..) {
            for handler in handlers.iter_mut() {
                handler.handle_event(&event);
            }
        }
    }

    /// Drop queued events without delivering them
    pub fn clear(&mut self) {
        self.pending.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
