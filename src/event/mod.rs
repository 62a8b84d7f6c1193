mod bus;
mod events;

pub use bus::EventBus;
pub use events::WheelEvent;

/// Something that reacts to wheel events, such as spin history or feedback
pub trait EventHandler {
    fn handle_event(&mut self, event: &WheelEvent);
}
