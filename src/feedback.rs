use crate::event::{EventHandler, WheelEvent};

/// Pointer deflection right after a tick, in degrees
pub const TICK_KICK_DEG: f32 = -18.0;
/// Fraction of the deflection left after one second
const DECAY_PER_SEC: f32 = 0.000_5;

/// Flicks the pointer on every segment boundary and lets it spring back.
#[derive(Debug, Clone, Default)]
pub struct PointerFeedback {
    tilt: f32,
    ticks: u64,
}

impl PointerFeedback {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current pointer deflection in degrees
    pub fn tilt(&self) -> f32 {
        self.tilt
    }

    /// Ticks seen since creation
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Relaxes the pointer back towards rest. Returns true while still moving.
    pub fn update(&mut self, dt: f32) -> bool {
        self.tilt *= DECAY_PER_SEC.powf(dt.max(0.0));
        if self.tilt.abs() < 0.05 {
            self.tilt = 0.0;
        }
        self.tilt != 0.0
    }
}

impl EventHandler for PointerFeedback {
    fn handle_event(&mut self, event: &WheelEvent) {
        match event {
            WheelEvent::SegmentTick { .. } => {
                self.ticks += 1;
                self.tilt = TICK_KICK_DEG;
            }
            WheelEvent::Winner { entry, .. } => {
                log::info!("🎉 Winner: {}", entry.name);
                self.tilt = 0.0;
            }
            WheelEvent::SpinStarted { .. } => {}
        }
    }
}
