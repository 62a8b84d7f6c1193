use crate::entry::Entry;

/// Events emitted by the spin controller, drained by the host once per frame.
#[derive(Debug, Clone, PartialEq)]
pub enum WheelEvent {
    /// A spin request was accepted
    SpinStarted {
        entry_count: usize,
        target_rotation: f64,
    },
    /// The animation crossed into a new segment
    SegmentTick { segment: usize },
    /// A spin completed; fired once per completed spin
    Winner { index: usize, entry: Entry },
}

impl WheelEvent {
    pub fn winner(&self) -> Option<&Entry> {
        match self {
            WheelEvent::Winner { entry, .. } => Some(entry),
            _ => None,
        }
    }

    pub fn is_tick(&self) -> bool {
        matches!(self, WheelEvent::SegmentTick { .. })
    }
}
