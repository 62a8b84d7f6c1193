//! Segment layout: angular widths and label sizing derived from the entry
//! count and the wheel diameter.

/// Gap between the wheel rim and the drawing area's edge
pub const RIM_MARGIN: f32 = 10.0;
/// Share of the radius a label may occupy
pub const LABEL_WIDTH_RATIO: f32 = 0.7;
/// Distance from the rim to the label's outer edge
pub const LABEL_RIM_INSET: f32 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelLayout {
    /// Angular width of one segment, in degrees
    pub angle_per_segment: f32,
    pub font_size: f32,
    pub hub_radius: f32,
    pub diameter: f32,
}

impl WheelLayout {
    pub fn compute(entry_count: usize, diameter: f32) -> Self {
        Self {
            angle_per_segment: 360.0 / entry_count.max(1) as f32,
            font_size: label_font_size(entry_count, diameter),
            hub_radius: (diameter / 16.0).max(30.0),
            diameter,
        }
    }

    pub fn radius(&self) -> f32 {
        (self.diameter / 2.0 - RIM_MARGIN).max(0.0)
    }

    /// Widest a label may render before it gets truncated
    pub fn label_budget(&self) -> f32 {
        self.radius() * LABEL_WIDTH_RATIO
    }

    /// Font size of the hub's "SPIN" caption
    pub fn hub_font_size(&self) -> f32 {
        (self.diameter / 35.0).max(12.0)
    }
}

/// Step function: smaller labels as segments narrow.
fn label_font_size(entry_count: usize, diameter: f32) -> f32 {
    let base = diameter / 25.0;
    let scale = match entry_count {
        n if n > 20 => 0.6,
        n if n > 12 => 0.75,
        n if n > 8 => 0.85,
        _ => 1.0,
    };
    base * scale
}
