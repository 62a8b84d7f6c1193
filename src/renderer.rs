// src/renderer.rs
use crate::entry::Entry;
use crate::layout::{LABEL_RIM_INSET, WheelLayout};
use crate::palette::ColorPalette;
use egui::emath::Rot2;
use egui::epaint::{Fonts, TextShape};
use egui::{Align2, Color32, FontId, Pos2, Rect, Shape, Stroke, Vec2};
use std::collections::HashMap;

/// Angle of the first segment's leading edge: 12 o'clock, with 0° at
/// 3 o'clock and angles growing clockwise.
pub const START_ANGLE_DEG: f32 = -90.0;
pub const ELLIPSIS: &str = "…";

pub const SEPARATOR_WIDTH: f32 = 3.0;
pub const SEPARATOR_COLOR: Color32 = Color32::WHITE;
pub const PLACEHOLDER_FILL: Color32 = Color32::from_rgb(0xE0, 0xE0, 0xE0);
pub const OUTLINE_COLOR: Color32 = Color32::from_rgb(0x33, 0x33, 0x33);
pub const LABEL_COLOR: Color32 = Color32::WHITE;
pub const LABEL_SHADOW: Color32 = Color32::from_rgba_premultiplied(0, 0, 0, 128);
pub const HUB_CAPTION: &str = "SPIN";

const ARC_STEP_DEG: f32 = 4.0;
const POINTER_HALF_WIDTH: f32 = 15.0;
const POINTER_LENGTH: f32 = 26.0;
const LABEL_CACHE_LIMIT: usize = 512;

/// Measures rendered text width for a given font size.
///
/// Kept separate from the painter so labels can be laid out without a real
/// rendering surface.
pub trait TextMeasure {
    fn text_width(&self, text: &str, font_size: f32) -> f32;
}

/// Measures with egui's loaded fonts
pub struct FontsMeasure<'a> {
    fonts: &'a Fonts,
}

impl<'a> FontsMeasure<'a> {
    pub fn new(fonts: &'a Fonts) -> Self {
        Self { fonts }
    }
}

impl TextMeasure for FontsMeasure<'_> {
    fn text_width(&self, text: &str, font_size: f32) -> f32 {
        self.fonts
            .layout_no_wrap(text.to_owned(), label_font(font_size), LABEL_COLOR)
            .size()
            .x
    }
}

pub fn label_font(font_size: f32) -> FontId {
    FontId::proportional(font_size)
}

/// Shortens `text` to the longest character prefix that, followed by an
/// ellipsis, fits in `max_width`. Empty when not even the ellipsis fits.
///
/// Uses a binary search over the prefix length, so the number of
/// measurements grows with the log of the text length.
pub fn truncate_label(
    text: &str,
    max_width: f32,
    font_size: f32,
    measure: &dyn TextMeasure,
) -> String {
    if measure.text_width(text, font_size) <= max_width {
        return text.to_owned();
    }

    let boundaries: Vec<usize> = text
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(text.len()))
        .collect();
    let char_count = boundaries.len() - 1;
    let prefix = |chars: usize| &text[..boundaries[chars]];

    let (mut low, mut high) = (0, char_count);
    while low < high {
        let mid = (low + high + 1) / 2;
        let candidate = format!("{}{}", prefix(mid), ELLIPSIS);
        if measure.text_width(&candidate, font_size) <= max_width {
            low = mid;
        } else {
            high = mid - 1;
        }
    }

    if low == char_count {
        return text.to_owned();
    }
    if low == 0 && measure.text_width(ELLIPSIS, font_size) > max_width {
        return String::new();
    }
    format!("{}{}", prefix(low), ELLIPSIS)
}

/// One wedge of the wheel, angles in degrees before the wheel rotation.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentPaint {
    pub index: usize,
    pub start_deg: f32,
    pub end_deg: f32,
    pub fill: Color32,
    pub label: String,
}

impl SegmentPaint {
    pub fn bisector_deg(&self) -> f32 {
        (self.start_deg + self.end_deg) / 2.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum WheelBody {
    /// No entries: a neutral disc
    Placeholder,
    Segments(Vec<SegmentPaint>),
}

/// A fully laid out frame of the wheel, ready to paint.
#[derive(Debug, Clone, PartialEq)]
pub struct WheelFrame {
    pub center: Pos2,
    pub radius: f32,
    /// Wheel rotation in degrees, clockwise
    pub rotation: f32,
    pub body: WheelBody,
    pub font_size: f32,
    pub hub_radius: f32,
    pub hub_font_size: f32,
    /// Pointer deflection in degrees, used for tick feedback
    pub pointer_tilt: f32,
}

/// Everything the pipeline reads to draw one frame.
#[derive(Debug, Clone, Copy)]
pub struct WheelInput<'a> {
    pub entries: &'a [Entry],
    pub rotation: f32,
    pub palette: &'a ColorPalette,
    pub layout: WheelLayout,
    pub pointer_tilt: f32,
}

impl WheelFrame {
    pub fn segments(&self) -> &[SegmentPaint] {
        match &self.body {
            WheelBody::Segments(segments) => segments,
            WheelBody::Placeholder => &[],
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self.body, WheelBody::Placeholder)
    }

    /// True if `pos` falls on the wheel disc
    pub fn contains(&self, pos: Pos2) -> bool {
        pos.distance(self.center) <= self.radius
    }

    /// True if `pos` falls on the central hub
    pub fn hub_contains(&self, pos: Pos2) -> bool {
        pos.distance(self.center) <= self.hub_radius
    }

    /// Screen position at `radius` along a layout angle, after rotation
    fn point_at(&self, layout_deg: f32, radius: f32) -> Pos2 {
        let angle = (layout_deg + self.rotation).to_radians();
        self.center + Vec2::angled(angle) * radius
    }

    /// Issues the frame's shapes, back to front.
    pub fn paint(&self, painter: &egui::Painter) {
        match &self.body {
            WheelBody::Placeholder => {
                painter.circle_filled(self.center, self.radius, PLACEHOLDER_FILL);
                painter.circle_stroke(
                    self.center,
                    self.radius,
                    Stroke::new(SEPARATOR_WIDTH, OUTLINE_COLOR),
                );
                self.paint_pointer(painter);
                return;
            }
            WheelBody::Segments(segments) => {
                for segment in segments {
                    self.paint_wedge(painter, segment);
                }
                for segment in segments {
                    self.paint_label(painter, segment);
                }
            }
        }

        self.paint_hub(painter);
        self.paint_pointer(painter);
    }

    fn paint_wedge(&self, painter: &egui::Painter, segment: &SegmentPaint) {
        let separator = Stroke::new(SEPARATOR_WIDTH, SEPARATOR_COLOR);
        let sweep = segment.end_deg - segment.start_deg;
        if sweep >= 360.0 {
            painter.circle(self.center, self.radius, segment.fill, separator);
            return;
        }

        let steps = (sweep / ARC_STEP_DEG).ceil().max(2.0) as usize;
        let mut points = Vec::with_capacity(steps + 2);
        points.push(self.center);
        for step in 0..=steps {
            let deg = segment.start_deg + sweep * step as f32 / steps as f32;
            points.push(self.point_at(deg, self.radius));
        }
        painter.add(Shape::convex_polygon(points, segment.fill, separator));
    }

    fn paint_label(&self, painter: &egui::Painter, segment: &SegmentPaint) {
        if segment.label.is_empty() {
            return;
        }
        let galley = painter.layout_no_wrap(
            segment.label.clone(),
            label_font(self.font_size),
            LABEL_COLOR,
        );
        let angle = (segment.bisector_deg() + self.rotation).to_radians();
        let rot = Rot2::from_angle(angle);

        // Right-aligned against the rim, vertically centred on the bisector
        let size = galley.size();
        let local = Vec2::new(self.radius - LABEL_RIM_INSET - size.x, -size.y / 2.0);
        let pos = self.center + rot * local;

        let mut shadow = TextShape::new(pos + Vec2::splat(1.0), galley.clone(), LABEL_SHADOW);
        shadow.override_text_color = Some(LABEL_SHADOW);
        shadow.angle = angle;
        painter.add(shadow);

        let mut text = TextShape::new(pos, galley, LABEL_COLOR);
        text.angle = angle;
        painter.add(text);
    }

    fn paint_hub(&self, painter: &egui::Painter) {
        painter.circle(
            self.center,
            self.hub_radius,
            Color32::WHITE,
            Stroke::new(SEPARATOR_WIDTH, OUTLINE_COLOR),
        );
        painter.text(
            self.center,
            Align2::CENTER_CENTER,
            HUB_CAPTION,
            FontId::proportional(self.hub_font_size),
            OUTLINE_COLOR,
        );
    }

    /// Fixed pointer above 12 o'clock; it does not turn with the wheel
    fn paint_pointer(&self, painter: &egui::Painter) {
        let base = Pos2::new(self.center.x, self.center.y - self.radius - 8.0);
        let rot = Rot2::from_angle(self.pointer_tilt.to_radians());
        let points = vec![
            base + rot * Vec2::new(-POINTER_HALF_WIDTH, 0.0),
            base + rot * Vec2::new(POINTER_HALF_WIDTH, 0.0),
            base + rot * Vec2::new(0.0, POINTER_LENGTH),
        ];
        painter.add(Shape::convex_polygon(
            points,
            OUTLINE_COLOR,
            Stroke::new(2.0, Color32::WHITE),
        ));
    }
}

/// Projects entries, rotation and palette into a drawn wheel.
#[derive(Debug, Default)]
pub struct WheelRenderer {
    label_cache: HashMap<(String, u32, u32), String>,
}

impl WheelRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lays out a frame centred on `center`. Pure apart from label caching.
    pub fn build_frame(
        &mut self,
        center: Pos2,
        input: &WheelInput<'_>,
        measure: &dyn TextMeasure,
    ) -> WheelFrame {
        let layout = input.layout;
        let radius = layout.radius();

        let body = if input.entries.is_empty() {
            WheelBody::Placeholder
        } else {
            let budget = layout.label_budget();
            let segments = input
                .entries
                .iter()
                .enumerate()
                .map(|(index, entry)| {
                    let start_deg = START_ANGLE_DEG + index as f32 * layout.angle_per_segment;
                    SegmentPaint {
                        index,
                        start_deg,
                        end_deg: start_deg + layout.angle_per_segment,
                        fill: input.palette.color_for(index),
                        label: self.fit_label(&entry.name, budget, layout.font_size, measure),
                    }
                })
                .collect();
            WheelBody::Segments(segments)
        };

        WheelFrame {
            center,
            radius,
            rotation: input.rotation,
            body,
            font_size: layout.font_size,
            hub_radius: layout.hub_radius,
            hub_font_size: layout.hub_font_size(),
            pointer_tilt: input.pointer_tilt,
        }
    }

    fn fit_label(
        &mut self,
        name: &str,
        budget: f32,
        font_size: f32,
        measure: &dyn TextMeasure,
    ) -> String {
        let key = (name.to_owned(), budget.to_bits(), font_size.to_bits());
        if let Some(label) = self.label_cache.get(&key) {
            return label.clone();
        }
        if self.label_cache.len() >= LABEL_CACHE_LIMIT {
            self.label_cache.clear();
        }
        let label = truncate_label(name, budget, font_size, measure);
        self.label_cache.insert(key, label.clone());
        label
    }

    /// Lays out and paints a frame centred in `rect`.
    pub fn render(
        &mut self,
        painter: &egui::Painter,
        rect: Rect,
        input: &WheelInput<'_>,
    ) -> WheelFrame {
        let frame = painter
            .ctx()
            .fonts(|fonts| self.build_frame(rect.center(), input, &FontsMeasure::new(fonts)));
        frame.paint(painter);
        frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::EntryList;
    use std::cell::Cell;

    /// Every character is `advance` pixels wide
    struct FixedAdvance {
        advance: f32,
        calls: Cell<usize>,
    }

    impl FixedAdvance {
        fn new(advance: f32) -> Self {
            Self {
                advance,
                calls: Cell::new(0),
            }
        }
    }

    impl TextMeasure for FixedAdvance {
        fn text_width(&self, text: &str, _font_size: f32) -> f32 {
            self.calls.set(self.calls.get() + 1);
            text.chars().count() as f32 * self.advance
        }
    }

    fn input<'a>(
        entries: &'a EntryList,
        palette: &'a ColorPalette,
        rotation: f32,
    ) -> WheelInput<'a> {
        WheelInput {
            entries: entries.entries(),
            rotation,
            palette,
            layout: WheelLayout::compute(entries.len(), 500.0),
            pointer_tilt: 0.0,
        }
    }

    #[test]
    fn test_short_label_is_untouched() {
        let measure = FixedAdvance::new(10.0);
        assert_eq!(truncate_label("Alice", 50.0, 20.0, &measure), "Alice");
    }

    #[test]
    fn test_long_label_fits_budget() {
        let measure = FixedAdvance::new(10.0);
        let label = truncate_label("Bartholomew the Magnificent", 100.0, 20.0, &measure);
        assert_eq!(label, "Bartholom…");
        assert!(measure.text_width(&label, 20.0) <= 100.0);
    }

    #[test]
    fn test_label_is_dropped_when_ellipsis_does_not_fit() {
        let measure = FixedAdvance::new(10.0);
        let budget = WheelLayout::compute(3, 20.0).label_budget();
        assert_eq!(budget, 0.0);
        assert_eq!(truncate_label("Alice", budget, 20.0, &measure), "");
        assert_eq!(truncate_label("Alice", 9.0, 20.0, &measure), "");
        assert_eq!(truncate_label("Alice", 10.0, 20.0, &measure), ELLIPSIS);
    }

    #[test]
    fn test_truncation_handles_multibyte_text() {
        let measure = FixedAdvance::new(10.0);
        let label = truncate_label("ÄÖÜäöüßÄÖÜäöüß", 50.0, 20.0, &measure);
        assert_eq!(label, "ÄÖÜä…");
    }

    #[test]
    fn test_truncation_uses_logarithmic_measurements() {
        let measure = FixedAdvance::new(1.0);
        let text = "x".repeat(1024);
        truncate_label(&text, 100.0, 20.0, &measure);
        assert!(measure.calls.get() <= 12, "took {} measurements", measure.calls.get());
    }

    #[test]
    fn test_truncation_is_monotonic_in_width() {
        let measure = FixedAdvance::new(7.5);
        let text = "A rather long entry name for the wheel";
        let mut previous = 0;
        for width in 0..400 {
            let label = truncate_label(text, width as f32, 20.0, &measure);
            let kept = label.trim_end_matches(ELLIPSIS).chars().count();
            assert!(kept >= previous, "width {} kept {} < {}", width, kept, previous);
            previous = kept;
        }
        assert_eq!(previous, text.chars().count());
    }

    #[test]
    fn test_segments_start_at_twelve_and_go_clockwise() {
        let entries = EntryList::from_names(["A", "B", "C", "D"]);
        let palette = ColorPalette::default();
        let mut renderer = WheelRenderer::new();
        let wheel = input(&entries, &palette, 30.0);
        let frame = renderer.build_frame(Pos2::new(250.0, 250.0), &wheel, &FixedAdvance::new(5.0));

        let segments = frame.segments();
        assert_eq!(segments.len(), 4);
        assert_eq!(segments[0].start_deg, -90.0);
        assert_eq!(segments[0].end_deg, 0.0);
        assert_eq!(segments[3].start_deg, 180.0);
        assert_eq!(segments[3].end_deg, 270.0);
        assert_eq!(frame.rotation, 30.0);
        assert_eq!(segments[2].label, "C");
    }

    #[test]
    fn test_palette_cycles_over_segments() {
        let entries = EntryList::from_names(["A", "B", "C", "D", "E"]);
        let palette = ColorPalette::new(vec![Color32::RED, Color32::BLUE]);
        let mut renderer = WheelRenderer::new();
        let wheel = input(&entries, &palette, 0.0);
        let frame = renderer.build_frame(Pos2::ZERO, &wheel, &FixedAdvance::new(5.0));

        let fills: Vec<_> = frame.segments().iter().map(|s| s.fill).collect();
        let (red, blue) = (Color32::RED, Color32::BLUE);
        assert_eq!(fills, vec![red, blue, red, blue, red]);
    }

    #[test]
    fn test_empty_entries_draw_placeholder() {
        let entries = EntryList::new();
        let palette = ColorPalette::default();
        let mut renderer = WheelRenderer::new();
        let wheel = input(&entries, &palette, 0.0);
        let frame = renderer.build_frame(Pos2::ZERO, &wheel, &FixedAdvance::new(5.0));
        assert!(frame.is_placeholder());
        assert!(frame.segments().is_empty());
    }

    #[test]
    fn test_labels_never_exceed_budget() {
        let mut entries = EntryList::new();
        entries.add(&"W".repeat(300));
        entries.add("Bo");
        let palette = ColorPalette::default();
        let wheel = input(&entries, &palette, 0.0);
        let measure = FixedAdvance::new(12.0);
        let mut renderer = WheelRenderer::new();
        let frame = renderer.build_frame(Pos2::ZERO, &wheel, &measure);

        for segment in frame.segments() {
            let width = measure.text_width(&segment.label, frame.font_size);
            assert!(width <= wheel.layout.label_budget());
        }
        assert!(frame.segments()[0].label.ends_with(ELLIPSIS));
    }

    #[test]
    fn test_hit_testing() {
        let entries = EntryList::default();
        let palette = ColorPalette::default();
        let mut renderer = WheelRenderer::new();
        let wheel = input(&entries, &palette, 0.0);
        let frame = renderer.build_frame(Pos2::new(250.0, 250.0), &wheel, &FixedAdvance::new(5.0));
        assert!(frame.hub_contains(Pos2::new(260.0, 250.0)));
        assert!(frame.contains(Pos2::new(250.0, 30.0)));
        assert!(!frame.contains(Pos2::new(0.0, 0.0)));
    }
}
