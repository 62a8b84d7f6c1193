use crate::error::PaletteError;
use egui::Color32;
use egui::ecolor::HexColor;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub const DEFAULT_COLORS: [Color32; 16] = [
    Color32::from_rgb(0xFF, 0x6B, 0x6B),
    Color32::from_rgb(0x4E, 0xCD, 0xC4),
    Color32::from_rgb(0x45, 0xB7, 0xD1),
    Color32::from_rgb(0xFF, 0xA0, 0x7A),
    Color32::from_rgb(0x98, 0xD8, 0xC8),
    Color32::from_rgb(0xF7, 0xDC, 0x6F),
    Color32::from_rgb(0xBB, 0x8F, 0xCE),
    Color32::from_rgb(0x85, 0xC1, 0xE2),
    Color32::from_rgb(0xF8, 0xB7, 0x39),
    Color32::from_rgb(0x52, 0xB7, 0x88),
    Color32::from_rgb(0xFF, 0x8F, 0xAB),
    Color32::from_rgb(0x6C, 0x5C, 0xE7),
    Color32::from_rgb(0xA8, 0xE6, 0xCF),
    Color32::from_rgb(0xFF, 0xD9, 0x3D),
    Color32::from_rgb(0x6B, 0xCF, 0x7F),
    Color32::from_rgb(0x95, 0xA5, 0xA6),
];

/// Ordered segment colours, reused cyclically when there are more entries
/// than colours.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorPalette {
    colors: Vec<Color32>,
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self {
            colors: DEFAULT_COLORS.to_vec(),
        }
    }
}

impl ColorPalette {
    /// Builds a palette, falling back to the default set when `colors` is empty
    pub fn new(colors: Vec<Color32>) -> Self {
        if colors.is_empty() {
            Self::default()
        } else {
            Self { colors }
        }
    }

    pub fn from_hex<S: AsRef<str>>(values: &[S]) -> Result<Self, PaletteError> {
        let colors = values
            .iter()
            .map(|value| parse_hex(value.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(colors))
    }

    pub fn to_hex(&self) -> Vec<String> {
        self.colors.iter().map(|c| format_hex(*c)).collect()
    }

    pub fn colors(&self) -> &[Color32] {
        &self.colors
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Colour for segment `index`, wrapping around the palette
    pub fn color_for(&self, index: usize) -> Color32 {
        if self.colors.is_empty() {
            return DEFAULT_COLORS[index % DEFAULT_COLORS.len()];
        }
        self.colors[index % self.colors.len()]
    }

    pub fn set(&mut self, index: usize, color: Color32) {
        if let Some(slot) = self.colors.get_mut(index) {
            *slot = color;
        }
    }

    pub fn push(&mut self, color: Color32) {
        self.colors.push(color);
    }

    /// Removes a colour, never leaving the palette empty
    pub fn remove(&mut self, index: usize) {
        if self.colors.len() > 1 && index < self.colors.len() {
            self.colors.remove(index);
        }
    }
}

/// Parses a CSS hex colour such as `#FF6B6B`
pub fn parse_hex(value: &str) -> Result<Color32, PaletteError> {
    Color32::from_hex(value.trim()).map_err(|reason| PaletteError::InvalidHex {
        value: value.to_owned(),
        reason,
    })
}

/// Formats as upper-case `#RRGGBB`, dropping alpha
pub fn format_hex(color: Color32) -> String {
    HexColor::Hex6(color).to_string().to_uppercase()
}

impl Serialize for ColorPalette {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_hex().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ColorPalette {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let values = Vec::<String>::deserialize(deserializer)?;
        Self::from_hex(&values).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_colors_cycle_past_palette_length() {
        let palette = ColorPalette::new(vec![Color32::RED, Color32::GREEN, Color32::BLUE]);
        assert_eq!(palette.color_for(0), Color32::RED);
        assert_eq!(palette.color_for(3), Color32::RED);
        assert_eq!(palette.color_for(7), Color32::GREEN);
    }

    #[test]
    fn test_empty_palette_falls_back_to_default() {
        let palette = ColorPalette::new(Vec::new());
        assert_eq!(palette.len(), DEFAULT_COLORS.len());
        assert_eq!(palette.color_for(16), DEFAULT_COLORS[0]);
    }

    #[test]
    fn test_hex_parsing() {
        assert_eq!(parse_hex("#FF6B6B").unwrap(), DEFAULT_COLORS[0]);
        assert_eq!(parse_hex("#4ecdc4").unwrap(), DEFAULT_COLORS[1]);
        assert_eq!(parse_hex(" #F00 ").unwrap(), Color32::RED);
        assert!(parse_hex("FF6B6B").is_err());
        assert!(parse_hex("#FF6B6").is_err());
        assert!(matches!(
            parse_hex("#GG6B6B"),
            Err(PaletteError::InvalidHex { ref value, .. }) if value == "#GG6B6B"
        ));
        assert_eq!(format_hex(DEFAULT_COLORS[2]), "#45B7D1");
    }

    #[test]
    fn test_remove_keeps_one_colour() {
        let mut palette = ColorPalette::new(vec![Color32::RED]);
        palette.remove(0);
        assert_eq!(palette.len(), 1);
    }

    #[test]
    fn test_serde_uses_hex_strings() {
        let palette = ColorPalette::new(vec![Color32::from_rgb(1, 2, 3)]);
        let json = serde_json::to_string(&palette).unwrap();
        assert_eq!(json, r##"["#010203"]"##);
        let back: ColorPalette = serde_json::from_str(&json).unwrap();
        assert_eq!(back, palette);
        assert!(serde_json::from_str::<ColorPalette>(r#"["red"]"#).is_err());
    }
}
