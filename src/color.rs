// Simple RGB color. Palette entries carry no alpha; every draw call
// supplies its own opacity.

use serde::Deserialize;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(from = "[u8; 3]")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const ELECTRIC_BLUE: Color = Color::rgb(0, 217, 255);
    pub const PLASMA_VIOLET: Color = Color::rgb(157, 78, 221);
    pub const NEON_GREEN: Color = Color::rgb(57, 255, 20);
    pub const YELLOW: Color = Color::rgb(250, 204, 21);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const SILVER: Color = Color::rgb(204, 204, 204);
    pub const GREY: Color = Color::rgb(153, 153, 153);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Color {
        Color { r, g, b }
    }

    // Canvas fill/stroke style string, alpha clamped to [0, 1]
    pub fn to_css_rgba(&self, alpha: f64) -> String {
        format!(
            "rgba({}, {}, {}, {})",
            self.r,
            self.g,
            self.b,
            alpha.max(0.0).min(1.0)
        )
    }
}

impl From<[u8; 3]> for Color {
    fn from(rgb: [u8; 3]) -> Color {
        Color::rgb(rgb[0], rgb[1], rgb[2])
    }
}

/// Greyscale palette of the anchored field.
pub fn grey_palette() -> Vec<Color> {
    vec![Color::WHITE, Color::SILVER, Color::GREY]
}

pub fn default_palette() -> Vec<Color> {
    vec![
        Color::ELECTRIC_BLUE,
        Color::PLASMA_VIOLET,
        Color::NEON_GREEN,
        Color::YELLOW,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_from_byte_triple() {
        assert_eq!(Color::from([0, 217, 255]), Color::ELECTRIC_BLUE);
    }

    #[test]
    fn css_string_clamps_alpha() {
        assert_eq!(Color::NEON_GREEN.to_css_rgba(0.25), "rgba(57, 255, 20, 0.25)");
        assert_eq!(Color::YELLOW.to_css_rgba(3.0), "rgba(250, 204, 21, 1)");
    }
}
