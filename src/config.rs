use bon::Builder;

use crate::geometry::Padding;

/// Color representation for gauge elements
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0x00, 0x00, 0x00);
    pub const WHITE: Color = Color::new(0xff, 0xff, 0xff);
    pub const TRANSPARENT: Color = Color::rgba(0x00, 0x00, 0x00, 0x00);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 0xff)
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn as_tuple(self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }

    pub fn alpha(self) -> f32 {
        self.a as f32 / 255.0
    }

    /// Parses `#rrggbb` or `#aarrggbb`.
    pub fn parse_hex(value: &str) -> Option<Self> {
        let hex = value.strip_prefix('#').unwrap_or(value);
        let byte = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
        match hex.len() {
            6 => Some(Self::new(byte(0)?, byte(2)?, byte(4)?)),
            8 => Some(Self::rgba(byte(2)?, byte(4)?, byte(6)?, byte(0)?)),
            _ => None,
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::TRANSPARENT
    }
}

/// Style of a single speedometer, fixed at construction.
///
/// Defaults mirror an unstyled widget: zero stroke, invisible zero-size text
/// and the needle resting at zero.
#[derive(Debug, Clone, Builder)]
pub struct SpeedViewConfig {
    /// Width used when sizing the widget and insetting the dial.
    #[builder(default = 0.0)]
    pub stroke_width: f32,
    #[builder(default = Color::TRANSPARENT)]
    pub text_color: Color,
    #[builder(default = 0.0)]
    pub text_size: f32,
    #[builder(default = 0)]
    pub initial_progress: i32,
    #[builder(default)]
    pub padding: Padding,
}

impl Default for SpeedViewConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Configuration for the application window hosting the widget
#[derive(Debug, Clone, Builder)]
pub struct WindowConfig {
    #[builder(default = "Speedometer".to_string())]
    pub title: String,
    /// Upper bound offered to the widget on each axis when measuring.
    #[builder(default = 800)]
    pub max_width: i32,
    #[builder(default = 800)]
    pub max_height: i32,
    #[builder(default = 60.0)]
    pub max_framerate: f64,
    #[builder(default = Color::WHITE)]
    pub background_color: Color,
    #[builder(default = true)]
    pub resizable: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_unstyled_widget() {
        let config = SpeedViewConfig::default();
        assert_eq!(config.stroke_width, 0.0);
        assert_eq!(config.text_color, Color::TRANSPARENT);
        assert_eq!(config.text_size, 0.0);
        assert_eq!(config.initial_progress, 0);
        assert_eq!(config.padding, Padding::default());
    }

    #[test]
    fn builder_overrides() {
        let config = SpeedViewConfig::builder()
            .stroke_width(8.0)
            .text_color(Color::BLACK)
            .text_size(40.0)
            .initial_progress(30)
            .padding(Padding::uniform(4.0))
            .build();
        assert_eq!(config.stroke_width, 8.0);
        assert_eq!(config.text_color, Color::BLACK);
        assert_eq!(config.initial_progress, 30);
        assert_eq!(config.padding.left, 4.0);
    }

    #[test]
    fn parse_hex_colors() {
        assert_eq!(Color::parse_hex("#ff0080"), Some(Color::new(0xff, 0x00, 0x80)));
        assert_eq!(
            Color::parse_hex("80112233"),
            Some(Color::rgba(0x11, 0x22, 0x33, 0x80))
        );
        assert_eq!(Color::parse_hex("#12345"), None);
        assert_eq!(Color::parse_hex("#gg0000"), None);
    }
}
