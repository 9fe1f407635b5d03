//! Color configuration for the TUI.

use ratatui::style::Color;
use serde::{de, Deserialize, Deserializer};

/// Configuration for all TUI colors.
///
/// `magnitude1` .. `magnitude10plus` fill the magnitude badge of each row,
/// indexed by the magnitude color bucket.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ColorConfig {
    #[serde(deserialize_with = "deserialize_color")]
    pub active_border: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub selection_bg: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub selection_fg: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub location_offset: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub location_primary: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub date_time: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub magnitude_text: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub status_fg: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub status_bg: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub magnitude1: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub magnitude2: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub magnitude3: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub magnitude4: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub magnitude5: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub magnitude6: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub magnitude7: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub magnitude8: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub magnitude9: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub magnitude10plus: Color,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            active_border: Color::Cyan,
            selection_bg: Color::DarkGray,
            selection_fg: Color::White,
            location_offset: Color::Gray,
            location_primary: Color::White,
            date_time: Color::Gray,
            magnitude_text: Color::White,
            status_fg: Color::White,
            status_bg: Color::DarkGray,
            magnitude1: Color::Rgb(0x4A, 0x7B, 0xA7),
            magnitude2: Color::Rgb(0x04, 0xB4, 0xB3),
            magnitude3: Color::Rgb(0x10, 0xCA, 0xC9),
            magnitude4: Color::Rgb(0xF5, 0xA6, 0x23),
            magnitude5: Color::Rgb(0xFF, 0x7D, 0x50),
            magnitude6: Color::Rgb(0xFC, 0x66, 0x44),
            magnitude7: Color::Rgb(0xE7, 0x5F, 0x40),
            magnitude8: Color::Rgb(0xE1, 0x3A, 0x20),
            magnitude9: Color::Rgb(0xD9, 0x32, 0x18),
            magnitude10plus: Color::Rgb(0xC0, 0x38, 0x23),
        }
    }
}

impl ColorConfig {
    /// Badge color for a bucket from `display::magnitude_color_bucket`.
    pub fn magnitude_color(&self, bucket: u8) -> Color {
        match bucket {
            0 | 1 => self.magnitude1,
            2 => self.magnitude2,
            3 => self.magnitude3,
            4 => self.magnitude4,
            5 => self.magnitude5,
            6 => self.magnitude6,
            7 => self.magnitude7,
            8 => self.magnitude8,
            9 => self.magnitude9,
            _ => self.magnitude10plus,
        }
    }
}

/// Custom deserializer for Color that supports named colors and hex codes.
fn deserialize_color<'de, D>(deserializer: D) -> Result<Color, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_color_string(&s).map_err(de::Error::custom)
}

/// Parse a color string into a ratatui Color.
///
/// Supports:
/// - Named colors: "Black", "Red", "Green", "Yellow", "Blue", "Magenta", "Cyan", "Gray",
///   "DarkGray", "LightRed", "LightGreen", "LightYellow", "LightBlue", "LightMagenta",
///   "LightCyan", "White", "Reset"
/// - Hex colors: "#RRGGBB" or "#RGB"
pub fn parse_color_string(s: &str) -> Result<Color, String> {
    let s = s.trim();

    if s.starts_with('#') {
        return parse_hex_color(s);
    }

    match s.to_lowercase().as_str() {
        "black" => Ok(Color::Black),
        "red" => Ok(Color::Red),
        "green" => Ok(Color::Green),
        "yellow" => Ok(Color::Yellow),
        "blue" => Ok(Color::Blue),
        "magenta" => Ok(Color::Magenta),
        "cyan" => Ok(Color::Cyan),
        "gray" | "grey" => Ok(Color::Gray),
        "darkgray" | "darkgrey" => Ok(Color::DarkGray),
        "lightred" => Ok(Color::LightRed),
        "lightgreen" => Ok(Color::LightGreen),
        "lightyellow" => Ok(Color::LightYellow),
        "lightblue" => Ok(Color::LightBlue),
        "lightmagenta" => Ok(Color::LightMagenta),
        "lightcyan" => Ok(Color::LightCyan),
        "white" => Ok(Color::White),
        "reset" => Ok(Color::Reset),
        _ => Err(format!("Unknown color: {}", s)),
    }
}

/// Parse "#RRGGBB" or "#RGB".
fn parse_hex_color(s: &str) -> Result<Color, String> {
    let hex = s.trim_start_matches('#');
    if !hex.is_ascii() {
        return Err(format!("Invalid hex color: {}", s));
    }

    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&hex[range], 16).map_err(|_| format!("Invalid hex color: {}", s))
    };

    match hex.len() {
        6 => Ok(Color::Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
        // #RGB expands each digit: F -> FF
        3 => Ok(Color::Rgb(
            channel(0..1)? * 17,
            channel(1..2)? * 17,
            channel(2..3)? * 17,
        )),
        _ => Err(format!("Invalid hex color format: {}", s)),
    }
}
