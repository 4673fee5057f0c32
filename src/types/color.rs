//! Color representation for IGES entities.

use std::fmt;

/// Represents the color of an IGES entity.
///
/// The directory entry color field is either one of the eight predefined
/// color numbers (0 means "no color assigned") or a negated pointer to a
/// Color Definition entity. After reading, pointers are already resolved,
/// so a custom color carries its RGB definition by value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Color {
    /// No color assigned (number 0).
    #[default]
    Default,
    /// Number 1.
    Black,
    /// Number 2.
    Red,
    /// Number 3.
    Green,
    /// Number 4.
    Blue,
    /// Number 5.
    Yellow,
    /// Number 6.
    Magenta,
    /// Number 7.
    Cyan,
    /// Number 8.
    White,
    /// Color taken from a Color Definition entity (type 314).
    Custom(ColorDefinition),
}

impl Color {
    /// Highest predefined color number.
    pub const MAX_NUMBER: i32 = 8;

    /// Map a predefined color number (0..=8) to a color.
    pub fn from_number(number: i32) -> Option<Self> {
        let color = match number {
            0 => Color::Default,
            1 => Color::Black,
            2 => Color::Red,
            3 => Color::Green,
            4 => Color::Blue,
            5 => Color::Yellow,
            6 => Color::Magenta,
            7 => Color::Cyan,
            8 => Color::White,
            _ => return None,
        };
        Some(color)
    }

    /// The predefined color number, or `None` for custom colors.
    pub fn number(&self) -> Option<i32> {
        match self {
            Color::Default => Some(0),
            Color::Black => Some(1),
            Color::Red => Some(2),
            Color::Green => Some(3),
            Color::Blue => Some(4),
            Color::Yellow => Some(5),
            Color::Magenta => Some(6),
            Color::Cyan => Some(7),
            Color::White => Some(8),
            Color::Custom(_) => None,
        }
    }

    /// Build a color from 8-bit channels.
    ///
    /// Channels matching one of the predefined colors map onto it; anything
    /// else becomes a custom color definition.
    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        match (r, g, b) {
            (0, 0, 0) => Color::Black,
            (255, 0, 0) => Color::Red,
            (0, 255, 0) => Color::Green,
            (0, 0, 255) => Color::Blue,
            (255, 255, 0) => Color::Yellow,
            (255, 0, 255) => Color::Magenta,
            (0, 255, 255) => Color::Cyan,
            (255, 255, 255) => Color::White,
            _ => Color::Custom(ColorDefinition::from_rgb(r, g, b)),
        }
    }

    /// 8-bit RGB channels, or `None` when no color is assigned.
    pub fn rgb(&self) -> Option<(u8, u8, u8)> {
        match self {
            Color::Default => None,
            Color::Black => Some((0, 0, 0)),
            Color::Red => Some((255, 0, 0)),
            Color::Green => Some((0, 255, 0)),
            Color::Blue => Some((0, 0, 255)),
            Color::Yellow => Some((255, 255, 0)),
            Color::Magenta => Some((255, 0, 255)),
            Color::Cyan => Some((0, 255, 255)),
            Color::White => Some((255, 255, 255)),
            Color::Custom(definition) => Some(definition.to_rgb()),
        }
    }

    /// Whether the color needs a Color Definition entity in the file.
    pub fn is_custom(&self) -> bool {
        matches!(self, Color::Custom(_))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Custom(definition) => {
                let (r, g, b) = definition.to_rgb();
                write!(f, "RGB({}, {}, {})", r, g, b)
            }
            other => write!(f, "Color{}", other.number().unwrap_or_default()),
        }
    }
}

/// RGB color taken from a Color Definition entity.
///
/// Intensities are kept in `[0, 1]`; the file stores them as percentages.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ColorDefinition {
    /// Red intensity.
    pub red: f64,
    /// Green intensity.
    pub green: f64,
    /// Blue intensity.
    pub blue: f64,
    /// Optional color name.
    pub name: Option<String>,
}

impl ColorDefinition {
    /// Create a definition from intensities in `[0, 1]`.
    pub fn new(red: f64, green: f64, blue: f64) -> Self {
        ColorDefinition {
            red,
            green,
            blue,
            name: None,
        }
    }

    /// Create a definition from 8-bit channels.
    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r as f64 / 255.0, g as f64 / 255.0, b as f64 / 255.0)
    }

    /// Convert to 8-bit channels.
    pub fn to_rgb(&self) -> (u8, u8, u8) {
        (
            intensity_to_byte(self.red),
            intensity_to_byte(self.green),
            intensity_to_byte(self.blue),
        )
    }
}

fn intensity_to_byte(value: f64) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}
