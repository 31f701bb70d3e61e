//! Colour tags attached to notes and the hex codec behind custom colours.
use std::{fmt, str::FromStr};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::NotesError;

/// An sRGB colour with one byte per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Fallback for a custom tag whose hex payload is missing or unusable.
    pub const BLACK: Rgb = Rgb::new(0x00, 0x00, 0x00);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }

    /// Decodes `RRGGBB` or `#RRGGBB`. Returns `None` for anything else.
    pub fn from_hex(value: &str) -> Option<Self> {
        let digits = value.strip_prefix('#').unwrap_or(value);
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }

        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&digits[range], 16).ok();
        Some(Rgb {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        })
    }

    /// Encodes as six uppercase hex digits without a leading `#`.
    pub fn to_hex(&self) -> String {
        format!("{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Builds a colour from unit-range channels (0.0 to 1.0), clamping out-of-range input.
    pub fn from_components(red: f64, green: f64, blue: f64) -> Self {
        let scale = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        Rgb {
            r: scale(red),
            g: scale(green),
            b: scale(blue),
        }
    }

    /// The channels as unit-range floats.
    pub fn components(&self) -> (f64, f64, f64) {
        (
            f64::from(self.r) / 255.0,
            f64::from(self.g) / 255.0,
            f64::from(self.b) / 255.0,
        )
    }
}

impl FromStr for Rgb {
    type Err = NotesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Rgb::from_hex(s).ok_or_else(|| NotesError::InvalidColor {
            value: s.to_string(),
        })
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.to_hex())
    }
}

/// The payload-free name of a colour tag, as stored in `colorTag` and typed on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ColorKind {
    None,
    Red,
    Orange,
    Yellow,
    Green,
    Blue,
    Purple,
    Pink,
    Custom,
}

/// A note's colour tag. Only `Custom` carries a hex payload.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum ColorTag {
    #[default]
    None,
    Red,
    Orange,
    Yellow,
    Green,
    Blue,
    Purple,
    Pink,
    /// Hex payload as stored; decoded when the colour is rendered.
    Custom(Option<String>),
}

impl ColorTag {
    /// Builds a tag from its stored parts. `hex` is dropped unless `kind` is custom.
    pub fn from_parts(kind: ColorKind, hex: Option<String>) -> Self {
        match kind {
            ColorKind::None => ColorTag::None,
            ColorKind::Red => ColorTag::Red,
            ColorKind::Orange => ColorTag::Orange,
            ColorKind::Yellow => ColorTag::Yellow,
            ColorKind::Green => ColorTag::Green,
            ColorKind::Blue => ColorTag::Blue,
            ColorKind::Purple => ColorTag::Purple,
            ColorKind::Pink => ColorTag::Pink,
            ColorKind::Custom => ColorTag::Custom(hex),
        }
    }

    /// A custom tag holding the canonical hex of `color`.
    pub fn custom(color: Rgb) -> Self {
        ColorTag::Custom(Some(color.to_hex()))
    }

    pub fn kind(&self) -> ColorKind {
        match self {
            ColorTag::None => ColorKind::None,
            ColorTag::Red => ColorKind::Red,
            ColorTag::Orange => ColorKind::Orange,
            ColorTag::Yellow => ColorKind::Yellow,
            ColorTag::Green => ColorKind::Green,
            ColorTag::Blue => ColorKind::Blue,
            ColorTag::Purple => ColorKind::Purple,
            ColorTag::Pink => ColorKind::Pink,
            ColorTag::Custom(_) => ColorKind::Custom,
        }
    }

    pub fn custom_hex(&self) -> Option<&str> {
        match self {
            ColorTag::Custom(hex) => hex.as_deref(),
            _ => None,
        }
    }

    /// Human-readable label, also searched by the note filter.
    pub fn label(&self) -> &'static str {
        match self {
            ColorTag::None => "None",
            ColorTag::Red => "Red",
            ColorTag::Orange => "Orange",
            ColorTag::Yellow => "Yellow",
            ColorTag::Green => "Green",
            ColorTag::Blue => "Blue",
            ColorTag::Purple => "Purple",
            ColorTag::Pink => "Pink",
            ColorTag::Custom(_) => "Custom",
        }
    }

    /// Display colour. Custom tags decode their payload, falling back to black.
    pub fn color(&self) -> Rgb {
        match self {
            ColorTag::None => Rgb::new(0x8E, 0x8E, 0x93),
            ColorTag::Red => Rgb::new(0xFF, 0x3B, 0x30),
            ColorTag::Orange => Rgb::new(0xFF, 0x95, 0x00),
            ColorTag::Yellow => Rgb::new(0xFF, 0xCC, 0x00),
            ColorTag::Green => Rgb::new(0x34, 0xC7, 0x59),
            ColorTag::Blue => Rgb::new(0x00, 0x7A, 0xFF),
            ColorTag::Purple => Rgb::new(0xAF, 0x52, 0xDE),
            ColorTag::Pink => Rgb::new(0xFF, 0x2D, 0x55),
            ColorTag::Custom(hex) => hex
                .as_deref()
                .and_then(Rgb::from_hex)
                .unwrap_or(Rgb::BLACK),
        }
    }

    /// Every tag except `Custom`, in picker order.
    pub fn all_fixed() -> [ColorTag; 8] {
        [
            ColorTag::None,
            ColorTag::Red,
            ColorTag::Orange,
            ColorTag::Yellow,
            ColorTag::Green,
            ColorTag::Blue,
            ColorTag::Purple,
            ColorTag::Pink,
        ]
    }
}

impl fmt::Display for ColorTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
