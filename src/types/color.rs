//! Defines [`HexColor`], the `#RRGGBB` colour type used in configuration, chart styling
//! and the dashboard's cell styles.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An opaque sRGB colour, written as `#RRGGBB` in configuration files.
///
/// # Examples
///
/// ```
/// use microclima::HexColor;
///
/// let color = HexColor::parse("#90BE6D").unwrap();
/// assert_eq!(color, HexColor::new(0x90, 0xBE, 0x6D));
/// assert_eq!(color.to_string(), "#90BE6D");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor(pub u8, pub u8, pub u8);

impl HexColor {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self(r, g, b)
    }

    /// Parses `#RRGGBB` (the leading `#` is optional, hex digits are case-insensitive).
    pub fn parse(text: &str) -> Option<Self> {
        let hex = text.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Self(channel(0)?, channel(2)?, channel(4)?))
    }

    pub fn rgb(self) -> (u8, u8, u8) {
        (self.0, self.1, self.2)
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

impl TryFrom<String> for HexColor {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value).ok_or_else(|| format!("'{value}' is not a #RRGGBB colour"))
    }
}

impl From<HexColor> for String {
    fn from(color: HexColor) -> Self {
        color.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_variants() {
        assert_eq!(HexColor::parse("ff9671"), Some(HexColor(0xFF, 0x96, 0x71)));
        assert_eq!(HexColor::parse(" #005EFF "), Some(HexColor(0x00, 0x5E, 0xFF)));
        assert_eq!(HexColor::parse("#12345"), None);
        assert_eq!(HexColor::parse("#GG0000"), None);
        assert_eq!(HexColor::parse("#ééé"), None);
    }

    #[test]
    fn test_serde_uses_hex_strings() {
        let color: HexColor = serde_json::from_str("\"#A5A5A5\"").unwrap();
        assert_eq!(color, HexColor(0xA5, 0xA5, 0xA5));
        assert_eq!(serde_json::to_string(&color).unwrap(), "\"#A5A5A5\"");
        assert!(serde_json::from_str::<HexColor>("\"blue\"").is_err());
    }
}
