//! Rgb value object - opaque 8-bit color
//!
//! Overlay colors come from the config file as hex strings and end up as
//! GDI `COLORREF`s, so only 8-bit RGB is needed here.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Opaque RGB color
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    /// Default overlay background
    pub const CHARCOAL: Rgb = Rgb::new(30, 30, 30);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse from hex string (#RGB or #RRGGBB, leading '#' optional)
    pub fn from_hex(hex: &str) -> Result<Self, ColorParseError> {
        let hex = hex.trim().trim_start_matches('#');
        if let Some(c) = hex.chars().find(|c| !c.is_ascii()) {
            return Err(ColorParseError::InvalidHexChar(c));
        }
        match hex.len() {
            3 => {
                let mut channels = [0u8; 3];
                for (channel, c) in channels.iter_mut().zip(hex.chars()) {
                    let v = parse_hex_digit(c)?;
                    *channel = v * 16 + v;
                }
                Ok(Self::new(channels[0], channels[1], channels[2]))
            }
            6 => Ok(Self::new(
                parse_hex_byte(&hex[0..2])?,
                parse_hex_byte(&hex[2..4])?,
                parse_hex_byte(&hex[4..6])?,
            )),
            _ => Err(ColorParseError::InvalidLength(hex.len())),
        }
    }

    /// Convert to hex string (#RRGGBB)
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Pack as a Win32 COLORREF value (0x00BBGGRR)
    pub fn to_colorref(&self) -> u32 {
        (self.r as u32) | ((self.g as u32) << 8) | ((self.b as u32) << 16)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Rgb::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// Color parsing error
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ColorParseError {
    #[error("Invalid hex length: {0}")]
    InvalidLength(usize),
    #[error("Invalid hex character: {0}")]
    InvalidHexChar(char),
}

fn parse_hex_digit(c: char) -> Result<u8, ColorParseError> {
    c.to_digit(16)
        .map(|d| d as u8)
        .ok_or(ColorParseError::InvalidHexChar(c))
}

fn parse_hex_byte(s: &str) -> Result<u8, ColorParseError> {
    let mut chars = s.chars();
    let high = chars.next().map(parse_hex_digit).transpose()?.unwrap_or(0);
    let low = chars.next().map(parse_hex_digit).transpose()?.unwrap_or(0);
    Ok(high * 16 + low)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex() {
        assert_eq!(Rgb::from_hex("#1E1E1E").unwrap(), Rgb::CHARCOAL);
        assert_eq!(Rgb::from_hex("fff").unwrap(), Rgb::WHITE);
        assert_eq!(
            Rgb::from_hex("#12"),
            Err(ColorParseError::InvalidLength(2))
        );
        assert_eq!(
            Rgb::from_hex("#GG0000"),
            Err(ColorParseError::InvalidHexChar('G'))
        );
    }

    #[test]
    fn test_colorref_is_bgr() {
        assert_eq!(Rgb::new(0x11, 0x22, 0x33).to_colorref(), 0x0033_2211);
    }
}
