/// RGB colors and hex string parsing
use nom::{
    bytes::complete::{tag, take_while_m_n},
    combinator::{all_consuming, map_res},
    sequence::{preceded, tuple},
    IResult,
};
use std::fmt;

use crate::error::Error;

/// An opaque 8-bit-per-channel color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a `#rrggbb` hex string. The leading `#` is required and the
    /// whole input must be consumed.
    pub fn parse(input: &str) -> Result<Self, Error> {
        match all_consuming(hex_color)(input) {
            Ok((_, color)) => Ok(color),
            Err(_) => Err(Error::InvalidColor(input.to_string())),
        }
    }

    /// Lowercase `#rrggbb` form, round-trips through [`Rgb::parse`].
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Scale all channels by an intensity in `[0, 1]`, used for diffuse
    /// shading in the renderers.
    pub fn scale(&self, intensity: f32) -> Rgb {
        let scale = |c: u8| ((c as f32 * intensity).min(255.0).max(0.0)) as u8;
        Rgb::new(scale(self.r), scale(self.g), scale(self.b))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl std::str::FromStr for Rgb {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn hex_color(input: &str) -> IResult<&str, Rgb> {
    let (input, (r, g, b)) = preceded(tag("#"), tuple((hex_byte, hex_byte, hex_byte)))(input)?;
    Ok((input, Rgb::new(r, g, b)))
}

fn hex_byte(input: &str) -> IResult<&str, u8> {
    map_res(
        take_while_m_n(2, 2, |c: char| c.is_ascii_hexdigit()),
        |s: &str| u8::from_str_radix(s, 16),
    )(input)
}

/// A named single-click color shortcut
pub struct ColorPreset {
    pub name: &'static str,
    pub value: Rgb,
}

/// The five fixed preset buttons of the controls panel
pub const COLOR_PRESETS: &[ColorPreset] = &[
    ColorPreset {
        name: "Green",
        value: Rgb::new(0x00, 0xff, 0x00),
    },
    ColorPreset {
        name: "Blue",
        value: Rgb::new(0x00, 0x88, 0xff),
    },
    ColorPreset {
        name: "Red",
        value: Rgb::new(0xff, 0x00, 0x00),
    },
    ColorPreset {
        name: "Yellow",
        value: Rgb::new(0xff, 0xff, 0x00),
    },
    ColorPreset {
        name: "Purple",
        value: Rgb::new(0x88, 0x00, 0xff),
    },
];

/// Default mesh color (the Green preset)
pub const DEFAULT_COLOR: Rgb = Rgb::new(0x00, 0xff, 0x00);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        assert_eq!(Rgb::parse("#00ff00"), Ok(Rgb::new(0, 255, 0)));
        assert_eq!(Rgb::parse("#0088ff"), Ok(Rgb::new(0, 136, 255)));
        assert_eq!(Rgb::parse("#FFFFFF"), Ok(Rgb::new(255, 255, 255)));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(Rgb::parse("00ff00").is_err());
        assert!(Rgb::parse("#00ff0").is_err());
        assert!(Rgb::parse("#00ff000").is_err());
        assert!(Rgb::parse("#00gg00").is_err());
        assert!(Rgb::parse("").is_err());
    }

    #[test]
    fn test_hex_round_trip() {
        for preset in COLOR_PRESETS {
            let hex = preset.value.to_hex();
            assert_eq!(Rgb::parse(&hex), Ok(preset.value));
        }
    }

    #[test]
    fn test_scale_clamps() {
        let c = Rgb::new(200, 100, 0);
        assert_eq!(c.scale(0.5), Rgb::new(100, 50, 0));
        assert_eq!(c.scale(2.0), Rgb::new(255, 200, 0));
        assert_eq!(c.scale(-1.0), Rgb::new(0, 0, 0));
    }
}
