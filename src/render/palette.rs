//! Marker colors and the background-aware palette

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RenderError;

/// RGB color (0-255 per channel)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };
    pub const WHITE: Rgb = Rgb { r: 255, g: 255, b: 255 };

    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Grey of uniform intensity (background shorthand).
    pub fn grey(v: u8) -> Self {
        Self { r: v, g: v, b: v }
    }

    pub fn to_bytes(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Summed channel luminance, 0..=765.
    pub fn channel_sum(self) -> u32 {
        self.r as u32 + self.g as u32 + self.b as u32
    }
}

/// The closed set of marker color tags the palette recognizes.
///
/// Point providers tag each candidate position with one of these names;
/// anything else is an [`RenderError::InvalidColorKind`] at draw time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorTag {
    Green,
    Orange,
    Red,
    Blue,
    /// Outline/contrast color, resolved against the background ("black" on
    /// the wire, but renders white on dark backgrounds).
    Outline,
}

impl FromStr for ColorTag {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "green" => Ok(ColorTag::Green),
            "orange" => Ok(ColorTag::Orange),
            "red" => Ok(ColorTag::Red),
            "blue" => Ok(ColorTag::Blue),
            "black" => Ok(ColorTag::Outline),
            other => Err(RenderError::InvalidColorKind(other.to_string())),
        }
    }
}

/// Fixed marker palette. Only the outline entry varies: it is computed from
/// the background's summed luminance so markers stay visible on both light
/// and dark backgrounds.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    outline: Rgb,
}

impl Palette {
    /// Boundary for the light/dark background decision: sum > 3 * 128.
    const LUMINANCE_THRESHOLD: u32 = 3 * 128;

    pub fn for_background(background: Rgb) -> Self {
        let outline = if background.channel_sum() > Self::LUMINANCE_THRESHOLD {
            Rgb::BLACK
        } else {
            Rgb::WHITE
        };
        Self { outline }
    }

    /// Resolve a raw color tag to its RGB value.
    pub fn resolve(&self, tag: &str) -> Result<Rgb, RenderError> {
        Ok(self.color(tag.parse()?))
    }

    pub fn color(&self, tag: ColorTag) -> Rgb {
        match tag {
            ColorTag::Green => Rgb::new(46, 111, 22),
            ColorTag::Orange => Rgb::new(235, 106, 45),
            ColorTag::Red => Rgb::new(229, 32, 39),
            ColorTag::Blue => Rgb::new(32, 70, 246),
            ColorTag::Outline => self.outline,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_values() {
        let palette = Palette::for_background(Rgb::WHITE);
        assert_eq!(palette.color(ColorTag::Green), Rgb::new(46, 111, 22));
        assert_eq!(palette.color(ColorTag::Orange), Rgb::new(235, 106, 45));
        assert_eq!(palette.color(ColorTag::Red), Rgb::new(229, 32, 39));
        assert_eq!(palette.color(ColorTag::Blue), Rgb::new(32, 70, 246));
    }

    #[test]
    fn test_outline_on_light_background() {
        let palette = Palette::for_background(Rgb::grey(129));
        assert_eq!(palette.resolve("black").unwrap(), Rgb::BLACK);
    }

    #[test]
    fn test_outline_on_dark_background() {
        let palette = Palette::for_background(Rgb::grey(126));
        assert_eq!(palette.resolve("black").unwrap(), Rgb::WHITE);
    }

    #[test]
    fn test_outline_boundary() {
        // sum == 384 is not "light"
        assert_eq!(
            Palette::for_background(Rgb::grey(128)).resolve("black").unwrap(),
            Rgb::WHITE
        );
        assert_eq!(
            Palette::for_background(Rgb::new(128, 128, 129)).resolve("black").unwrap(),
            Rgb::BLACK
        );
    }

    #[test]
    fn test_unknown_tag() {
        let palette = Palette::for_background(Rgb::WHITE);
        match palette.resolve("chartreuse") {
            Err(RenderError::InvalidColorKind(tag)) => assert_eq!(tag, "chartreuse"),
            other => panic!("expected InvalidColorKind, got {:?}", other.map(|_| ())),
        }
    }
}
