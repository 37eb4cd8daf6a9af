//! Conversion of RGB colors into the bridge color addressing.
//!
//! The bridge knows only a hue wheel and a separate white mode, so every color either
//! becomes a hue byte or falls back to white light with a reduced brightness.

use palette::{FromColor, Hsl, Srgb};

use crate::proto::types::{Percent, Rgb};

/// Hue offset between the RGB wheel origin (red) and the bridge wheel origin (violet).
const HUE_ROTATION: f32 = 115.0 / 360.0;
/// Colors with a smaller saturation look white on the lamps.
pub const WHITE_SATURATION_THRESHOLD: f32 = 0.3;
/// Colors with a higher luminance look white on the lamps.
pub const WHITE_LUMINANCE_THRESHOLD: f32 = 0.75;
/// White light is brighter than a colored one at the same level.
pub const WHITE_BRIGHTNESS_DAMPING: f32 = 0.65;

/// Hue, luminance and saturation of a color, all in `[0, 1]`.
#[derive(PartialEq, Clone, Copy, Debug)]
pub struct Hls {
    pub hue: f32,
    pub luminance: f32,
    pub saturation: f32,
}

impl From<Rgb> for Hls {
    fn from(rgb: Rgb) -> Self {
        let hsl: Hsl = Hsl::from_color(Srgb::new(rgb.red, rgb.green, rgb.blue));
        Self {
            hue: hsl.hue.into_positive_degrees() / 360.0,
            luminance: hsl.lightness,
            saturation: hsl.saturation,
        }
    }
}

/// The way the bridge should render a color.
#[derive(PartialEq, Clone, Copy, Debug)]
pub enum BridgeColor {
    /// White light with the given brightness.
    White { brightness: Percent },
    /// Colored light with the given position on the bridge wheel.
    Color { hue: Percent, brightness: Percent },
}

impl From<Rgb> for BridgeColor {
    fn from(rgb: Rgb) -> Self {
        rgb_to_bridge_params(rgb)
    }
}

/// Maps a non-negative RGB wheel hue onto the bridge wheel, which is rotated and runs in the
/// opposite direction.
pub fn bridge_hue(hue: f32) -> Percent {
    let rotated = libm::fmodf(hue + HUE_ROTATION, 1.0);
    Percent::saturating(1.0 - rotated)
}

/// Decides how the bridge should render the given color.
pub fn rgb_to_bridge_params(rgb: Rgb) -> BridgeColor {
    let hls = Hls::from(rgb);
    if hls.saturation < WHITE_SATURATION_THRESHOLD || hls.luminance > WHITE_LUMINANCE_THRESHOLD {
        BridgeColor::White {
            brightness: Percent::saturating(hls.luminance * WHITE_BRIGHTNESS_DAMPING),
        }
    } else {
        BridgeColor::Color {
            hue: bridge_hue(hls.hue),
            brightness: Percent::FULL,
        }
    }
}
