// src/color.rs

//! Defines the `Rgba` color value handed to display surfaces.

use serde::{Deserialize, Serialize};

/// RGBA color in 32-bit format (8 bits per channel).
///
/// Surfaces are free to reduce this to whatever their panel supports; a
/// monochrome OLED driver will typically treat any non-black value as "on".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::opaque(0, 0, 0);
    pub const WHITE: Rgba = Rgba::opaque(255, 255, 255);

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
}

impl Default for Rgba {
    /// Background black.
    fn default() -> Self {
        Rgba::BLACK
    }
}
