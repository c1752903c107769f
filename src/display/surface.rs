// src/display/surface.rs
//! DisplaySurface trait - the minimal capability contract the engine draws onto.
//!
//! The engine keeps no framebuffer of its own. Each frame it clears the
//! surface, writes pixels through `set_pixel`, and asks the surface to
//! `flush`. Bus protocol, pixel format conversion and flush timing all belong
//! to the implementation.
//!
//! ## Contract
//! - `clear()` resets the drawable area to the panel's "off" state.
//! - `set_pixel()` must silently ignore out-of-range coordinates. The
//!   rasterizer clips on its own, so well-behaved callers never rely on this.
//! - `flush()` pushes the buffer to the device. Failures are returned to the
//!   caller of `RoboEyes::update` and are not retried.
//! - `size()` is read once at initialization to size the default geometry.

use crate::color::Rgba;
use anyhow::Result;

/// Minimal pixel-addressable display.
pub trait DisplaySurface {
    /// Reset the drawable area.
    fn clear(&mut self);

    /// Write one pixel. Out-of-range coordinates are ignored.
    fn set_pixel(&mut self, x: i16, y: i16, color: Rgba);

    /// Push the buffer to the physical device.
    fn flush(&mut self) -> Result<()>;

    /// Width and height in pixels.
    fn size(&self) -> (i16, i16);
}
