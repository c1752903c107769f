//! Headless in-memory display surface.
//!
//! Backs the demo binary and the test suites: keeps a plain `Vec<Rgba>`
//! framebuffer, counts flushes, and can be told to fail them.

use crate::color::Rgba;
use crate::display::surface::DisplaySurface;
use anyhow::{bail, Result};
use log::{info, trace};

pub struct HeadlessSurface {
    width_px: i16,
    height_px: i16,
    background: Rgba,
    framebuffer: Vec<Rgba>,
    pixel_writes: usize,
    flush_count: usize,
    fail_flush: bool,
}

impl HeadlessSurface {
    pub fn new(width_px: i16, height_px: i16) -> Self {
        info!("HeadlessSurface::new() {}x{}", width_px, height_px);
        let len = width_px.max(0) as usize * height_px.max(0) as usize;
        Self {
            width_px,
            height_px,
            background: Rgba::BLACK,
            framebuffer: vec![Rgba::BLACK; len],
            pixel_writes: 0,
            flush_count: 0,
            fail_flush: false,
        }
    }

    /// Color `clear()` resets to. Black by default.
    pub fn with_background(mut self, background: Rgba) -> Self {
        self.background = background;
        self.framebuffer.fill(background);
        self
    }

    fn index(&self, x: i16, y: i16) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width_px || y >= self.height_px {
            return None;
        }
        Some(y as usize * self.width_px as usize + x as usize)
    }

    /// Color at `(x, y)`, or `None` outside the surface.
    pub fn pixel(&self, x: i16, y: i16) -> Option<Rgba> {
        self.index(x, y).map(|i| self.framebuffer[i])
    }

    /// Coordinates of every pixel that differs from the background.
    pub fn lit_pixels(&self) -> Vec<(i16, i16)> {
        let mut lit = Vec::new();
        for y in 0..self.height_px {
            for x in 0..self.width_px {
                if self.pixel(x, y) != Some(self.background) {
                    lit.push((x, y));
                }
            }
        }
        lit
    }

    /// `set_pixel` calls since the last `clear()`.
    pub fn pixel_writes(&self) -> usize {
        self.pixel_writes
    }

    pub fn flush_count(&self) -> usize {
        self.flush_count
    }

    /// Makes every subsequent `flush()` fail until reset.
    pub fn set_fail_flush(&mut self, fail: bool) {
        self.fail_flush = fail;
    }

    /// One text row per pixel row, `#` for lit pixels and `.` otherwise.
    pub fn to_ascii(&self) -> String {
        let mut out = String::with_capacity(self.framebuffer.len() + self.height_px.max(0) as usize);
        for y in 0..self.height_px {
            for x in 0..self.width_px {
                let lit = self.pixel(x, y) != Some(self.background);
                out.push(if lit { '#' } else { '.' });
            }
            out.push('\n');
        }
        out
    }
}

impl DisplaySurface for HeadlessSurface {
    fn clear(&mut self) {
        self.framebuffer.fill(self.background);
        self.pixel_writes = 0;
    }

    fn set_pixel(&mut self, x: i16, y: i16, color: Rgba) {
        self.pixel_writes += 1;
        if let Some(i) = self.index(x, y) {
            self.framebuffer[i] = color;
        }
    }

    fn flush(&mut self) -> Result<()> {
        if self.fail_flush {
            bail!("HeadlessSurface: simulated flush failure");
        }
        self.flush_count += 1;
        trace!("HeadlessSurface: flush #{}", self.flush_count);
        Ok(())
    }

    fn size(&self) -> (i16, i16) {
        (self.width_px, self.height_px)
    }
}
