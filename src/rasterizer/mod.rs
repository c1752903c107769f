// src/rasterizer/mod.rs

//! Software rasterizer for the eye shapes.
//!
//! All primitives write straight to a `DisplaySurface`; nothing is buffered
//! here. Every coordinate is clipped against the screen bounds before the
//! surface is touched:
//!
//! ```text
//! fill_round_rect ──► fill_rect (center + sides)
//!                └──► fill_circle (corners) ──► draw_fast_hline
//! fill_triangle ─────► draw_hline (clipped span)
//! ```
//!
//! Arithmetic is done in `i32` so that shapes hanging off the screen edge
//! cannot overflow the `i16` coordinate space surfaces use.

use crate::color::Rgba;
use crate::display::DisplaySurface;
use bitflags::bitflags;

#[cfg(test)]
mod tests;

bitflags! {
    /// Which quarters of a circle `fill_circle` draws.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Quadrants: u8 {
        const TOP_LEFT = 0x1;
        const TOP_RIGHT = 0x2;
        const BOTTOM_LEFT = 0x4;
        const BOTTOM_RIGHT = 0x8;
    }
}

/// Drawing primitives bound to one surface for the duration of a frame.
pub struct Rasterizer<'a, S: DisplaySurface + ?Sized> {
    surface: &'a mut S,
    width: i32,
    height: i32,
}

impl<'a, S: DisplaySurface + ?Sized> Rasterizer<'a, S> {
    /// Creates a rasterizer clipping to `width` x `height`.
    pub fn new(surface: &'a mut S, width: i16, height: i16) -> Self {
        Self {
            surface,
            width: width as i32,
            height: height as i32,
        }
    }

    #[inline]
    fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height
    }

    #[inline]
    fn put(&mut self, x: i32, y: i32, color: Rgba) {
        // Callers have already clipped, so the casts are lossless.
        self.surface.set_pixel(x as i16, y as i16, color);
    }

    /// Fills the `width` x `height` rectangle whose top-left corner is `(x, y)`.
    pub fn fill_rect(&mut self, x: i16, y: i16, width: i16, height: i16, color: Rgba) {
        self.fill_rect_px(x as i32, y as i32, width as i32, height as i32, color);
    }

    fn fill_rect_px(&mut self, x: i32, y: i32, width: i32, height: i32, color: Rgba) {
        // Only the on-screen part of the rectangle is visited.
        let x_start = x.max(0);
        let y_start = y.max(0);
        let x_end = (x + width).min(self.width);
        let y_end = (y + height).min(self.height);
        for i in x_start..x_end {
            for j in y_start..y_end {
                if self.in_bounds(i, j) {
                    self.put(i, j, color);
                }
            }
        }
    }

    /// Fills a rectangle with rounded corners.
    ///
    /// Shapes two pixels thin or thinner are drawn as plain rectangles. The
    /// radius is clamped to half the shorter side.
    pub fn fill_round_rect(
        &mut self,
        x: i16,
        y: i16,
        width: i16,
        height: i16,
        radius: i16,
        color: Rgba,
    ) {
        let (x, y) = (x as i32, y as i32);
        let (width, height) = (width as i32, height as i32);
        if width <= 2 || height <= 2 {
            self.fill_rect_px(x, y, width, height, color);
            return;
        }

        let r = (radius as i32).min(width / 2).min(height / 2).max(0);

        // Full-height center column, then the two sides shortened by the corners.
        self.fill_rect_px(x + r, y, width - 2 * r, height, color);
        self.fill_rect_px(x, y + r, r, height - 2 * r, color);
        self.fill_rect_px(x + width - r, y + r, r, height - 2 * r, color);

        if r > 0 {
            let right = x + width - r - 1;
            let bottom = y + height - r - 1;
            self.fill_circle_px(x + r, y + r, r, Quadrants::TOP_LEFT, color);
            self.fill_circle_px(right, y + r, r, Quadrants::TOP_RIGHT, color);
            self.fill_circle_px(x + r, bottom, r, Quadrants::BOTTOM_LEFT, color);
            self.fill_circle_px(right, bottom, r, Quadrants::BOTTOM_RIGHT, color);
        }
    }

    /// Midpoint circle fill restricted to `quadrants`.
    ///
    /// The per-quadrant span lengths are deliberately not symmetric: the
    /// left quadrants span the full diameter, top-right spans stop one pixel
    /// short of the bottom-right ones. Rounded corners rely on this exact
    /// pixel footprint.
    pub fn fill_circle(&mut self, x0: i16, y0: i16, radius: i16, quadrants: Quadrants, color: Rgba) {
        self.fill_circle_px(x0 as i32, y0 as i32, radius as i32, quadrants, color);
    }

    fn fill_circle_px(&mut self, x0: i32, y0: i32, radius: i32, quadrants: Quadrants, color: Rgba) {
        if radius <= 0 {
            return;
        }

        let mut f = 1 - radius;
        let mut dd_f_x = 1;
        let mut dd_f_y = -2 * radius;
        let mut x = 0;
        let mut y = radius;

        while x <= y {
            if quadrants.contains(Quadrants::TOP_LEFT) {
                self.draw_fast_hline(x0 - y, y0 - x, 2 * y + 1, color);
                self.draw_fast_hline(x0 - x, y0 - y, 2 * x + 1, color);
            }
            if quadrants.contains(Quadrants::TOP_RIGHT) {
                self.draw_fast_hline(x0, y0 - y, x, color);
                self.draw_fast_hline(x0, y0 - x, y, color);
            }
            if quadrants.contains(Quadrants::BOTTOM_LEFT) {
                self.draw_fast_hline(x0 - y, y0 + x, 2 * y + 1, color);
                self.draw_fast_hline(x0 - x, y0 + y, 2 * x + 1, color);
            }
            if quadrants.contains(Quadrants::BOTTOM_RIGHT) {
                self.draw_fast_hline(x0, y0 + y, x + 1, color);
                self.draw_fast_hline(x0, y0 + x, y + 1, color);
            }

            if f >= 0 {
                y -= 1;
                dd_f_y += 2;
                f += dd_f_y;
            }
            x += 1;
            dd_f_x += 2;
            f += dd_f_x;
        }
    }

    /// Horizontal run of `length` pixels starting at `(x, y)`.
    fn draw_fast_hline(&mut self, x: i32, y: i32, length: i32, color: Rgba) {
        if length <= 0 {
            return;
        }
        self.span(x, x + length - 1, y, color);
    }

    /// Scanline triangle fill.
    ///
    /// Vertices are sorted by `y`; a triangle with no vertical extent draws
    /// nothing. The upper half stops one row short of the middle vertex, the
    /// lower half includes both the middle and the bottom rows.
    #[allow(clippy::too_many_arguments)]
    pub fn fill_triangle(
        &mut self,
        x0: i16,
        y0: i16,
        x1: i16,
        y1: i16,
        x2: i16,
        y2: i16,
        color: Rgba,
    ) {
        let mut v = [
            (x0 as i32, y0 as i32),
            (x1 as i32, y1 as i32),
            (x2 as i32, y2 as i32),
        ];
        if v[0].1 > v[1].1 {
            v.swap(0, 1);
        }
        if v[1].1 > v[2].1 {
            v.swap(1, 2);
        }
        if v[0].1 > v[1].1 {
            v.swap(0, 1);
        }
        let [(x0, y0), (x1, y1), (x2, y2)] = v;

        let total_height = y2 - y0;
        if total_height == 0 {
            return;
        }
        let inv_total = 1.0 / total_height as f32;

        let top_height = y1 - y0;
        if top_height > 0 {
            let inv_top = 1.0 / top_height as f32;
            for y in y0..y1 {
                let ax = x0 + ((x2 - x0) as f32 * ((y - y0) as f32 * inv_total)) as i32;
                let bx = x0 + ((x1 - x0) as f32 * ((y - y0) as f32 * inv_top)) as i32;
                self.span(ax, bx, y, color);
            }
        }

        let bottom_height = y2 - y1;
        if bottom_height > 0 {
            let inv_bottom = 1.0 / bottom_height as f32;
            for y in y1..=y2 {
                let ax = x0 + ((x2 - x0) as f32 * ((y - y0) as f32 * inv_total)) as i32;
                let bx = x1 + ((x2 - x1) as f32 * ((y - y1) as f32 * inv_bottom)) as i32;
                self.span(ax, bx, y, color);
            }
        }
    }

    /// Clipped horizontal span from `xa` to `xb` inclusive, in either order.
    pub fn draw_hline(&mut self, xa: i16, xb: i16, y: i16, color: Rgba) {
        self.span(xa as i32, xb as i32, y as i32, color);
    }

    fn span(&mut self, xa: i32, xb: i32, y: i32, color: Rgba) {
        let (mut xa, mut xb) = if xa > xb { (xb, xa) } else { (xa, xb) };
        if y < 0 || y >= self.height {
            return;
        }
        xa = xa.max(0);
        xb = xb.min(self.width - 1);
        for x in xa..=xb {
            self.put(x, y, color);
        }
    }
}
