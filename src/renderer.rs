// src/renderer.rs

//! This module defines the `Renderer`.
//!
//! The `Renderer` turns one `FrameGeometry` snapshot into pixels: it clears
//! the surface, draws both eyes as rounded rectangles, lays the mood
//! eyelids over them in the background color, and flushes. It holds no
//! animation state, so a frame can be rendered from any hand-built snapshot.

use crate::color::Rgba;
use crate::display::DisplaySurface;
use crate::geometry::{EyeFrame, FrameGeometry};
use crate::rasterizer::Rasterizer;

use anyhow::{Context, Result};
use log::trace;


/// Which top corner an eyelid wedge hangs from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Wedge {
    /// From the outer corner inward (tired).
    Outer,
    /// From the inner corner inward (angry).
    Inner,
}

/// Draws `FrameGeometry` snapshots onto a `DisplaySurface`.
#[derive(Debug, Clone)]
pub struct Renderer {
    width: i16,
    height: i16,
    eye_color: Rgba,
    background: Rgba,
}

impl Renderer {
    /// Creates a renderer clipping to a `width` x `height` screen.
    pub fn new(width: i16, height: i16, eye_color: Rgba, background: Rgba) -> Self {
        Self {
            width,
            height,
            eye_color,
            background,
        }
    }

    pub fn set_colors(&mut self, eye_color: Rgba, background: Rgba) {
        self.eye_color = eye_color;
        self.background = background;
    }

    /// Renders one complete frame and flushes it.
    ///
    /// # Returns
    ///
    /// * `Result<()>`: the surface's flush error, if any. Nothing is retried.
    pub fn draw<S: DisplaySurface + ?Sized>(
        &self,
        frame: &FrameGeometry,
        surface: &mut S,
    ) -> Result<()> {
        trace!("Renderer: drawing frame {:?}", frame);

        surface.clear();
        {
            let mut raster = Rasterizer::new(&mut *surface, self.width, self.height);
            self.draw_eye_shapes(&mut raster, frame);
            self.draw_eyelids(&mut raster, frame);
        }
        surface.flush().context("Failed to flush display surface")
    }

    fn draw_eye_shapes<S: DisplaySurface + ?Sized>(
        &self,
        raster: &mut Rasterizer<'_, S>,
        frame: &FrameGeometry,
    ) {
        self.fill_eye(raster, &frame.left);
        if !frame.cyclops {
            self.fill_eye(raster, &frame.right);
        }
    }

    fn fill_eye<S: DisplaySurface + ?Sized>(&self, raster: &mut Rasterizer<'_, S>, eye: &EyeFrame) {
        raster.fill_round_rect(
            eye.x,
            eye.y,
            eye.width,
            eye.height,
            eye.border_radius,
            self.eye_color,
        );
    }

    fn draw_eyelids<S: DisplaySurface + ?Sized>(
        &self,
        raster: &mut Rasterizer<'_, S>,
        frame: &FrameGeometry,
    ) {
        let left = &frame.left;
        // Both eyes share the left eye's vertical reference.
        let top_y = left.y.saturating_sub(1);
        let bottom_y = left.y.saturating_add(left.height);

        if frame.tired_height > 0 {
            self.draw_wedges(raster, frame, top_y, frame.tired_height, Wedge::Outer);
        }
        if frame.angry_height > 0 {
            self.draw_wedges(raster, frame, top_y, frame.angry_height, Wedge::Inner);
        }

        let offset = frame.happy_bottom_offset;
        if offset > 0 {
            let cover_y = bottom_y.saturating_sub(offset).saturating_add(1);
            raster.fill_round_rect(
                left.x.saturating_sub(1),
                cover_y,
                left.width.saturating_add(2),
                offset,
                left.border_radius,
                self.background,
            );
            if !frame.cyclops {
                let right = &frame.right;
                raster.fill_round_rect(
                    right.x.saturating_sub(1),
                    cover_y,
                    right.width.saturating_add(2),
                    offset,
                    right.border_radius,
                    self.background,
                );
            }
        }
    }

    fn draw_wedges<S: DisplaySurface + ?Sized>(
        &self,
        raster: &mut Rasterizer<'_, S>,
        frame: &FrameGeometry,
        top: i16,
        height: i16,
        wedge: Wedge,
    ) {
        let bg = self.background;
        let bottom = top.saturating_add(height);
        let left = &frame.left;
        let (lx, lw) = (left.x, left.width);

        if frame.cyclops {
            // One eye carries both halves, split at its midpoint.
            let mid = lx.saturating_add(lw / 2);
            let right_edge = lx.saturating_add(lw);
            match wedge {
                Wedge::Outer => {
                    raster.fill_triangle(lx, top, mid, top, lx, bottom, bg);
                    raster.fill_triangle(mid, top, right_edge, top, right_edge, bottom, bg);
                }
                Wedge::Inner => {
                    raster.fill_triangle(lx, top, mid, top, mid, bottom, bg);
                    raster.fill_triangle(mid, top, right_edge, top, mid, bottom, bg);
                }
            }
            return;
        }

        let rx = frame.right.x;
        let l_end = lx.saturating_add(lw);
        let r_end = rx.saturating_add(frame.right.width);
        match wedge {
            Wedge::Outer => {
                raster.fill_triangle(lx, top, l_end, top, lx, bottom, bg);
                raster.fill_triangle(rx, top, r_end, top, r_end, bottom, bg);
            }
            Wedge::Inner => {
                raster.fill_triangle(lx, top, l_end, top, l_end, bottom, bg);
                raster.fill_triangle(rx, top, r_end, top, rx, bottom, bg);
            }
        }
    }
}
