// src/rasterizer/tests.rs

use super::{Quadrants, Rasterizer};
use crate::color::Rgba;
use crate::display::DisplaySurface;
use anyhow::Result;
use std::collections::BTreeSet;
use test_log::test;

const W: i16 = 32;
const H: i16 = 16;

/// Records every `set_pixel` call, including ones the rasterizer should
/// never make.
#[derive(Default)]
struct RecordingSurface {
    writes: Vec<(i16, i16, Rgba)>,
}

impl RecordingSurface {
    fn pixels(&self) -> BTreeSet<(i16, i16)> {
        self.writes.iter().map(|&(x, y, _)| (x, y)).collect()
    }

    fn all_in_bounds(&self) -> bool {
        self.writes
            .iter()
            .all(|&(x, y, _)| x >= 0 && x < W && y >= 0 && y < H)
    }
}

impl DisplaySurface for RecordingSurface {
    fn clear(&mut self) {
        self.writes.clear();
    }

    fn set_pixel(&mut self, x: i16, y: i16, color: Rgba) {
        self.writes.push((x, y, color));
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn size(&self) -> (i16, i16) {
        (W, H)
    }
}

fn draw(f: impl FnOnce(&mut Rasterizer<'_, RecordingSurface>)) -> RecordingSurface {
    let mut surface = RecordingSurface::default();
    {
        let mut raster = Rasterizer::new(&mut surface, W, H);
        f(&mut raster);
    }
    surface
}

#[test]
fn fill_rect_covers_exact_area() {
    let surface = draw(|r| r.fill_rect(2, 3, 4, 2, Rgba::WHITE));
    let expected: BTreeSet<_> = (2..6).flat_map(|x| (3..5).map(move |y| (x, y))).collect();
    assert_eq!(surface.pixels(), expected);
}

#[test]
fn fill_rect_clips_to_screen() {
    let surface = draw(|r| r.fill_rect(-3, -3, W + 10, H + 10, Rgba::WHITE));
    assert!(surface.all_in_bounds());
    assert_eq!(surface.pixels().len(), (W as usize) * (H as usize));
}

#[test]
fn fill_rect_with_non_positive_size_draws_nothing() {
    let surface = draw(|r| {
        r.fill_rect(4, 4, 0, 5, Rgba::WHITE);
        r.fill_rect(4, 4, 5, -2, Rgba::WHITE);
    });
    assert!(surface.writes.is_empty());
}

#[test]
fn round_rect_with_zero_radius_matches_fill_rect() {
    let rounded = draw(|r| r.fill_round_rect(3, 2, 12, 9, 0, Rgba::WHITE));
    let plain = draw(|r| r.fill_rect(3, 2, 12, 9, Rgba::WHITE));
    assert_eq!(rounded.pixels(), plain.pixels());
}

#[test]
fn round_rect_with_negative_radius_matches_fill_rect() {
    let rounded = draw(|r| r.fill_round_rect(3, 2, 12, 9, -4, Rgba::WHITE));
    let plain = draw(|r| r.fill_rect(3, 2, 12, 9, Rgba::WHITE));
    assert_eq!(rounded.pixels(), plain.pixels());
}

#[test]
fn thin_round_rect_degrades_to_rect() {
    let rounded = draw(|r| r.fill_round_rect(1, 1, 2, 8, 5, Rgba::WHITE));
    let plain = draw(|r| r.fill_rect(1, 1, 2, 8, Rgba::WHITE));
    assert_eq!(rounded.pixels(), plain.pixels());
}

#[test]
fn round_rect_cuts_corners_but_keeps_edges() {
    let surface = draw(|r| r.fill_round_rect(0, 0, 12, 12, 4, Rgba::WHITE));
    let pixels = surface.pixels();
    for corner in [(0, 0), (11, 0), (0, 11), (11, 11)] {
        assert!(!pixels.contains(&corner), "corner {:?} should be cut", corner);
    }
    for edge in [(6, 0), (0, 6), (11, 6), (6, 11), (6, 6)] {
        assert!(pixels.contains(&edge), "edge {:?} should be filled", edge);
    }
}

#[test]
fn round_rect_radius_is_clamped_to_half_the_short_side() {
    let huge = draw(|r| r.fill_round_rect(2, 2, 10, 6, 100, Rgba::WHITE));
    let clamped = draw(|r| r.fill_round_rect(2, 2, 10, 6, 3, Rgba::WHITE));
    assert_eq!(huge.pixels(), clamped.pixels());
}

#[test]
fn circle_with_non_positive_radius_draws_nothing() {
    let surface = draw(|r| {
        r.fill_circle(5, 5, 0, Quadrants::all(), Rgba::WHITE);
        r.fill_circle(5, 5, -3, Quadrants::all(), Rgba::WHITE);
    });
    assert!(surface.writes.is_empty());
}

#[test]
fn circle_quadrant_spans_are_asymmetric() {
    let top_right = draw(|r| r.fill_circle(5, 5, 1, Quadrants::TOP_RIGHT, Rgba::WHITE));
    let bottom_right = draw(|r| r.fill_circle(5, 5, 1, Quadrants::BOTTOM_RIGHT, Rgba::WHITE));
    let top_left = draw(|r| r.fill_circle(5, 5, 1, Quadrants::TOP_LEFT, Rgba::WHITE));

    assert_eq!(top_right.pixels(), BTreeSet::from([(5, 5)]));
    assert_eq!(bottom_right.pixels(), BTreeSet::from([(5, 5), (6, 5), (5, 6)]));
    assert_eq!(top_left.pixels(), BTreeSet::from([(4, 5), (5, 5), (6, 5), (5, 4)]));
}

#[test]
fn circle_near_edge_stays_in_bounds() {
    let surface = draw(|r| r.fill_circle(0, 0, 6, Quadrants::all(), Rgba::WHITE));
    assert!(!surface.writes.is_empty());
    assert!(surface.all_in_bounds());
}

#[test]
fn flat_triangle_draws_nothing() {
    let surface = draw(|r| r.fill_triangle(1, 4, 9, 4, 5, 4, Rgba::WHITE));
    assert!(surface.writes.is_empty());
}

#[test]
fn right_triangle_fills_expected_rows() {
    let surface = draw(|r| r.fill_triangle(0, 0, 4, 0, 0, 4, Rgba::WHITE));
    let pixels = surface.pixels();
    assert_eq!(pixels.len(), 15);
    assert!(pixels.contains(&(4, 0)));
    assert!(pixels.contains(&(0, 4)));
    assert!(!pixels.contains(&(4, 1)));
}

#[test]
fn triangle_vertex_order_does_not_matter() {
    let a = draw(|r| r.fill_triangle(0, 0, 4, 0, 0, 4, Rgba::WHITE));
    let b = draw(|r| r.fill_triangle(0, 4, 4, 0, 0, 0, Rgba::WHITE));
    assert_eq!(a.pixels(), b.pixels());
}

#[test]
fn triangle_off_screen_is_clipped() {
    let surface = draw(|r| r.fill_triangle(-10, -5, 40, -5, 40, 30, Rgba::WHITE));
    assert!(!surface.writes.is_empty());
    assert!(surface.all_in_bounds());
}

#[test]
fn span_fully_outside_draws_nothing() {
    let surface = draw(|r| {
        r.draw_hline(0, 10, -1, Rgba::WHITE);
        r.draw_hline(0, 10, H, Rgba::WHITE);
        r.draw_hline(-20, -5, 3, Rgba::WHITE);
        r.draw_hline(W, W + 4, 3, Rgba::WHITE);
    });
    assert!(surface.writes.is_empty());
}

#[test]
fn partially_outside_span_draws_in_bounds_pixels_inclusive() {
    let surface = draw(|r| r.draw_hline(W + 5, W - 3, 2, Rgba::WHITE));
    let expected: BTreeSet<_> = ((W - 3)..W).map(|x| (x, 2)).collect();
    assert_eq!(surface.pixels(), expected);
    assert_eq!(surface.writes.len(), 3);

    let surface = draw(|r| r.draw_hline(-4, 2, 0, Rgba::WHITE));
    let expected: BTreeSet<_> = (0..=2).map(|x| (x, 0)).collect();
    assert_eq!(surface.pixels(), expected);
}

#[test]
fn round_rect_at_coordinate_limits_does_not_overflow() {
    let surface = draw(|r| {
        r.fill_round_rect(i16::MAX - 5, i16::MAX - 5, i16::MAX, i16::MAX, 8, Rgba::WHITE);
        r.fill_round_rect(-20, -20, i16::MAX, i16::MAX, 8, Rgba::WHITE);
    });
    assert!(surface.all_in_bounds());
    // The second shape covers the whole screen apart from its own corners,
    // which lie off screen.
    assert_eq!(surface.pixels().len(), (W as usize) * (H as usize));
}
