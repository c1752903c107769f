// src/geometry.rs

//! Per-eye geometry and the per-frame smoothing step.
//!
//! Every animated value keeps a `current` and a `next`. Each frame `current`
//! moves halfway towards `next` with truncating integer division, which gives
//! the eased look without any floating point. Only the left eye's position is
//! driven directly; the right eye trails it at `left + width + spacing`.

use crate::config::EyeConfig;
use crate::expression::{Direction, Expression};
use log::debug;

/// Height an eye collapses to when closed.
pub const CLOSED_HEIGHT: i16 = 1;

/// Extra height given to an eye gazing towards a screen edge while curious.
pub const DEFAULT_CURIOSITY_OFFSET: i16 = 8;

/// How close to an edge the gaze target must be to trigger the bulge.
pub const DEFAULT_CURIOSITY_MARGIN: i16 = 10;

#[inline]
fn halfway(a: i16, b: i16) -> i16 {
    ((a as i32 + b as i32) / 2) as i16
}

#[inline]
fn clamp_i16(v: i32) -> i16 {
    v.clamp(i16::MIN as i32, i16::MAX as i32) as i16
}

/// A value eased from `current` towards `next`, remembering its `default`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Smoothed {
    pub default: i16,
    pub current: i16,
    pub next: i16,
}

impl Smoothed {
    pub const fn new(value: i16) -> Self {
        Self {
            default: value,
            current: value,
            next: value,
        }
    }

    /// Changes both the resting value and the target.
    pub fn set_default(&mut self, value: i16) {
        self.default = value;
        self.next = value;
    }

    /// One smoothing step: `current = (current + next) / 2`.
    pub fn step(&mut self) {
        self.current = halfway(self.current, self.next);
    }

    /// `current = (current + next + offset) / 2`.
    pub fn step_with_offset(&mut self, offset: i16) {
        self.current = clamp_i16((self.current as i32 + self.next as i32 + offset as i32) / 2);
    }
}

/// Geometry of a single eye.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EyeGeometry {
    pub width: Smoothed,
    pub height: Smoothed,
    /// Transient curiosity bulge added on top of the height target.
    pub height_offset: i16,
    pub border_radius: Smoothed,
    pub x: i16,
    pub y: i16,
    pub x_next: i16,
    pub y_next: i16,
    /// Intended end state. A closed eye with this set springs back open.
    pub open: bool,
}

impl EyeGeometry {
    fn new(width: i16, height: i16, border_radius: i16, x: i16, y: i16) -> Self {
        let mut height = Smoothed::new(height);
        // Start shut so the eyes open on the first frames.
        height.current = CLOSED_HEIGHT;
        Self {
            width: Smoothed::new(width),
            height,
            height_offset: 0,
            border_radius: Smoothed::new(border_radius),
            x,
            y,
            x_next: x,
            y_next: y,
            open: false,
        }
    }

    fn step_height(&mut self) {
        self.height.step_with_offset(self.height_offset);
        // Re-center vertically as the height changes.
        let recenter = (self.height.default as i32 - self.height.current as i32) / 2
            - self.height_offset as i32 / 2;
        self.y = clamp_i16(self.y as i32 + recenter);
    }

    fn reopen_if_collapsed(&mut self) {
        if self.open && self.height.current <= CLOSED_HEIGHT + self.height_offset {
            self.height.next = self.height.default;
        }
    }

    fn close(&mut self) {
        self.height.next = CLOSED_HEIGHT;
        self.open = false;
    }

    fn frame(&self) -> EyeFrame {
        EyeFrame {
            x: self.x,
            y: self.y,
            width: self.width.current,
            height: self.height.current,
            border_radius: self.border_radius.current,
        }
    }
}

/// Smoothed mood overlays drawn over the eyes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EyelidOverlay {
    pub tired_height: Smoothed,
    pub angry_height: Smoothed,
    pub happy_bottom_offset: Smoothed,
}

impl Default for EyelidOverlay {
    fn default() -> Self {
        Self {
            tired_height: Smoothed::new(0),
            angry_height: Smoothed::new(0),
            happy_bottom_offset: Smoothed::new(0),
        }
    }
}

impl EyelidOverlay {
    /// Retargets the overlays for `expression` and advances them one step.
    /// Targets are half the left eye's current height.
    pub fn step(&mut self, expression: &Expression, eye_height: i16) {
        let half = eye_height / 2;
        self.tired_height.next = if expression.is_tired() { half } else { 0 };
        self.angry_height.next = if expression.is_angry() { half } else { 0 };
        self.happy_bottom_offset.next = if expression.is_happy() { half } else { 0 };

        self.tired_height.step();
        self.angry_height.step();
        self.happy_bottom_offset.step();
    }
}

/// Drawable state of one eye for a single frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EyeFrame {
    pub x: i16,
    pub y: i16,
    pub width: i16,
    pub height: i16,
    pub border_radius: i16,
}

/// Everything the renderer needs for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameGeometry {
    pub left: EyeFrame,
    pub right: EyeFrame,
    pub space_between: i16,
    pub tired_height: i16,
    pub angry_height: i16,
    pub happy_bottom_offset: i16,
    pub cyclops: bool,
}

/// Owns both eyes and the shared spacing, and advances them each frame.
#[derive(Debug, Clone)]
pub struct GeometryEngine {
    screen_width: i16,
    screen_height: i16,
    pub left: EyeGeometry,
    pub right: EyeGeometry,
    pub space_between: Smoothed,
    pub eyelids: EyelidOverlay,
    curiosity_offset: i16,
    curiosity_margin: i16,
}

impl GeometryEngine {
    /// Lays out both eyes centered on a `screen_width` x `screen_height` panel.
    pub fn new(screen_width: i16, screen_height: i16, eyes: &EyeConfig) -> Self {
        let total_width = 2 * eyes.width as i32 + eyes.space_between as i32;
        let left_x = clamp_i16((screen_width as i32 - total_width) / 2);
        let left_y = clamp_i16((screen_height as i32 - eyes.height as i32) / 2);
        let right_x = clamp_i16(left_x as i32 + eyes.width as i32 + eyes.space_between as i32);

        Self {
            screen_width,
            screen_height,
            left: EyeGeometry::new(eyes.width, eyes.height, eyes.border_radius, left_x, left_y),
            right: EyeGeometry::new(eyes.width, eyes.height, eyes.border_radius, right_x, left_y),
            space_between: Smoothed::new(eyes.space_between),
            eyelids: EyelidOverlay::default(),
            curiosity_offset: DEFAULT_CURIOSITY_OFFSET,
            curiosity_margin: DEFAULT_CURIOSITY_MARGIN,
        }
    }

    /// Overrides the curiosity bulge size and its edge margin.
    pub fn set_curiosity(&mut self, offset: i16, margin: i16) {
        self.curiosity_offset = offset;
        self.curiosity_margin = margin;
    }

    /// Largest x the left eye may take while keeping both eyes on screen.
    pub fn screen_constraint_x(&self) -> i16 {
        self.screen_width
            .saturating_sub(self.left.width.current)
            .saturating_sub(self.space_between.current)
            .saturating_sub(self.right.width.current)
    }

    /// Largest y an eye may take.
    pub fn screen_constraint_y(&self) -> i16 {
        self.screen_height.saturating_sub(self.left.height.default)
    }

    pub fn set_width(&mut self, left: i16, right: i16) {
        self.left.width.set_default(left);
        self.right.width.set_default(right);
    }

    pub fn set_height(&mut self, left: i16, right: i16) {
        self.left.height.set_default(left);
        self.right.height.set_default(right);
    }

    pub fn set_border_radius(&mut self, left: i16, right: i16) {
        self.left.border_radius.set_default(left);
        self.right.border_radius.set_default(right);
    }

    pub fn set_space_between(&mut self, space: i16) {
        self.space_between.set_default(space);
    }

    /// Points the gaze at a predefined location.
    pub fn look(&mut self, direction: Direction) {
        let (x, y) = direction.target(self.screen_constraint_x(), self.screen_constraint_y());
        debug!("GeometryEngine: look {:?} -> ({}, {})", direction, x, y);
        self.set_left_target(x, y);
    }

    /// Sets where the left eye is heading; the right eye follows.
    pub fn set_left_target(&mut self, x: i16, y: i16) {
        self.left.x_next = x;
        self.left.y_next = y;
    }

    pub fn close(&mut self, left: bool, right: bool) {
        if left {
            self.left.close();
        }
        if right {
            self.right.close();
        }
    }

    pub fn open(&mut self, left: bool, right: bool) {
        if left {
            self.left.open = true;
        }
        if right {
            self.right.open = true;
        }
    }

    /// Advances every smoothed value by one frame.
    pub fn step(&mut self, expression: &Expression) {
        self.update_curiosity(expression);

        self.left.step_height();
        self.right.step_height();

        self.left.reopen_if_collapsed();
        self.right.reopen_if_collapsed();

        self.left.width.step();
        self.right.width.step();
        self.space_between.step();

        self.left.x = halfway(self.left.x, self.left.x_next);
        self.left.y = halfway(self.left.y, self.left.y_next);
        self.right.x_next = self
            .left
            .x_next
            .saturating_add(self.left.width.current)
            .saturating_add(self.space_between.current);
        self.right.y_next = self.left.y_next;
        self.right.x = halfway(self.right.x, self.right.x_next);
        self.right.y = halfway(self.right.y, self.right.y_next);

        self.left.border_radius.step();
        self.right.border_radius.step();
    }

    fn update_curiosity(&mut self, expression: &Expression) {
        if !expression.curious {
            self.left.height_offset = 0;
            self.right.height_offset = 0;
            return;
        }

        let margin = self.curiosity_margin;
        let near_left_edge = self.left.x_next <= margin;
        let near_right_edge_cyclops =
            expression.cyclops && self.left.x_next >= self.screen_constraint_x().saturating_sub(margin);
        self.left.height_offset = if near_left_edge || near_right_edge_cyclops {
            self.curiosity_offset
        } else {
            0
        };

        let right_limit = self
            .screen_width
            .saturating_sub(self.right.width.current)
            .saturating_sub(margin);
        self.right.height_offset = if self.right.x_next >= right_limit {
            self.curiosity_offset
        } else {
            0
        };
    }

    /// Hides the right eye. Applied every frame while cyclops is on.
    pub fn enforce_cyclops(&mut self) {
        self.right.width.current = 0;
        self.right.height.current = 0;
        self.space_between.current = 0;
    }

    /// Shifts both eyes horizontally without touching their targets.
    pub fn shift_x(&mut self, dx: i16) {
        self.left.x = self.left.x.saturating_add(dx);
        self.right.x = self.right.x.saturating_add(dx);
    }

    /// Shifts both eyes vertically without touching their targets.
    pub fn shift_y(&mut self, dy: i16) {
        self.left.y = self.left.y.saturating_add(dy);
        self.right.y = self.right.y.saturating_add(dy);
    }

    /// Advances the mood overlays, which follow the left eye's height.
    pub fn step_eyelids(&mut self, expression: &Expression) {
        self.eyelids.step(expression, self.left.height.current);
    }

    pub fn snapshot(&self, cyclops: bool) -> FrameGeometry {
        FrameGeometry {
            left: self.left.frame(),
            right: self.right.frame(),
            space_between: self.space_between.current,
            tired_height: self.eyelids.tired_height.current,
            angry_height: self.eyelids.angry_height.current,
            happy_bottom_offset: self.eyelids.happy_bottom_offset.current,
            cyclops,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expression::Mood;
    use test_log::test;

    fn engine() -> GeometryEngine {
        GeometryEngine::new(128, 64, &EyeConfig::default())
    }

    fn settle(engine: &mut GeometryEngine, expression: &Expression, frames: usize) {
        for _ in 0..frames {
            engine.step(expression);
        }
    }

    #[test]
    fn smoothing_distance_never_grows_and_settles() {
        for (start, target) in [(1, 36), (60, 36), (-10, 0), (0, -7), (36, 36)] {
            let mut value = Smoothed::new(target);
            value.current = start;
            let mut last = (value.current - value.next).abs();
            let mut history = Vec::new();
            for _ in 0..32 {
                value.step();
                let distance = (value.current - value.next).abs();
                assert!(distance <= last, "{} -> {} grew", start, target);
                last = distance;
                history.push(value.current);
            }
            let settled = history[history.len() - 1];
            assert!(history[history.len() - 8..].iter().all(|&v| v == settled));
            // Truncation stops one short when climbing towards a positive target.
            assert!((settled - target).abs() <= 1);
        }
    }

    #[test]
    fn smoothing_from_above_reaches_target_exactly() {
        let mut value = Smoothed::new(36);
        value.current = 60;
        for _ in 0..16 {
            value.step();
        }
        assert_eq!(value.current, 36);
    }

    #[test]
    fn eyes_start_closed_and_open_on_their_own() {
        let mut geometry = engine();
        assert_eq!(geometry.left.height.current, CLOSED_HEIGHT);
        settle(&mut geometry, &Expression::default(), 20);
        assert!(geometry.left.height.current >= 35);
        assert!(geometry.right.height.current >= 35);
    }

    #[test]
    fn default_layout_is_centered() {
        let geometry = engine();
        assert_eq!(geometry.left.x, (128 - 82) / 2);
        assert_eq!(geometry.right.x, geometry.left.x + 36 + 10);
        assert_eq!(geometry.left.y, (64 - 36) / 2);
        assert_eq!(geometry.screen_constraint_y(), 28);
    }

    #[test]
    fn right_eye_trails_left_eye_target() {
        let mut geometry = engine();
        geometry.set_left_target(5, 3);
        settle(&mut geometry, &Expression::default(), 30);
        assert_eq!(
            geometry.right.x_next,
            5 + geometry.left.width.current + geometry.space_between.current
        );
        assert_eq!(geometry.right.y_next, 3);
        assert!((geometry.left.x - 5).abs() <= 1);
    }

    #[test]
    fn curiosity_bulges_the_eye_nearest_the_edge() {
        let mut geometry = engine();
        let mut expression = Expression::default();
        expression.curious = true;
        geometry.look(Direction::W);
        geometry.step(&expression);
        assert_eq!(geometry.left.height_offset, DEFAULT_CURIOSITY_OFFSET);
        assert_eq!(geometry.right.height_offset, 0);

        geometry.look(Direction::E);
        settle(&mut geometry, &expression, 10);
        assert_eq!(geometry.left.height_offset, 0);
        assert_eq!(geometry.right.height_offset, DEFAULT_CURIOSITY_OFFSET);
    }

    #[test]
    fn no_bulge_without_curiosity() {
        let mut geometry = engine();
        geometry.look(Direction::W);
        settle(&mut geometry, &Expression::default(), 5);
        assert_eq!(geometry.left.height_offset, 0);
        assert_eq!(geometry.right.height_offset, 0);
    }

    #[test]
    fn closed_eye_with_open_intent_springs_back() {
        let mut geometry = engine();
        let expression = Expression::default();
        settle(&mut geometry, &expression, 20);

        geometry.close(true, true);
        geometry.open(true, true);
        assert_eq!(geometry.left.height.next, CLOSED_HEIGHT);

        let mut collapsed = false;
        for _ in 0..30 {
            geometry.step(&expression);
            collapsed |= geometry.left.height.current <= CLOSED_HEIGHT;
        }
        assert!(collapsed);
        assert_eq!(geometry.left.height.next, geometry.left.height.default);
        assert!(geometry.left.height.current >= 35);
    }

    #[test]
    fn closed_eye_without_open_intent_stays_shut() {
        let mut geometry = engine();
        let expression = Expression::default();
        settle(&mut geometry, &expression, 20);
        geometry.close(false, true);
        settle(&mut geometry, &expression, 30);
        assert_eq!(geometry.right.height.current, CLOSED_HEIGHT);
        assert!(geometry.left.height.current >= 35);
    }

    #[test]
    fn cyclops_zeroes_right_eye_and_spacing() {
        let mut geometry = engine();
        geometry.step(&Expression::default());
        geometry.enforce_cyclops();
        let frame = geometry.snapshot(true);
        assert_eq!(frame.right.width, 0);
        assert_eq!(frame.right.height, 0);
        assert_eq!(frame.space_between, 0);
    }

    #[test]
    fn eyelids_fade_towards_mood() {
        let mut geometry = engine();
        let mut expression = Expression::default();
        settle(&mut geometry, &expression, 20);

        expression.set_mood(Mood::Tired);
        geometry.step_eyelids(&expression);
        let first = geometry.eyelids.tired_height.current;
        assert!(first > 0 && first < geometry.left.height.current / 2);
        for _ in 0..10 {
            geometry.step_eyelids(&expression);
        }
        assert!(geometry.eyelids.tired_height.current >= geometry.left.height.current / 2 - 1);
        assert_eq!(geometry.eyelids.angry_height.current, 0);

        expression.set_mood(Mood::Default);
        for _ in 0..10 {
            geometry.step_eyelids(&expression);
        }
        assert_eq!(geometry.eyelids.tired_height.current, 0);
    }

    #[test]
    fn setters_change_default_and_target() {
        let mut geometry = engine();
        geometry.set_width(20, 24);
        geometry.set_height(30, 30);
        geometry.set_border_radius(2, 3);
        geometry.set_space_between(4);
        assert_eq!(geometry.left.width.next, 20);
        assert_eq!(geometry.right.width.default, 24);
        assert_eq!(geometry.left.height.default, 30);
        assert_eq!(geometry.right.border_radius.next, 3);
        assert_eq!(geometry.space_between.next, 4);
        assert_eq!(geometry.screen_constraint_y(), 34);
    }

    #[test]
    fn cyclops_curiosity_bulges_left_eye_at_right_edge() {
        let mut geometry = engine();
        let mut expression = Expression::default();
        expression.curious = true;
        expression.cyclops = true;

        geometry.enforce_cyclops();
        geometry.look(Direction::E);
        assert_eq!(geometry.left.x_next, 128 - 36);
        geometry.step(&expression);
        assert_eq!(geometry.left.height_offset, DEFAULT_CURIOSITY_OFFSET);

        // With both eyes shown the same gaze only bulges the right eye.
        let mut geometry = engine();
        expression.cyclops = false;
        geometry.look(Direction::E);
        settle(&mut geometry, &expression, 2);
        assert_eq!(geometry.left.height_offset, 0);
        assert_eq!(geometry.right.height_offset, DEFAULT_CURIOSITY_OFFSET);
    }

    #[test]
    fn oversized_eyes_saturate_instead_of_overflowing() {
        let mut geometry = engine();
        geometry.set_width(20000, 20000);
        geometry.set_height(30000, 30000);
        let mut expression = Expression::default();
        expression.curious = true;
        settle(&mut geometry, &expression, 20);
        geometry.look(Direction::E);
        geometry.shift_x(i16::MAX);
        settle(&mut geometry, &expression, 5);

        assert_eq!(geometry.screen_constraint_x(), i16::MIN);
        assert!(geometry.left.width.current >= 19999);
    }
}
