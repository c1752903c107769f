// src/eyes.rs

//! `RoboEyes`, the public face of the engine.
//!
//! Owns the display surface, a clock, and the three per-frame stages:
//!
//! ```text
//! Clock ─► FrameGate ─► GeometryEngine::step ─► AnimationScheduler::tick
//!                         ─► Renderer::draw (clear, eyes, eyelids, flush)
//! ```
//!
//! The host calls `update()` from its own loop as often as it likes; a frame
//! is only produced once the configured frame interval has elapsed.

use crate::clock::{Clock, FrameGate, SystemClock};
use crate::color::Rgba;
use crate::config::Config;
use crate::display::DisplaySurface;
use crate::expression::{Direction, Expression, Mood};
use crate::geometry::{FrameGeometry, GeometryEngine};
use crate::renderer::Renderer;
use crate::scheduler::{AnimationScheduler, ShakeAnimation};

use anyhow::Result;
use log::{debug, info, trace};

/// Animated pair of eyes drawn onto a `DisplaySurface`.
pub struct RoboEyes<S: DisplaySurface, C: Clock = SystemClock> {
    surface: S,
    clock: C,
    gate: FrameGate,
    expression: Expression,
    geometry: GeometryEngine,
    scheduler: AnimationScheduler,
    renderer: Renderer,
    frames_drawn: u64,
}

impl<S: DisplaySurface> RoboEyes<S, SystemClock> {
    /// Initializes with default settings on a `width` x `height` screen,
    /// timed by the wall clock.
    pub fn begin(surface: S, width: i16, height: i16, fps: i32) -> Self {
        Self::with_clock(surface, SystemClock::new(), width, height, fps)
    }
}

impl<S: DisplaySurface, C: Clock> RoboEyes<S, C> {
    /// Like `begin`, with an explicit time source.
    pub fn with_clock(surface: S, clock: C, width: i16, height: i16, fps: i32) -> Self {
        let mut config = Config::default();
        config.display.fps = fps;
        Self::build(surface, clock, width, height, &config)
    }

    /// Initializes from `config`, sizing the layout from `surface.size()`.
    pub fn from_config(surface: S, clock: C, config: &Config) -> Self {
        let (width, height) = surface.size();
        Self::build(surface, clock, width, height, config)
    }

    fn build(surface: S, clock: C, width: i16, height: i16, config: &Config) -> Self {
        let mut geometry = GeometryEngine::new(width, height, &config.eyes);
        geometry.set_curiosity(
            config.animation.curiosity_offset,
            config.animation.curiosity_margin,
        );

        let mut scheduler = AnimationScheduler::new(config.rng_seed);
        scheduler.autoblink.configure(
            config.autoblink.active,
            config.autoblink.interval_s,
            config.autoblink.variation_s,
        );
        scheduler.idle.configure(
            config.idle.active,
            config.idle.interval_s,
            config.idle.variation_s,
        );
        let animation = &config.animation;
        scheduler.confused =
            ShakeAnimation::new(animation.confused_amplitude, animation.shake_duration_ms);
        scheduler.laugh =
            ShakeAnimation::new(animation.laugh_amplitude, animation.shake_duration_ms);

        let gate = FrameGate::new(config.display.fps);
        info!(
            "RoboEyes: {}x{} screen, {} ms frame interval, eyes {}x{}",
            width,
            height,
            gate.interval_ms(),
            config.eyes.width,
            config.eyes.height
        );

        Self {
            surface,
            clock,
            gate,
            expression: Expression::default(),
            geometry,
            scheduler,
            renderer: Renderer::new(
                width,
                height,
                config.display.eye_color,
                config.display.background,
            ),
            frames_drawn: 0,
        }
    }

    // --- Frame loop ---

    /// Per-tick entry point. Draws a frame if one is due.
    ///
    /// Returns `Ok(true)` when a frame was drawn and `Ok(false)` when the
    /// frame gate was still closed. Surface flush failures are returned as-is.
    pub fn update(&mut self) -> Result<bool> {
        let now = self.clock.now_ms();
        if !self.gate.try_begin_frame(now) {
            return Ok(false);
        }
        self.draw_eyes()?;
        Ok(true)
    }

    /// Advances all animation state and renders one frame, ignoring the
    /// frame gate.
    pub fn draw_eyes(&mut self) -> Result<()> {
        let now = self.clock.now_ms();
        trace!("RoboEyes: frame at {} ms", now);

        self.geometry.step(&self.expression);
        self.scheduler.tick(now, &mut self.geometry);
        if self.expression.cyclops {
            self.geometry.enforce_cyclops();
        }
        self.geometry.step_eyelids(&self.expression);

        let frame = self.geometry.snapshot(self.expression.cyclops);
        self.renderer.draw(&frame, &mut self.surface)?;
        self.frames_drawn += 1;
        Ok(())
    }

    // --- General setup ---

    /// Sets the maximum frame rate. Non-positive rates are ignored.
    pub fn set_framerate(&mut self, fps: i32) {
        self.gate.set_fps(fps);
    }

    pub fn set_width(&mut self, left: i16, right: i16) {
        self.geometry.set_width(left, right);
    }

    pub fn set_height(&mut self, left: i16, right: i16) {
        self.geometry.set_height(left, right);
    }

    pub fn set_border_radius(&mut self, left: u8, right: u8) {
        self.geometry.set_border_radius(left as i16, right as i16);
    }

    pub fn set_space_between(&mut self, space: i16) {
        self.geometry.set_space_between(space);
    }

    pub fn set_colors(&mut self, eye_color: Rgba, background: Rgba) {
        self.renderer.set_colors(eye_color, background);
    }

    // --- Expression ---

    pub fn set_mood(&mut self, mood: Mood) {
        debug!("RoboEyes: mood {:?} -> {:?}", self.expression.mood(), mood);
        self.expression.set_mood(mood);
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.geometry.look(direction);
    }

    pub fn set_curiosity(&mut self, active: bool) {
        self.expression.curious = active;
    }

    /// Single-eye mode; the right eye is hidden.
    pub fn set_cyclops(&mut self, active: bool) {
        self.expression.cyclops = active;
    }

    // --- Animations ---

    pub fn set_autoblinker(&mut self, active: bool) {
        self.scheduler.autoblink.set_active(active);
    }

    /// Blinks every `interval_s` plus up to `variation_s` seconds.
    pub fn set_autoblinker_with_interval(&mut self, active: bool, interval_s: u32, variation_s: u32) {
        self.scheduler.autoblink.configure(active, interval_s, variation_s);
    }

    pub fn set_idle_mode(&mut self, active: bool) {
        self.scheduler.idle.set_active(active);
    }

    /// Looks somewhere random every `interval_s` plus up to `variation_s` seconds.
    pub fn set_idle_mode_with_interval(&mut self, active: bool, interval_s: u32, variation_s: u32) {
        self.scheduler.idle.configure(active, interval_s, variation_s);
    }

    pub fn set_h_flicker(&mut self, active: bool, amplitude: i16) {
        debug!("RoboEyes: horizontal flicker {} ({})", active, amplitude);
        self.scheduler.h_flicker.set(active, amplitude);
    }

    pub fn set_v_flicker(&mut self, active: bool, amplitude: i16) {
        debug!("RoboEyes: vertical flicker {} ({})", active, amplitude);
        self.scheduler.v_flicker.set(active, amplitude);
    }

    /// Shakes the eyes left and right once.
    pub fn anim_confused(&mut self) {
        if self.scheduler.confused.trigger() {
            debug!("RoboEyes: confused");
        }
    }

    /// Shakes the eyes up and down once.
    pub fn anim_laugh(&mut self) {
        if self.scheduler.laugh.trigger() {
            debug!("RoboEyes: laugh");
        }
    }

    // --- Eyelids ---

    pub fn close(&mut self) {
        self.close_eyes(true, true);
    }

    pub fn open(&mut self) {
        self.open_eyes(true, true);
    }

    /// Closes and immediately reopens; the motion plays out over the next frames.
    pub fn blink(&mut self) {
        self.blink_eyes(true, true);
    }

    pub fn close_eyes(&mut self, left: bool, right: bool) {
        self.geometry.close(left, right);
    }

    pub fn open_eyes(&mut self, left: bool, right: bool) {
        self.geometry.open(left, right);
    }

    pub fn blink_eyes(&mut self, left: bool, right: bool) {
        debug!("RoboEyes: blink (left: {}, right: {})", left, right);
        self.geometry.close(left, right);
        self.geometry.open(left, right);
    }

    // --- Queries ---

    pub fn mood(&self) -> Mood {
        self.expression.mood()
    }

    pub fn expression(&self) -> &Expression {
        &self.expression
    }

    pub fn frame_interval_ms(&self) -> u32 {
        self.gate.interval_ms()
    }

    /// Number of frames rendered so far.
    pub fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }

    pub fn screen_constraint_x(&self) -> i16 {
        self.geometry.screen_constraint_x()
    }

    pub fn screen_constraint_y(&self) -> i16 {
        self.geometry.screen_constraint_y()
    }

    /// Snapshot of the geometry as the next frame would start from.
    pub fn geometry(&self) -> FrameGeometry {
        self.geometry.snapshot(self.expression.cyclops)
    }

    /// When the next autoblink is due. `None` until it first fires.
    pub fn blink_deadline_ms(&self) -> Option<u32> {
        self.scheduler.autoblink.next_fire_ms()
    }

    /// When the next idle repositioning is due. `None` until it first fires.
    pub fn idle_deadline_ms(&self) -> Option<u32> {
        self.scheduler.idle.next_fire_ms()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }
}
