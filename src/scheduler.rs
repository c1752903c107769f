// src/scheduler.rs

//! Timer-driven animations: autoblink, idle wandering, confused and laugh
//! shakes, and the per-axis flicker they drive.
//!
//! Each animation is a small state machine polled once per frame with the
//! same `now`. None of them sleep or spawn anything; firing only mutates
//! `GeometryEngine` targets.

use crate::geometry::GeometryEngine;
use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Length of the confused/laugh shake.
pub const DEFAULT_SHAKE_DURATION_MS: u32 = 500;
pub const CONFUSED_AMPLITUDE: i16 = 20;
pub const LAUGH_AMPLITUDE: i16 = 5;

/// Whether `deadline` has been reached on a wrapping millisecond clock.
///
/// Deadlines less than half the clock range behind `now` count as reached.
fn is_due(now: u32, deadline: u32) -> bool {
    now.wrapping_sub(deadline) < u32::MAX / 2
}

/// Uniform draw from `0..bound`, or 0 for an empty range.
fn random_below<R: Rng>(rng: &mut R, bound: u32) -> u32 {
    if bound == 0 {
        0
    } else {
        rng.gen_range(0..bound)
    }
}

/// A timer that fires repeatedly at `interval + uniform(0, variation)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecurringTimer {
    active: bool,
    interval_ms: u32,
    variation_ms: u32,
    /// `None` until the first fire after activation, which is immediate.
    next_fire_ms: Option<u32>,
}

impl RecurringTimer {
    pub fn new(interval_ms: u32, variation_ms: u32) -> Self {
        Self {
            active: false,
            interval_ms,
            variation_ms,
            next_fire_ms: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn set_active(&mut self, active: bool) {
        if active && !self.active {
            self.next_fire_ms = None;
        }
        self.active = active;
    }

    /// Sets interval and variation in whole seconds.
    pub fn configure(&mut self, active: bool, interval_s: u32, variation_s: u32) {
        self.set_active(active);
        self.interval_ms = interval_s.saturating_mul(1000);
        self.variation_ms = variation_s.saturating_mul(1000);
    }

    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    pub fn variation_ms(&self) -> u32 {
        self.variation_ms
    }

    /// Timestamp at or after which the timer fires next. `None` while it
    /// is due on the next poll.
    pub fn next_fire_ms(&self) -> Option<u32> {
        self.next_fire_ms
    }

    /// Fires and reschedules if active and due. Deadlines wrap with the clock.
    pub fn poll<R: Rng>(&mut self, now: u32, rng: &mut R) -> bool {
        if !self.active {
            return false;
        }
        if let Some(deadline) = self.next_fire_ms {
            if !is_due(now, deadline) {
                return false;
            }
        }
        let jitter = random_below(rng, self.variation_ms);
        self.next_fire_ms = Some(now.wrapping_add(self.interval_ms).wrapping_add(jitter));
        true
    }
}

/// Per-axis oscillating offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Flicker {
    pub active: bool,
    pub amplitude: i16,
    alternate: bool,
}

impl Flicker {
    pub fn set(&mut self, active: bool, amplitude: i16) {
        self.active = active;
        self.amplitude = amplitude;
    }

    /// This frame's offset, flipping sign every call while active.
    pub fn next_offset(&mut self) -> Option<i16> {
        if !self.active {
            return None;
        }
        let offset = if self.alternate {
            self.amplitude
        } else {
            -self.amplitude
        };
        self.alternate = !self.alternate;
        Some(offset)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ShakePhase {
    Idle,
    /// Requested, flicker starts on the next poll.
    Armed,
    Holding { started_ms: u32 },
}

/// What a shake poll asks the caller to do with its flicker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShakeEvent {
    Start(i16),
    Stop,
}

/// One-shot flicker burst of fixed duration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShakeAnimation {
    phase: ShakePhase,
    amplitude: i16,
    duration_ms: u32,
}

impl ShakeAnimation {
    pub fn new(amplitude: i16, duration_ms: u32) -> Self {
        Self {
            phase: ShakePhase::Idle,
            amplitude,
            duration_ms,
        }
    }

    /// Requests a shake. Ignored while one is already pending or running.
    pub fn trigger(&mut self) -> bool {
        if self.phase != ShakePhase::Idle {
            return false;
        }
        self.phase = ShakePhase::Armed;
        true
    }

    pub fn is_running(&self) -> bool {
        self.phase != ShakePhase::Idle
    }

    pub fn poll(&mut self, now: u32) -> Option<ShakeEvent> {
        match self.phase {
            ShakePhase::Idle => None,
            ShakePhase::Armed => {
                self.phase = ShakePhase::Holding { started_ms: now };
                Some(ShakeEvent::Start(self.amplitude))
            }
            ShakePhase::Holding { started_ms } => {
                if now.wrapping_sub(started_ms) >= self.duration_ms {
                    self.phase = ShakePhase::Idle;
                    Some(ShakeEvent::Stop)
                } else {
                    None
                }
            }
        }
    }
}

fn apply_shake(flicker: &mut Flicker, event: Option<ShakeEvent>) {
    match event {
        Some(ShakeEvent::Start(amplitude)) => flicker.set(true, amplitude),
        Some(ShakeEvent::Stop) => flicker.set(false, 0),
        None => {}
    }
}

/// All animations sharing one clock reading per frame.
pub struct AnimationScheduler {
    pub autoblink: RecurringTimer,
    pub idle: RecurringTimer,
    pub confused: ShakeAnimation,
    pub laugh: ShakeAnimation,
    pub h_flicker: Flicker,
    pub v_flicker: Flicker,
    rng: StdRng,
}

impl AnimationScheduler {
    /// `seed` fixes the random sequence; `None` seeds from the OS.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            autoblink: RecurringTimer::new(1000, 4000),
            idle: RecurringTimer::new(1000, 3000),
            confused: ShakeAnimation::new(CONFUSED_AMPLITUDE, DEFAULT_SHAKE_DURATION_MS),
            laugh: ShakeAnimation::new(LAUGH_AMPLITUDE, DEFAULT_SHAKE_DURATION_MS),
            h_flicker: Flicker {
                amplitude: 2,
                ..Default::default()
            },
            v_flicker: Flicker {
                amplitude: 10,
                ..Default::default()
            },
            rng,
        }
    }

    /// Runs every due transition and applies this frame's flicker offsets.
    pub fn tick(&mut self, now: u32, geometry: &mut GeometryEngine) {
        if self.autoblink.poll(now, &mut self.rng) {
            debug!(
                "AnimationScheduler: autoblink at {} ms, next at {} ms",
                now,
                self.autoblink.next_fire_ms().unwrap_or_default()
            );
            geometry.close(true, true);
            geometry.open(true, true);
        }

        apply_shake(&mut self.v_flicker, self.laugh.poll(now));
        apply_shake(&mut self.h_flicker, self.confused.poll(now));

        if self.idle.poll(now, &mut self.rng) {
            let max_x = geometry.screen_constraint_x().max(0) as u32;
            let max_y = geometry.screen_constraint_y().max(0) as u32;
            let x = random_below(&mut self.rng, max_x) as i16;
            let y = random_below(&mut self.rng, max_y) as i16;
            debug!(
                "AnimationScheduler: idle target ({}, {}), next at {} ms",
                x,
                y,
                self.idle.next_fire_ms().unwrap_or_default()
            );
            geometry.set_left_target(x, y);
        }

        if let Some(dx) = self.h_flicker.next_offset() {
            geometry.shift_x(dx);
        }
        if let Some(dy) = self.v_flicker.next_offset() {
            geometry.shift_y(dy);
        }
    }
}
