// src/clock.rs

//! Millisecond time source and the frame gate that throttles rendering.
//!
//! The engine never sleeps. The host calls `RoboEyes::update` as often as it
//! likes; the `FrameGate` decides whether enough time has passed since the
//! last drawn frame.

use log::warn;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Default frame interval, 50 frames per second.
pub const DEFAULT_FRAME_INTERVAL_MS: u32 = 20;

/// Supplies monotonically increasing elapsed milliseconds.
pub trait Clock {
    /// Milliseconds elapsed since the clock was created.
    fn now_ms(&self) -> u32;
}

/// Wall-clock backed by `std::time::Instant`.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u32 {
        // Wraps after ~49 days, same as a microcontroller millis() counter.
        self.start.elapsed().as_millis() as u32
    }
}

/// Hand-driven clock for tests and simulations.
///
/// Clones share the same counter, so a test can keep one handle and give
/// another to the engine.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Arc<AtomicU32>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, ms: u32) {
        self.now.store(ms, Ordering::SeqCst);
    }

    pub fn advance(&self, ms: u32) {
        self.now.fetch_add(ms, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u32 {
        self.now.load(Ordering::SeqCst)
    }
}

/// Minimum-interval check between drawn frames.
#[derive(Debug, Clone)]
pub struct FrameGate {
    interval_ms: u32,
    last_frame_ms: u32,
}

impl FrameGate {
    pub fn new(fps: i32) -> Self {
        let mut gate = Self {
            interval_ms: DEFAULT_FRAME_INTERVAL_MS,
            last_frame_ms: 0,
        };
        gate.set_fps(fps);
        gate
    }

    /// Sets the interval to `1000 / fps`. Non-positive rates are rejected and
    /// the previous interval is kept.
    pub fn set_fps(&mut self, fps: i32) -> bool {
        if fps <= 0 {
            warn!(
                "FrameGate: rejecting frame rate {}, keeping {} ms interval",
                fps, self.interval_ms
            );
            return false;
        }
        self.interval_ms = 1000 / fps as u32;
        true
    }

    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    pub fn last_frame_ms(&self) -> u32 {
        self.last_frame_ms
    }

    /// Returns true and records `now` as the last frame if a frame is due.
    pub fn try_begin_frame(&mut self, now: u32) -> bool {
        if now.wrapping_sub(self.last_frame_ms) >= self.interval_ms {
            self.last_frame_ms = now;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn fifty_fps_is_a_twenty_ms_interval() {
        assert_eq!(FrameGate::new(50).interval_ms(), 20);
    }

    #[test]
    fn non_positive_fps_keeps_previous_interval() {
        let mut gate = FrameGate::new(25);
        assert!(!gate.set_fps(0));
        assert!(!gate.set_fps(-10));
        assert_eq!(gate.interval_ms(), 40);
        assert_eq!(FrameGate::new(0).interval_ms(), DEFAULT_FRAME_INTERVAL_MS);
    }

    #[test]
    fn gate_opens_once_per_interval() {
        let mut gate = FrameGate::new(50);
        assert!(!gate.try_begin_frame(0));
        assert!(!gate.try_begin_frame(19));
        assert!(gate.try_begin_frame(20));
        assert!(!gate.try_begin_frame(39));
        assert!(gate.try_begin_frame(45));
        assert_eq!(gate.last_frame_ms(), 45);
    }

    #[test]
    fn manual_clock_handles_share_time() {
        let clock = ManualClock::new();
        let handle = clock.clone();
        handle.advance(15);
        handle.advance(5);
        assert_eq!(clock.now_ms(), 20);
        handle.set(3);
        assert_eq!(clock.now_ms(), 3);
    }
}
