// src/lib.rs

//! Animated robot eyes for small monochrome and color panels.
//!
//! The host owns the loop and calls `RoboEyes::update()` as often as it
//! likes; frames are produced at the configured rate and pushed through a
//! `DisplaySurface`.

pub mod clock;
pub mod color;
pub mod config;
pub mod display;
pub mod expression;
pub mod eyes;
pub mod geometry;
pub mod rasterizer;
pub mod renderer;
pub mod scheduler;

pub use clock::{Clock, FrameGate, ManualClock, SystemClock};
pub use color::Rgba;
pub use config::Config;
pub use display::{DisplaySurface, HeadlessSurface};
pub use expression::{Direction, Expression, Mood};
pub use eyes::RoboEyes;
pub use geometry::FrameGeometry;
