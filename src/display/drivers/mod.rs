// src/display/drivers/mod.rs
//! Display surface implementations bundled with the crate.

pub mod headless;

pub use headless::HeadlessSurface;
