// src/display/mod.rs
//! Display capability contract and bundled surfaces.
//!
//! - DisplaySurface: the four operations the engine needs from a panel
//! - drivers: concrete surfaces (headless in-memory framebuffer)

pub mod drivers;
pub mod surface;

pub use drivers::HeadlessSurface;
pub use surface::DisplaySurface;
