// src/config.rs

//! Defines the configuration structures for the eyes engine.
//!
//! Every struct can be deserialized from a partial document: missing fields
//! fall back to the defaults below, which match a 128x64 OLED running at
//! 50 frames per second.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::color::Rgba;
use crate::geometry::{DEFAULT_CURIOSITY_MARGIN, DEFAULT_CURIOSITY_OFFSET};
use crate::scheduler::{CONFUSED_AMPLITUDE, DEFAULT_SHAKE_DURATION_MS, LAUGH_AMPLITUDE};

// --- Top-Level Configuration Structure ---

/// Represents the complete configuration for a `RoboEyes` instance.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Frame rate and colors.
    pub display: DisplayConfig,
    /// Default eye shape.
    pub eyes: EyeConfig,
    /// Automatic blinking.
    pub autoblink: TimerConfig,
    /// Idle wandering.
    pub idle: TimerConfig,
    /// Shake and curiosity tuning.
    pub animation: AnimationConfig,
    /// Fixed seed for random intervals and idle targets. `None` seeds from the OS.
    pub rng_seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            display: DisplayConfig::default(),
            eyes: EyeConfig::default(),
            autoblink: TimerConfig::autoblink(),
            idle: TimerConfig::default(),
            animation: AnimationConfig::default(),
            rng_seed: None,
        }
    }
}

impl Config {
    /// Parses a JSON document. Absent fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse eyes configuration")
    }
}

// --- Display Configuration ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DisplayConfig {
    /// Maximum frames per second. Non-positive values are rejected.
    pub fps: i32,
    pub eye_color: Rgba,
    pub background: Rgba,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig {
            fps: 50,
            eye_color: Rgba::WHITE,
            background: Rgba::BLACK,
        }
    }
}

// --- Eye Configuration ---

/// Default size and spacing, applied to both eyes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EyeConfig {
    pub width: i16,
    pub height: i16,
    pub border_radius: i16,
    pub space_between: i16,
}

impl Default for EyeConfig {
    fn default() -> Self {
        EyeConfig {
            width: 36,
            height: 36,
            border_radius: 8,
            space_between: 10,
        }
    }
}

// --- Timer Configuration ---

/// A recurring animation: fires every `interval_s` plus up to `variation_s`
/// extra seconds. Set `variation_s` to 0 for a fixed interval.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TimerConfig {
    pub active: bool,
    pub interval_s: u32,
    pub variation_s: u32,
}

impl Default for TimerConfig {
    fn default() -> Self {
        TimerConfig {
            active: false,
            interval_s: 1,
            variation_s: 3,
        }
    }
}

impl TimerConfig {
    /// Autoblink defaults: one to five seconds between blinks.
    pub fn autoblink() -> Self {
        TimerConfig {
            variation_s: 4,
            ..Default::default()
        }
    }
}

// --- Animation Configuration ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AnimationConfig {
    /// How long confused and laugh shakes last.
    pub shake_duration_ms: u32,
    pub confused_amplitude: i16,
    pub laugh_amplitude: i16,
    /// Height added to an eye gazing at a screen edge while curious.
    pub curiosity_offset: i16,
    /// Distance from the edge that counts as "at the edge".
    pub curiosity_margin: i16,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        AnimationConfig {
            shake_duration_ms: DEFAULT_SHAKE_DURATION_MS,
            confused_amplitude: CONFUSED_AMPLITUDE,
            laugh_amplitude: LAUGH_AMPLITUDE,
            curiosity_offset: DEFAULT_CURIOSITY_OFFSET,
            curiosity_margin: DEFAULT_CURIOSITY_MARGIN,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn empty_document_yields_defaults() {
        let config = Config::from_json_str("{}").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.display.fps, 50);
        assert_eq!(config.eyes.width, 36);
    }

    #[test]
    fn partial_sections_keep_remaining_defaults() {
        let config = Config::from_json_str(
            r#"{ "eyes": { "width": 30 }, "idle": { "active": true, "variation_s": 0 }, "rng_seed": 4 }"#,
        )
        .unwrap();
        assert_eq!(config.eyes.width, 30);
        assert_eq!(config.eyes.height, 36);
        assert!(config.idle.active);
        assert_eq!(config.idle.interval_s, 1);
        assert_eq!(config.idle.variation_s, 0);
        assert_eq!(config.rng_seed, Some(4));
    }

    #[test]
    fn malformed_document_is_an_error() {
        let err = Config::from_json_str("{ \"display\": 3 }").unwrap_err();
        assert!(err.to_string().contains("Failed to parse"));
    }
}
