// src/main.rs

//! Demo: runs the eyes on a headless 128x64 surface for a few seconds with
//! autoblink and idle wandering enabled, then prints the last frame.

use robo_eyes::{Config, HeadlessSurface, Mood, RoboEyes, SystemClock};

use anyhow::Context;
use log::info;
use std::thread;
use std::time::{Duration, Instant};

const SCREEN_WIDTH: i16 = 128;
const SCREEN_HEIGHT: i16 = 64;
const RUN_TIME: Duration = Duration::from_secs(4);
const TICK: Duration = Duration::from_millis(5);

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_micros()
        .init();

    // Optional JSON config path as the first argument.
    let config = match std::env::args().nth(1) {
        Some(path) => {
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file '{}'", path))?;
            Config::from_json_str(&text)?
        }
        None => Config::default(),
    };
    info!("Configuration loaded: {:?}", config);

    let surface = HeadlessSurface::new(SCREEN_WIDTH, SCREEN_HEIGHT)
        .with_background(config.display.background);
    let mut eyes = RoboEyes::from_config(surface, SystemClock::new(), &config);
    eyes.set_autoblinker_with_interval(true, 3, 2);
    eyes.set_idle_mode_with_interval(true, 2, 2);

    let started = Instant::now();
    let mut moods = [Mood::Happy, Mood::Tired, Mood::Angry, Mood::Default]
        .into_iter()
        .cycle();
    let mut next_mood_at = Duration::from_secs(1);

    while started.elapsed() < RUN_TIME {
        if started.elapsed() >= next_mood_at {
            if let Some(mood) = moods.next() {
                eyes.set_mood(mood);
            }
            next_mood_at += Duration::from_secs(1);
        }
        eyes.update().context("Frame update failed")?;
        thread::sleep(TICK);
    }

    info!(
        "Drew {} frames in {:?} ({} ms interval)",
        eyes.frames_drawn(),
        started.elapsed(),
        eyes.frame_interval_ms()
    );
    println!("{}", eyes.surface().to_ascii());
    Ok(())
}
