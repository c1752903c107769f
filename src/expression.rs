// src/expression.rs

//! Mood, gaze direction and the expression modifiers layered on top of them.

use serde::{Deserialize, Serialize};

/// Facial mood. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Mood {
    #[default]
    Default,
    Tired,
    Angry,
    Happy,
}

/// Predefined gaze targets, named by compass point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    Center,
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
}

impl Direction {
    /// Left-eye target for this direction, given the largest allowed
    /// position on each axis.
    pub fn target(self, max_x: i16, max_y: i16) -> (i16, i16) {
        match self {
            Direction::N => (max_x / 2, 0),
            Direction::NE => (max_x, 0),
            Direction::E => (max_x, max_y / 2),
            Direction::SE => (max_x, max_y),
            Direction::S => (max_x / 2, max_y),
            Direction::SW => (0, max_y),
            Direction::W => (0, max_y / 2),
            Direction::NW => (0, 0),
            Direction::Center => (max_x / 2, max_y / 2),
        }
    }
}

/// Current mood plus the independent curiosity and cyclops modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Expression {
    mood: Mood,
    pub curious: bool,
    pub cyclops: bool,
}

impl Expression {
    pub fn mood(&self) -> Mood {
        self.mood
    }

    /// The only way to change mood; replaces whatever was active.
    pub fn set_mood(&mut self, mood: Mood) {
        self.mood = mood;
    }

    pub fn is_tired(&self) -> bool {
        self.mood == Mood::Tired
    }

    pub fn is_angry(&self) -> bool {
        self.mood == Mood::Angry
    }

    pub fn is_happy(&self) -> bool {
        self.mood == Mood::Happy
    }
}
