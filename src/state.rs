//! Session data: score, clock, attempts and the insects currently on screen.

use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Opaque handle for a spawned insect. Assigned by the session, increasing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct InsectId(pub u32);

/// Sprite picked on the selection screen (image source + alt label).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Sprite {
    pub image_ref: String,
    pub label: String,
}

impl Sprite {
    pub fn new(image_ref: impl Into<String>, label: impl Into<String>) -> Self {
        Self { image_ref: image_ref.into(), label: label.into() }
    }
}

/// Pixel position inside the play area (top-left origin).
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self { width: 1024.0, height: 768.0 }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Insect {
    pub position: Point,
    pub rotation_deg: f64,
    pub caught: bool,
}

/// Mutable record of one play session. Only the session mutates it; the
/// host reads it through the accessors.
#[derive(Clone, Debug)]
pub struct GameState {
    elapsed_seconds: u64,
    score: u32,
    attempts_remaining: u32,
    is_over: bool,
    milestone_shown: bool,
    chosen_sprite: Option<Sprite>,
    active_insects: BTreeMap<InsectId, Insect>,
}

impl GameState {
    pub fn new(max_attempts: u32) -> Self {
        Self {
            elapsed_seconds: 0,
            score: 0,
            attempts_remaining: max_attempts,
            is_over: false,
            milestone_shown: false,
            chosen_sprite: None,
            active_insects: BTreeMap::new(),
        }
    }

    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed_seconds
    }
    pub fn score(&self) -> u32 {
        self.score
    }
    pub fn attempts_remaining(&self) -> u32 {
        self.attempts_remaining
    }
    pub fn is_over(&self) -> bool {
        self.is_over
    }
    pub fn milestone_shown(&self) -> bool {
        self.milestone_shown
    }
    pub fn chosen_sprite(&self) -> Option<&Sprite> {
        self.chosen_sprite.as_ref()
    }
    pub fn active_insects(&self) -> &BTreeMap<InsectId, Insect> {
        &self.active_insects
    }
    pub fn insect(&self, id: InsectId) -> Option<&Insect> {
        self.active_insects.get(&id)
    }

    /// Formatted clock for the current elapsed time.
    pub fn clock(&self) -> String {
        format_clock(self.elapsed_seconds)
    }

    // --- mutation (crate-internal, driven by the session) ---

    pub(crate) fn advance_clock(&mut self) {
        self.elapsed_seconds += 1;
    }

    pub(crate) fn choose_sprite(&mut self, sprite: Sprite) -> bool {
        if self.chosen_sprite.is_some() {
            return false;
        }
        self.chosen_sprite = Some(sprite);
        true
    }

    /// Returns the new score.
    pub(crate) fn add_point(&mut self) -> u32 {
        self.score = self.score.saturating_add(1);
        self.score
    }

    /// Returns the attempts left after the loss (never below zero).
    pub(crate) fn lose_attempt(&mut self) -> u32 {
        self.attempts_remaining = self.attempts_remaining.saturating_sub(1);
        self.attempts_remaining
    }

    pub(crate) fn set_milestone_shown(&mut self) {
        self.milestone_shown = true;
    }

    pub(crate) fn finish(&mut self) {
        self.is_over = true;
    }

    pub(crate) fn insert_insect(&mut self, id: InsectId, insect: Insect) {
        self.active_insects.insert(id, insect);
    }

    /// Marks the insect caught; false if it is unknown or was already caught.
    pub(crate) fn catch_insect(&mut self, id: InsectId) -> bool {
        match self.active_insects.get_mut(&id) {
            Some(insect) if !insect.caught => {
                insect.caught = true;
                true
            }
            _ => false,
        }
    }

    pub(crate) fn remove_insect(&mut self, id: InsectId) -> Option<Insect> {
        self.active_insects.remove(&id)
    }

    pub(crate) fn clear_insects(&mut self) {
        self.active_insects.clear();
    }

    /// Back to a fresh session, keeping the chosen sprite.
    pub(crate) fn reset(&mut self, max_attempts: u32) {
        let sprite = self.chosen_sprite.take();
        *self = GameState::new(max_attempts);
        self.chosen_sprite = sprite;
    }
}

/// `MM:SS`, zero padded; minutes keep growing past 59 (no hour rollover).
pub fn format_clock(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
