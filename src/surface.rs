//! Rendering contract the session notifies. The session never reads back
//! from the surface; player input reaches it only as [`crate::session::InputEvent`]s.

use crate::state::{InsectId, Point, Sprite};

/// Screens in presentation order. Advancing slides the given screen away.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    Intro,
    SpriteSelection,
}

impl Screen {
    pub fn index(self) -> usize {
        match self {
            Screen::Intro => 0,
            Screen::SpriteSelection => 1,
        }
    }
}

pub trait DisplaySurface {
    /// `clock` is already formatted as `MM:SS`.
    fn render_time(&mut self, clock: &str);
    fn render_score(&mut self, score: u32);
    fn render_attempts(&mut self, attempts_remaining: u32);
    /// Indices outside the indicator row must be ignored.
    fn set_indicator_active(&mut self, index: usize, active: bool);
    fn show_milestone_message(&mut self);
    fn hide_milestone_message(&mut self);
    fn show_game_over_overlay(&mut self);
    fn hide_game_over_overlay(&mut self);
    fn spawn_insect_visual(&mut self, id: InsectId, position: Point, sprite: &Sprite, rotation_deg: f64);
    fn mark_insect_caught(&mut self, id: InsectId);
    fn remove_insect(&mut self, id: InsectId);
    fn remove_all_insects(&mut self);
    fn advance_screen(&mut self, screen: Screen);
}
