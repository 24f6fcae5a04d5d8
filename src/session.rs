//! The game session controller.
//!
//! Owns the [`GameState`], applies the spawn / catch / miss / restart rules
//! and pushes every visible change to a [`DisplaySurface`]. All delayed work
//! (spawns, removals, the clock) goes through an epoch-tagged [`Timeline`]
//! that the host pumps with [`Session::advance`].

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::position::{RandomSource, random_location, random_rotation};
use crate::state::{GameState, Insect, InsectId, Point, Sprite, Viewport, format_clock};
use crate::surface::{DisplaySurface, Screen};
use crate::timeline::{Epoch, Millis, TimedAction, Timeline};

/// Discrete player input, in delivery order.
#[derive(Clone, Debug, PartialEq)]
pub enum InputEvent {
    StartPressed,
    SpriteChosen(Sprite),
    /// A click inside the play area; `hit` is the insect under the pointer, if any.
    SurfaceClicked { point: Point, hit: Option<InsectId> },
    RestartPressed,
}

/// Read-only copy of the session for debugging / host inspection.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SessionSnapshot {
    pub clock: String,
    pub elapsed_seconds: u64,
    pub score: u32,
    pub attempts_remaining: u32,
    pub is_over: bool,
    pub milestone_shown: bool,
    pub sprite: Option<Sprite>,
    pub insects: Vec<(InsectId, Insect)>,
}

pub struct Session<S, R> {
    config: GameConfig,
    state: GameState,
    surface: S,
    rng: R,
    timeline: Timeline,
    epoch: Epoch,
    viewport: Viewport,
    next_insect: u32,
}

impl<S: DisplaySurface, R: RandomSource> Session<S, R> {
    pub fn new(config: GameConfig, surface: S, rng: R) -> Self {
        let state = GameState::new(config.max_attempts);
        Self {
            config,
            state,
            surface,
            rng,
            timeline: Timeline::new(),
            epoch: Epoch::default(),
            viewport: Viewport::default(),
            next_insect: 0,
        }
    }

    // --- accessors ---

    pub fn state(&self) -> &GameState {
        &self.state
    }
    pub fn config(&self) -> &GameConfig {
        &self.config
    }
    pub fn surface(&self) -> &S {
        &self.surface
    }
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }
    pub fn epoch(&self) -> Epoch {
        self.epoch
    }
    /// Scheduled actions not yet fired, stale ones included.
    pub fn pending_actions(&self) -> usize {
        self.timeline.len()
    }
    pub fn next_due(&self) -> Option<Millis> {
        self.timeline.next_due()
    }
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            clock: self.state.clock(),
            elapsed_seconds: self.state.elapsed_seconds(),
            score: self.state.score(),
            attempts_remaining: self.state.attempts_remaining(),
            is_over: self.state.is_over(),
            milestone_shown: self.state.milestone_shown(),
            sprite: self.state.chosen_sprite().cloned(),
            insects: self
                .state
                .active_insects()
                .iter()
                .map(|(id, insect)| (*id, insect.clone()))
                .collect(),
        }
    }

    // --- input ---

    pub fn handle(&mut self, event: InputEvent, now: Millis) {
        match event {
            InputEvent::StartPressed => self.on_start_pressed(),
            InputEvent::SpriteChosen(sprite) => self.on_sprite_chosen(sprite, now),
            InputEvent::SurfaceClicked { point, hit } => self.on_surface_click(point, hit, now),
            InputEvent::RestartPressed => self.restart(now),
        }
    }

    pub fn on_start_pressed(&mut self) {
        self.surface.advance_screen(Screen::Intro);
    }

    /// Accepted once per session; later choices are dropped.
    pub fn on_sprite_chosen(&mut self, sprite: Sprite, now: Millis) {
        let label = sprite.label.clone();
        if !self.state.choose_sprite(sprite) {
            log::debug!("sprite `{label}` ignored: a sprite is already chosen");
            return;
        }
        log::info!("sprite `{label}` chosen, session starting");
        self.surface.advance_screen(Screen::SpriteSelection);
        self.schedule(now, self.config.first_spawn_delay_ms, TimedAction::Spawn);
        self.schedule(now, self.config.tick_interval_ms, TimedAction::Tick);
    }

    pub fn on_surface_click(&mut self, point: Point, hit: Option<InsectId>, now: Millis) {
        if self.state.is_over() || self.state.chosen_sprite().is_none() {
            return;
        }
        match hit {
            None => {
                log::trace!("miss at ({:.0}, {:.0})", point.x, point.y);
                self.miss();
            }
            Some(id) => self.catch_insect(id, now),
        }
    }

    // --- rules ---

    /// One clock beat. No-op once the game is over.
    pub fn tick(&mut self) {
        if self.state.is_over() || self.state.chosen_sprite().is_none() {
            return;
        }
        self.state.advance_clock();
        let clock = self.state.clock();
        self.surface.render_time(&clock);
    }

    fn catch_insect(&mut self, id: InsectId, now: Millis) {
        if !self.state.catch_insect(id) {
            log::debug!("click on {id:?} ignored: already caught or gone");
            return;
        }
        let score = self.state.add_point();
        self.surface.render_score(score);
        if score >= self.config.milestone_score && !self.state.milestone_shown() {
            self.state.set_milestone_shown();
            self.surface.show_milestone_message();
        }
        self.surface.mark_insect_caught(id);
        self.schedule(now, self.config.removal_delay_ms, TimedAction::RemoveInsect(id));
        for delay in self.config.catch_spawn_delays_ms.clone() {
            self.schedule(now, delay, TimedAction::Spawn);
        }
    }

    fn miss(&mut self) {
        let remaining = self.state.lose_attempt();
        self.surface.render_attempts(remaining);
        // Indicators go dark in loss order: first miss -> 0, second -> 1, ...
        if let Some(lost) = self.config.max_attempts.checked_sub(remaining + 1) {
            self.surface.set_indicator_active(lost as usize, false);
        }
        if remaining == 0 {
            self.end_game();
        }
    }

    fn end_game(&mut self) {
        if self.state.is_over() {
            return;
        }
        log::info!(
            "game over: score {} after {}",
            self.state.score(),
            self.state.clock()
        );
        self.state.finish();
        self.epoch = self.epoch.next();
        self.state.clear_insects();
        self.surface.remove_all_insects();
        self.surface.show_game_over_overlay();
    }

    /// Fresh session with the same sprite; the clock restarts with a new phase.
    pub fn restart(&mut self, now: Millis) {
        log::info!("restart");
        self.state.reset(self.config.max_attempts);
        self.epoch = self.epoch.next();

        self.surface.render_time(&format_clock(0));
        self.surface.render_score(0);
        self.surface.render_attempts(self.config.max_attempts);
        self.surface.hide_milestone_message();
        self.surface.hide_game_over_overlay();
        for i in 0..self.config.max_attempts as usize {
            self.surface.set_indicator_active(i, true);
        }
        self.surface.remove_all_insects();

        self.schedule(now, self.config.first_spawn_delay_ms, TimedAction::Spawn);
        if self.state.chosen_sprite().is_some() {
            self.schedule(now, self.config.tick_interval_ms, TimedAction::Tick);
        }
    }

    fn spawn(&mut self) {
        if self.state.is_over() {
            return;
        }
        let Some(sprite) = self.state.chosen_sprite().cloned() else {
            return;
        };
        let position = random_location(self.viewport, self.config.spawn_margin_px, &mut self.rng);
        let rotation_deg = random_rotation(&mut self.rng);
        let id = InsectId(self.next_insect);
        self.next_insect = self.next_insect.wrapping_add(1);
        self.state.insert_insect(id, Insect { position, rotation_deg, caught: false });
        self.surface.spawn_insect_visual(id, position, &sprite, rotation_deg);
    }

    // --- timers ---

    /// Queue `action` for `from + delay` in the current epoch. Saturates, so an
    /// unvalidated huge delay parks the action at the end of time.
    fn schedule(&mut self, from: Millis, delay: u64, action: TimedAction) {
        self.timeline.schedule(from.saturating_add(delay), self.epoch, action);
    }

    /// Fire every action due at or before `now`, in due order.
    pub fn advance(&mut self, now: Millis) {
        while let Some(item) = self.timeline.pop_due(now) {
            if item.epoch != self.epoch {
                log::trace!("dropping stale {:?} from {:?}", item.action, item.epoch);
                continue;
            }
            match item.action {
                TimedAction::Spawn => self.spawn(),
                TimedAction::RemoveInsect(id) => {
                    if self.state.remove_insect(id).is_some() {
                        self.surface.remove_insect(id);
                    }
                }
                TimedAction::Tick => {
                    self.tick();
                    if !self.state.is_over() {
                        // stay on the timer phase even when a frame arrives late
                        self.schedule(item.due, self.config.tick_interval_ms, TimedAction::Tick);
                    }
                }
            }
        }
    }
}
