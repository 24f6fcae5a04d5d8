// Shared test doubles for the native integration tests.

#![allow(dead_code)]

use std::collections::BTreeMap;

use insect_catch::{DisplaySurface, GameConfig, InsectId, Point, Screen, Session, SpawnRng, Sprite};

#[derive(Clone, Debug, PartialEq)]
pub struct ShownInsect {
    pub position: Point,
    pub sprite: Sprite,
    pub rotation_deg: f64,
    pub caught: bool,
}

/// What a player would currently see.
#[derive(Clone, Debug, PartialEq)]
pub struct View {
    pub time: String,
    pub score: u32,
    pub attempts: u32,
    pub indicators: Vec<bool>,
    pub milestone_visible: bool,
    pub game_over_visible: bool,
    pub insects: BTreeMap<InsectId, ShownInsect>,
}

/// Records every notification and keeps the resulting view.
#[derive(Debug)]
pub struct RecordingSurface {
    pub view: View,
    pub screens: Vec<Screen>,
    pub milestone_shows: usize,
    pub ignored_indicator_calls: usize,
}

impl RecordingSurface {
    /// Matches the page as served, before any input.
    pub fn new(attempts: u32) -> Self {
        Self {
            view: View {
                time: "00:00".into(),
                score: 0,
                attempts,
                indicators: vec![true; attempts as usize],
                milestone_visible: false,
                game_over_visible: false,
                insects: BTreeMap::new(),
            },
            screens: Vec::new(),
            milestone_shows: 0,
            ignored_indicator_calls: 0,
        }
    }
}

impl DisplaySurface for RecordingSurface {
    fn render_time(&mut self, clock: &str) {
        self.view.time = clock.to_string();
    }
    fn render_score(&mut self, score: u32) {
        self.view.score = score;
    }
    fn render_attempts(&mut self, attempts_remaining: u32) {
        self.view.attempts = attempts_remaining;
    }
    fn set_indicator_active(&mut self, index: usize, active: bool) {
        match self.view.indicators.get_mut(index) {
            Some(slot) => *slot = active,
            None => self.ignored_indicator_calls += 1,
        }
    }
    fn show_milestone_message(&mut self) {
        self.milestone_shows += 1;
        self.view.milestone_visible = true;
    }
    fn hide_milestone_message(&mut self) {
        self.view.milestone_visible = false;
    }
    fn show_game_over_overlay(&mut self) {
        self.view.game_over_visible = true;
    }
    fn hide_game_over_overlay(&mut self) {
        self.view.game_over_visible = false;
    }
    fn spawn_insect_visual(&mut self, id: InsectId, position: Point, sprite: &Sprite, rotation_deg: f64) {
        self.view.insects.insert(
            id,
            ShownInsect { position, sprite: sprite.clone(), rotation_deg, caught: false },
        );
    }
    fn mark_insect_caught(&mut self, id: InsectId) {
        if let Some(i) = self.view.insects.get_mut(&id) {
            i.caught = true;
        }
    }
    fn remove_insect(&mut self, id: InsectId) {
        self.view.insects.remove(&id);
    }
    fn remove_all_insects(&mut self) {
        self.view.insects.clear();
    }
    fn advance_screen(&mut self, screen: Screen) {
        self.screens.push(screen);
    }
}

pub type TestSession = Session<RecordingSurface, SpawnRng>;

pub fn sprite_a() -> Sprite {
    Sprite::new("http://pngimg.com/uploads/fly/fly_PNG3946.png", "fly")
}

pub fn new_session(seed: u64) -> TestSession {
    let config = GameConfig::default();
    let surface = RecordingSurface::new(config.max_attempts);
    Session::new(config, surface, SpawnRng::from_seed(seed))
}

/// start -> choose sprite A at t=0 -> first insect visible at t=1000.
pub fn playing(seed: u64) -> TestSession {
    use insect_catch::InputEvent;
    let mut s = new_session(seed);
    s.handle(InputEvent::StartPressed, 0);
    s.handle(InputEvent::SpriteChosen(sprite_a()), 0);
    s.advance(1_000);
    s
}

pub fn first_uncaught(s: &TestSession) -> Option<InsectId> {
    s.state()
        .active_insects()
        .iter()
        .find(|(_, i)| !i.caught)
        .map(|(id, _)| *id)
}

pub fn miss(s: &mut TestSession, now: u64) {
    s.handle(
        insect_catch::InputEvent::SurfaceClicked { point: Point { x: 5.0, y: 5.0 }, hit: None },
        now,
    );
}

pub fn hit(s: &mut TestSession, id: InsectId, now: u64) {
    s.handle(
        insect_catch::InputEvent::SurfaceClicked { point: Point { x: 300.0, y: 300.0 }, hit: Some(id) },
        now,
    );
}

/// Catch `n` insects, one per simulated second starting at `start`.
/// Returns the time of the last catch.
pub fn catch_many(s: &mut TestSession, n: usize, start: u64) -> u64 {
    let mut now = start;
    for _ in 0..n {
        s.advance(now);
        let id = first_uncaught(s).expect("an insect should be on screen");
        hit(s, id, now);
        now += 1_000;
    }
    now - 1_000
}
