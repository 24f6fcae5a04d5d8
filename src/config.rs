//! Tunable constants for a play session.
//!
//! Defaults reproduce the classic game exactly; the browser entry can
//! override them from JSON when the `serde_json` feature is enabled.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Longest delay or clock period a config may ask for (one hour).
pub const MAX_DELAY_MS: u64 = 3_600_000;

/// Timing and rule constants used by [`crate::session::Session`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Attempts a player starts with; also the number of attempt indicators.
    pub max_attempts: u32,
    /// Score at which the milestone message appears (the classic "more than 19").
    pub milestone_score: u32,
    /// Delay before the first insect after sprite selection or restart.
    pub first_spawn_delay_ms: u64,
    /// One extra spawn is scheduled per entry after every catch.
    pub catch_spawn_delays_ms: Vec<u64>,
    /// How long a caught insect stays on screen before removal.
    pub removal_delay_ms: u64,
    /// Period of the elapsed-time clock.
    pub tick_interval_ms: u64,
    /// Excluded band (px) on every viewport edge for spawn positions.
    pub spawn_margin_px: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            milestone_score: 20,
            first_spawn_delay_ms: 1_000,
            catch_spawn_delays_ms: vec![1_000, 1_500],
            removal_delay_ms: 2_000,
            tick_interval_ms: 1_000,
            spawn_margin_px: 100.0,
        }
    }
}

impl GameConfig {
    /// Parse a (possibly partial) JSON object; missing keys keep their defaults.
    #[cfg(feature = "serde_json")]
    pub fn from_json(json: &str) -> Result<Self, crate::error::GameError> {
        let cfg: GameConfig = serde_json::from_str(json)?;
        cfg.validated()
    }

    /// Reject values the session cannot run with.
    pub fn validated(self) -> Result<Self, crate::error::GameError> {
        use crate::error::GameError;
        if self.max_attempts == 0 {
            return Err(GameError::InvalidConfig("max_attempts must be at least 1"));
        }
        if self.tick_interval_ms == 0 {
            return Err(GameError::InvalidConfig("tick_interval_ms must be positive"));
        }
        let delays = [self.first_spawn_delay_ms, self.removal_delay_ms, self.tick_interval_ms];
        if delays
            .iter()
            .chain(self.catch_spawn_delays_ms.iter())
            .any(|d| *d > MAX_DELAY_MS)
        {
            return Err(GameError::InvalidConfig("delays must not exceed one hour"));
        }
        if !(self.spawn_margin_px.is_finite() && self.spawn_margin_px >= 0.0) {
            return Err(GameError::InvalidConfig("spawn_margin_px must be a non-negative number"));
        }
        Ok(self)
    }
}
