//! Running score and per-tick feedback collected by the engine.
//!
//! Stored in `SimulationEngine`, NOT as ECS entities.

use barrage_core::constants::{COIN_DIVISOR, MAX_PLAYERS, POPUP_VISIBLE_MS};
use barrage_core::cooldown::Cooldown;
use barrage_core::events::SoundCue;
use barrage_core::types::PlayerId;

/// Score, coins and counters for the current level.
#[derive(Debug, Clone, Default)]
pub struct ScoreState {
    per_player: [u32; MAX_PLAYERS],
    pub coins: u32,
    pub bullets_shot: u32,
    pub ships_destroyed: u32,
}

impl ScoreState {
    fn slot(player: PlayerId) -> usize {
        player.slot().min(MAX_PLAYERS - 1)
    }

    pub fn score(&self, player: PlayerId) -> u32 {
        self.per_player[Self::slot(player)]
    }

    /// Credit a destroyed unit worth `points` to `owner`, or to the default
    /// player when the owner is unknown. Score, coins and the kill counter
    /// move together.
    pub fn credit_kill(&mut self, owner: Option<PlayerId>, points: u32) {
        let player = owner.unwrap_or(PlayerId::DEFAULT);
        self.per_player[Self::slot(player)] += points;
        self.coins += points / COIN_DIVISOR;
        self.ships_destroyed += 1;
    }
}

/// Transient HUD text.
#[derive(Debug, Clone)]
pub struct Popup {
    pub text: String,
    pub life: Cooldown,
}

/// Audio cues, achievement unlocks and popups raised during one tick.
#[derive(Debug, Default)]
pub struct Feedback {
    pub audio: Vec<SoundCue>,
    pub achievements: Vec<String>,
    pub popups: Vec<Popup>,
}

impl Feedback {
    pub fn play(&mut self, cue: SoundCue) {
        self.audio.push(cue);
    }

    pub fn unlock(&mut self, achievement: &str) {
        self.achievements.push(achievement.to_string());
    }

    pub fn popup(&mut self, text: String, now_ms: u64) {
        self.popups.push(Popup {
            text,
            life: Cooldown::started(POPUP_VISIBLE_MS, now_ms),
        });
    }
}
