//! Events emitted by the simulation for audio and achievement feedback,
//! and the narrow service interfaces that receive them.

use serde::{Deserialize, Serialize};

use crate::enums::*;

/// Fire-and-forget audio cues keyed by gameplay event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SoundCue {
    ShotFired,
    Hit,
    Explosion,
    PlayerHit,
    Pickup { item: ItemKind },
    Teleport,
    BeamFired,
    LaserCharge,
    BossAppear { archetype: BossArchetype },
    BossDefeated { archetype: BossArchetype },
    LevelComplete,
    GameOver,
    /// Start (or switch to) a looping music track.
    Music { track: String },
}

/// Receives audio cues. Implementations must not feed back into the simulation.
pub trait SoundSink: Send {
    fn play(&mut self, cue: &SoundCue);
}

/// Receives achievement unlocks.
pub trait AchievementSink: Send {
    fn unlock(&mut self, achievement: &str);
}

/// Discards every cue.
#[derive(Debug, Default)]
pub struct NullSoundSink;

impl SoundSink for NullSoundSink {
    fn play(&mut self, _cue: &SoundCue) {}
}

/// Discards every unlock.
#[derive(Debug, Default)]
pub struct NullAchievementSink;

impl AchievementSink for NullAchievementSink {
    fn unlock(&mut self, _achievement: &str) {}
}

/// Achievement fired on the first enemy destroyed in a session.
pub const ACHIEVEMENT_FIRST_KILL: &str = "first_kill";
/// Achievement fired when any boss is defeated.
pub const ACHIEVEMENT_BOSS_DOWN: &str = "boss_down";
