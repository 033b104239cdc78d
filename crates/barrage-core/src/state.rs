//! Render snapshot and end-of-level aggregate.
//!
//! The snapshot is the complete read-only view handed to the renderer after
//! each tick. It never feeds back into the simulation.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::SoundCue;
use crate::types::{PlayerId, SimTime};

/// Complete visible state produced after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub stage: Stage,
    pub drawables: Vec<Drawable>,
    pub hud: HudView,
    pub popups: Vec<PopupView>,
    pub hints: Vec<PatternHint>,
    pub audio_events: Vec<SoundCue>,
}

/// One drawable entity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Drawable {
    pub kind: DrawKind,
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    /// Rotation in radians (lasers, beams, missiles); 0 otherwise.
    pub rotation: f32,
    /// 0xRRGGBB tint.
    pub color: u32,
}

/// Minimal HUD contract.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HudView {
    pub level_name: String,
    pub players: Vec<PlayerHud>,
    pub coins: u32,
    pub elapsed_secs: f64,
    /// Boss health ratio while a boss is alive.
    pub boss_health: Option<f32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerHud {
    pub player: PlayerId,
    pub score: u32,
    pub lives: u32,
    /// Remaining teleport cooldown in `[0, 1]` (0 = ready).
    pub teleport_cooldown: f32,
    /// Charge progress in `[0, 1]` while charging.
    pub charge: f32,
    pub bombs: u32,
}

/// Transient text overlay.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PopupView {
    pub text: String,
    /// Remaining visibility in `[0, 1]`, for fading.
    pub visibility: f32,
}

/// Visual hints drawn for active boss patterns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PatternHint {
    /// Dash telegraph: a line with an arrowhead at `to`.
    DashPath { from: Vec2, to: Vec2 },
    /// Area-denial lanes; `front_y` is set once the sweep is firing.
    LaneOverlay {
        lanes: usize,
        safe_lane: usize,
        lane_width: f32,
        front_y: Option<f32>,
    },
    /// Outline of a gravity well's reach.
    GravityOutline { center: Vec2, radius: f32 },
}

/// State handed to the save/shop layer when a level ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelResult {
    pub level: u32,
    pub cleared: bool,
    pub score_per_player: Vec<u32>,
    pub lives_per_player: Vec<u32>,
    pub bullets_shot: u32,
    pub ships_destroyed: u32,
    pub coins: u32,
}
