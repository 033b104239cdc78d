//! Player commands delivered by the input source.
//!
//! Commands are queued and processed at the next tick boundary. The engine
//! is agnostic to the physical bindings that produced them.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::PlayerId;

/// All possible player actions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Ship control ---
    /// Move one step in a direction.
    Move {
        player: PlayerId,
        direction: Direction,
    },
    /// Fire the main gun (and any sub-ships).
    Fire { player: PlayerId },
    /// Jump a fixed distance, gated by the teleport cooldown.
    Teleport {
        player: PlayerId,
        direction: Direction,
    },
    /// Begin charging the beam; locks movement.
    StartCharge { player: PlayerId },
    /// Release the charge, firing the beam if charged long enough.
    StopCharge { player: PlayerId },
    /// Activate a skill.
    UseSkill { player: PlayerId, skill: SkillKind },

    // --- Simulation control ---
    /// Pause the simulation.
    Pause,
    /// Resume the simulation.
    Resume,
}

impl PlayerCommand {
    /// The player the command is addressed to, if any.
    pub fn player(&self) -> Option<PlayerId> {
        match self {
            PlayerCommand::Move { player, .. }
            | PlayerCommand::Fire { player }
            | PlayerCommand::Teleport { player, .. }
            | PlayerCommand::StartCharge { player }
            | PlayerCommand::StopCharge { player }
            | PlayerCommand::UseSkill { player, .. } => Some(*player),
            PlayerCommand::Pause | PlayerCommand::Resume => None,
        }
    }
}
