//! Per-level configuration supplied by the level loader.
//!
//! Levels arrive as already-parsed values or as JSON. Unknown identifiers are
//! reported as `ConfigError`s, which the engine logs and recovers from by
//! falling back to "no boss" or the default movement.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::enums::{BossArchetype, EnemyKind, ItemKind, MovementKind};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("unknown boss id '{0}'")]
    UnknownBoss(String),
    #[error("unknown movement strategy '{0}'")]
    UnknownMovement(String),
    #[error("invalid formation size {width}x{height}")]
    InvalidFormation { width: usize, height: usize },
    #[error("drop chance for {item:?} from {enemy:?} out of range: {probability}")]
    InvalidProbability {
        enemy: EnemyKind,
        item: ItemKind,
        probability: f64,
    },
    #[error("level parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// One entry in an enemy's drop table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DropChance {
    pub item: ItemKind,
    /// Probability in `[0, 1]`; entries for one enemy should sum to at most 1.
    pub probability: f64,
}

/// Everything the engine needs to run one level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelConfig {
    pub name: String,
    #[serde(default = "default_level_number")]
    pub level: u32,
    pub formation_width: usize,
    pub formation_height: usize,
    pub base_speed: f32,
    /// Milliseconds between formation shots.
    pub shooting_frequency_ms: u64,
    /// One strategy per formation subgroup, by name.
    #[serde(default)]
    pub movement_strategies: Vec<String>,
    #[serde(default)]
    pub boss: Option<String>,
    #[serde(default)]
    pub drop_table: BTreeMap<EnemyKind, Vec<DropChance>>,
    /// Coins credited when the level is cleared.
    #[serde(default)]
    pub completion_bonus: u32,
    /// Achievement unlocked when the level is cleared.
    #[serde(default)]
    pub achievement: Option<String>,
    #[serde(default)]
    pub music: Option<String>,
}

fn default_level_number() -> u32 {
    1
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            name: "Training".to_string(),
            level: 1,
            formation_width: 6,
            formation_height: 3,
            base_speed: 10.0,
            shooting_frequency_ms: 1_200,
            movement_strategies: vec!["side_to_side".to_string()],
            boss: None,
            drop_table: BTreeMap::new(),
            completion_bonus: 0,
            achievement: None,
            music: None,
        }
    }
}

impl LevelConfig {
    /// Parse a level from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Resolve the boss identifier. `Ok(None)` means the level has no boss.
    pub fn resolve_boss(&self) -> Result<Option<BossArchetype>, ConfigError> {
        match &self.boss {
            None => Ok(None),
            Some(id) => BossArchetype::from_id(id)
                .map(Some)
                .ok_or_else(|| ConfigError::UnknownBoss(id.clone())),
        }
    }

    /// Resolve movement names, substituting the default for unknown names.
    /// Each unknown name is logged.
    pub fn resolve_movements(&self) -> Vec<MovementKind> {
        if self.movement_strategies.is_empty() {
            return vec![MovementKind::default()];
        }
        self.movement_strategies
            .iter()
            .map(|name| match MovementKind::from_name(name) {
                Some(kind) => kind,
                None => {
                    let err = ConfigError::UnknownMovement(name.clone());
                    tracing::warn!("{err}; using default movement");
                    MovementKind::default()
                }
            })
            .collect()
    }

    /// Collect every problem with this level. An empty list means valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut problems = Vec::new();

        if self.formation_width == 0 || self.formation_height == 0 {
            problems.push(ConfigError::InvalidFormation {
                width: self.formation_width,
                height: self.formation_height,
            });
        }
        if let Err(e) = self.resolve_boss() {
            problems.push(e);
        }
        for name in &self.movement_strategies {
            if MovementKind::from_name(name).is_none() {
                problems.push(ConfigError::UnknownMovement(name.clone()));
            }
        }
        for (&enemy, chances) in &self.drop_table {
            for chance in chances {
                if !(0.0..=1.0).contains(&chance.probability) {
                    problems.push(ConfigError::InvalidProbability {
                        enemy,
                        item: chance.item,
                        probability: chance.probability,
                    });
                }
            }
        }

        problems
    }
}
