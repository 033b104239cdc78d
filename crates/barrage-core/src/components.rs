//! ECS components for hecs entities.
//!
//! Components are plain data structs. Game logic lives in systems; the few
//! methods here only maintain a component's own invariants.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::cooldown::Cooldown;
use crate::enums::*;
use crate::geometry::Segment;
use crate::types::PlayerId;

/// Cooldown gate plus effect timer for one skill.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SkillSlot {
    /// Gate between uses.
    pub cooldown: Cooldown,
    /// Duration of the skill's effect, for timed skills.
    pub effect: Cooldown,
    /// Remaining uses for consumable skills; `None` means unlimited.
    pub charges: Option<u32>,
}

impl SkillSlot {
    pub fn new(cooldown_ms: u64, effect_ms: u64, charges: Option<u32>) -> Self {
        Self {
            cooldown: Cooldown::new(cooldown_ms),
            effect: Cooldown::new(effect_ms),
            charges,
        }
    }

    pub fn is_ready(&self, now_ms: u64) -> bool {
        self.cooldown.is_finished(now_ms) && self.charges.map_or(true, |c| c > 0)
    }
}

/// Skills indexed by `SkillKind::index`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SkillSet {
    slots: [SkillSlot; SkillKind::COUNT],
}

impl Default for SkillSet {
    fn default() -> Self {
        let mut slots = [SkillSlot::new(0, 0, None); SkillKind::COUNT];
        slots[SkillKind::Bomb.index()] =
            SkillSlot::new(BOMB_COOLDOWN_MS, BOMB_FUSE_MS, Some(BOMB_START_CHARGES));
        slots[SkillKind::TimeStop.index()] =
            SkillSlot::new(TIME_STOP_COOLDOWN_MS, TIME_STOP_MS, None);
        slots[SkillKind::Shield.index()] = SkillSlot::new(SHIELD_COOLDOWN_MS, SHIELD_MS, None);
        Self { slots }
    }
}

impl SkillSet {
    pub fn get(&self, skill: SkillKind) -> &SkillSlot {
        &self.slots[skill.index()]
    }

    pub fn get_mut(&mut self, skill: SkillKind) -> &mut SkillSlot {
        &mut self.slots[skill.index()]
    }
}

/// Charge-beam state. While charging, movement is locked.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ChargeState {
    pub charging: bool,
    pub started_ms: u64,
}

/// A player-controlled ship.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerShip {
    pub id: PlayerId,
    pub lives: u32,
    pub fire: Cooldown,
    pub teleport: Cooldown,
    pub invincible: Cooldown,
    pub charge: ChargeState,
    /// Set while an in-progress action forbids movement.
    pub controls_locked: bool,
    /// Extra enemies each bullet may pass through.
    pub penetration: u32,
    pub skills: SkillSet,
}

impl PlayerShip {
    pub fn new(id: PlayerId) -> Self {
        Self {
            id,
            lives: PLAYER_START_LIVES,
            fire: Cooldown::new(PLAYER_FIRE_COOLDOWN_MS),
            teleport: Cooldown::new(TELEPORT_COOLDOWN_MS),
            invincible: Cooldown::new(INVINCIBILITY_MS),
            charge: ChargeState::default(),
            controls_locked: false,
            penetration: 0,
            skills: SkillSet::default(),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.lives > 0
    }

    pub fn is_invincible(&self, now_ms: u64) -> bool {
        !self.invincible.is_finished(now_ms)
    }

    /// Abort a charge in progress, restoring control.
    pub fn cancel_charge(&mut self) {
        self.charge = ChargeState::default();
        self.controls_locked = false;
    }
}

/// Option drone attached to a player.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SubShip {
    pub owner: PlayerId,
    /// Offset of the drone's top-left from its owner's top-left.
    pub offset: Vec2,
    pub removed: bool,
}

/// A projectile. Pooled: `reinit` reuses the instance in place.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Bullet {
    pub kind: BulletKind,
    pub faction: Faction,
    /// Player credited for kills; `None` for enemy bullets or unknown owners.
    pub owner: Option<PlayerId>,
    pub damage: u32,
    pub penetration_count: u32,
    pub max_penetration: u32,
    /// Units already struck, so a penetrating bullet hits each one once.
    pub hit_units: Vec<u32>,
    /// Fuse for bombs, lifetime for guided missiles.
    pub lifetime: Option<Cooldown>,
    /// Bomb armed to explode this tick.
    pub detonate: bool,
    pub removed: bool,
}

impl Bullet {
    /// Reset every field for reuse, keeping the hit list's allocation.
    pub fn reinit(
        &mut self,
        kind: BulletKind,
        faction: Faction,
        owner: Option<PlayerId>,
        damage: u32,
        max_penetration: u32,
    ) {
        self.kind = kind;
        self.faction = faction;
        self.owner = owner;
        self.damage = damage;
        self.penetration_count = 0;
        self.max_penetration = max_penetration;
        self.hit_units.clear();
        self.lifetime = None;
        self.detonate = false;
        self.removed = false;
    }

    /// Record a hit on `unit`. Returns false if the unit was already struck.
    /// Flags the bullet for removal once its penetration budget is exceeded.
    pub fn register_hit(&mut self, unit: u32) -> bool {
        if self.hit_units.contains(&unit) {
            return false;
        }
        self.hit_units.push(unit);
        self.penetration_count += 1;
        if self.penetration_count > self.max_penetration {
            self.removed = true;
        }
        true
    }

    pub fn is_active(&self) -> bool {
        !self.removed
    }
}

/// A falling pickup. Pooled like bullets.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct DropItem {
    pub kind: ItemKind,
    pub removed: bool,
}

/// Boss laser hazard with independent charge, visible and fade timers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Laser {
    pub segment: Segment,
    pub state: LaserState,
    pub charge: Cooldown,
    pub visible: Cooldown,
    pub fade: Cooldown,
    /// Players already damaged by this laser.
    pub hit_players: Vec<PlayerId>,
}

/// Player charge beam: a vertical piercing segment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Beam {
    pub owner: PlayerId,
    pub segment: Segment,
    pub damage: u32,
    pub visible: Cooldown,
    pub hit_units: Vec<u32>,
}

/// Gravity well pulling players toward its center.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BlackHole {
    pub center: Vec2,
    pub radius: f32,
    pub pull: f32,
    pub life: Cooldown,
}

/// Purely visual explosion left by a bomb.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Explosion {
    pub radius: f32,
    pub life: Cooldown,
}
