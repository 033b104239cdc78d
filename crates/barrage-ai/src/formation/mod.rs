//! Enemy formations.
//!
//! A formation is a grid of enemy ships stored as columns, split into
//! contiguous subgroups that each own one movement strategy. Bounds and ship
//! count are always recomputed from the surviving members after movement
//! and after every destroy.

pub mod diagonal;
pub mod path;
pub mod pursuit;
pub mod shooting;
pub mod side_to_side;
pub mod strategy;
pub mod vertical_loop;
pub mod zigzag;

use glam::Vec2;
use rand::RngCore;

use barrage_core::constants::*;
use barrage_core::cooldown::Cooldown;
use barrage_core::enums::{EnemyKind, MovementKind};
use barrage_core::geometry::Aabb;

use crate::output::BulletSpec;
use shooting::ShootingManager;
use strategy::{MoveContext, MovementStrategy};

/// Per-member state used by path-following and looping strategies.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MemberMotion {
    /// Spawn position (top-left) for respawning strategies.
    pub home: Vec2,
    /// Path parameter in `[0, 1]`.
    pub t: f32,
    /// Ticks to wait before entering.
    pub delay_ticks: u32,
    pub finished: bool,
    /// Follows the mirrored path.
    pub mirrored: bool,
    /// Waiting off-screen to respawn.
    pub respawn: Option<Cooldown>,
}

#[derive(Debug, Clone)]
pub struct EnemyShip {
    /// Unit id used for hit bookkeeping.
    pub id: u32,
    pub kind: EnemyKind,
    pub bounds: Aabb,
    pub health: u32,
    pub motion: MemberMotion,
}

impl EnemyShip {
    pub fn new(id: u32, kind: EnemyKind, x: f32, y: f32) -> Self {
        Self {
            id,
            kind,
            bounds: Aabb::new(x, y, ENEMY_WIDTH, ENEMY_HEIGHT),
            health: kind.health(),
            motion: MemberMotion {
                home: Vec2::new(x, y),
                ..MemberMotion::default()
            },
        }
    }

    pub fn points(&self) -> u32 {
        self.kind.points()
    }
}

/// One column of ships, top to bottom.
#[derive(Debug, Clone, Default)]
pub struct Column {
    pub ships: Vec<EnemyShip>,
}

/// Bounding box of every ship in `columns`, if any.
pub fn group_bounds(columns: &[Column]) -> Option<Aabb> {
    columns
        .iter()
        .flat_map(|c| c.ships.iter())
        .map(|s| s.bounds)
        .reduce(|a, b| a.union(&b))
}

pub fn translate_all(columns: &mut [Column], delta: Vec2) {
    for ship in columns.iter_mut().flat_map(|c| c.ships.iter_mut()) {
        ship.bounds.translate(delta);
    }
}

/// Columns moved together by one strategy.
#[derive(Debug, Clone)]
pub struct Subgroup {
    pub columns: Vec<Column>,
    pub strategy: MovementStrategy,
    /// Ticks since the last stepped move.
    ticks: u32,
}

impl Subgroup {
    fn new(mut columns: Vec<Column>, kind: MovementKind, field: &Aabb) -> Self {
        let mut strategy = MovementStrategy::new(kind);
        strategy.attach(&mut columns, field);
        Self {
            columns,
            strategy,
            ticks: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.columns.iter().all(|c| c.ships.is_empty())
    }

    pub fn bounds(&self) -> Option<Aabb> {
        group_bounds(&self.columns)
    }
}

/// Layout and tuning for a new formation.
#[derive(Debug, Clone, PartialEq)]
pub struct FormationSpec {
    pub width: usize,
    pub height: usize,
    pub base_speed: f32,
    pub shooting_frequency_ms: u64,
    /// One strategy per subgroup; empty means a single default group.
    pub movements: Vec<MovementKind>,
}

/// Outcome of damaging a member.
#[derive(Debug, Clone)]
pub enum MemberHit {
    /// No member with that id.
    Missed,
    Damaged,
    Destroyed(EnemyShip),
}

#[derive(Debug, Clone)]
pub struct Formation {
    pub id: u32,
    subgroups: Vec<Subgroup>,
    base_speed: f32,
    speed: f32,
    total: usize,
    destroyed: usize,
    ship_count: usize,
    bounds: Aabb,
    shooting: ShootingManager,
}

impl Formation {
    /// Lay out a `width x height` grid centered near the top of `field`.
    /// Ship ids are taken from `next_unit_id`.
    pub fn new(
        id: u32,
        spec: &FormationSpec,
        next_unit_id: &mut u32,
        field: &Aabb,
        now_ms: u64,
    ) -> Self {
        let grid_w = spec.width as f32 * ENEMY_WIDTH
            + spec.width.saturating_sub(1) as f32 * FORMATION_GAP_X;
        let x0 = field.center().x - grid_w * 0.5;
        let y0 = field.top() + FORMATION_ORIGIN_Y;

        let mut columns: Vec<Column> = (0..spec.width)
            .map(|c| Column {
                ships: (0..spec.height)
                    .map(|r| {
                        let ship = EnemyShip::new(
                            *next_unit_id,
                            EnemyKind::for_row(r, spec.height),
                            x0 + c as f32 * (ENEMY_WIDTH + FORMATION_GAP_X),
                            y0 + r as f32 * (ENEMY_HEIGHT + FORMATION_GAP_Y),
                        );
                        *next_unit_id += 1;
                        ship
                    })
                    .collect(),
            })
            .collect();

        let movements = if spec.movements.is_empty() {
            vec![MovementKind::default()]
        } else {
            spec.movements.clone()
        };
        let groups = movements.len().min(spec.width.max(1));
        let base = spec.width / groups;
        let extra = spec.width % groups;

        let mut subgroups = Vec::with_capacity(groups);
        for (i, &kind) in movements.iter().take(groups).enumerate() {
            let size = base + usize::from(i < extra);
            let rest = columns.split_off(size.min(columns.len()));
            let group = std::mem::replace(&mut columns, rest);
            subgroups.push(Subgroup::new(group, kind, field));
        }

        let shooting = if spec.shooting_frequency_ms > 0 {
            ShootingManager::new(spec.shooting_frequency_ms, now_ms)
        } else {
            ShootingManager::disabled()
        };
        Self::assemble(id, subgroups, spec.base_speed, shooting)
    }

    /// A row of child mobs released from `origin`, looping vertically.
    pub fn mobs(id: u32, origin: Vec2, count: u32, next_unit_id: &mut u32, field: &Aabb) -> Self {
        let spacing = ENEMY_WIDTH + FORMATION_GAP_X;
        let row_w = count as f32 * spacing - FORMATION_GAP_X;
        let x0 = (origin.x - row_w * 0.5)
            .clamp(field.left(), (field.right() - row_w).max(field.left()));
        let columns = (0..count)
            .map(|i| {
                let ship = EnemyShip::new(*next_unit_id, EnemyKind::Mob, x0 + i as f32 * spacing, origin.y);
                *next_unit_id += 1;
                Column { ships: vec![ship] }
            })
            .collect();
        let group = Subgroup::new(columns, MovementKind::VerticalLoop, field);
        Self::assemble(id, vec![group], 0.0, ShootingManager::disabled())
    }

    fn assemble(id: u32, subgroups: Vec<Subgroup>, base_speed: f32, shooting: ShootingManager) -> Self {
        let mut formation = Self {
            id,
            subgroups,
            base_speed,
            speed: 0.0,
            total: 0,
            destroyed: 0,
            ship_count: 0,
            bounds: Aabb::default(),
            shooting,
        };
        formation.recompute();
        formation.total = formation.ship_count;
        formation.recalculate_speed();
        formation
    }

    // --- Derived state ---

    pub fn bounds(&self) -> Aabb {
        self.bounds
    }

    pub fn x(&self) -> f32 {
        self.bounds.x
    }

    pub fn y(&self) -> f32 {
        self.bounds.y
    }

    pub fn width(&self) -> f32 {
        self.bounds.w
    }

    pub fn height(&self) -> f32 {
        self.bounds.h
    }

    pub fn ship_count(&self) -> usize {
        self.ship_count
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn destroyed(&self) -> usize {
        self.destroyed
    }

    pub fn is_empty(&self) -> bool {
        self.ship_count == 0
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn subgroups(&self) -> &[Subgroup] {
        &self.subgroups
    }

    pub fn ships(&self) -> impl Iterator<Item = &EnemyShip> {
        self.subgroups
            .iter()
            .flat_map(|g| g.columns.iter())
            .flat_map(|c| c.ships.iter())
    }

    pub fn ship(&self, id: u32) -> Option<&EnemyShip> {
        self.ships().find(|s| s.id == id)
    }

    /// Ticks between stepped moves; shrinks as the formation thins.
    pub fn interval(&self) -> u32 {
        if self.total == 0 {
            return FORMATION_MIN_INTERVAL;
        }
        let scaled = (FORMATION_BASE_INTERVAL as f32 * self.ship_count as f32 / self.total as f32)
            .ceil() as u32;
        scaled.max(FORMATION_MIN_INTERVAL)
    }

    fn recalculate_speed(&mut self) {
        let destroyed_ratio = if self.total == 0 {
            0.0
        } else {
            self.destroyed as f32 / self.total as f32
        };
        self.speed =
            FORMATION_MIN_SPEED + self.base_speed * (1.0 + FORMATION_SPEED_SCALE * destroyed_ratio);
    }

    /// Rebuild bounds and ship count from the surviving members.
    fn recompute(&mut self) {
        for group in &mut self.subgroups {
            group.columns.retain(|c| !c.ships.is_empty());
        }
        self.subgroups.retain(|g| !g.columns.is_empty());
        self.ship_count = self.ships().count();
        self.bounds = match self.subgroups.iter().filter_map(Subgroup::bounds).reduce(|a, b| a.union(&b)) {
            Some(bounds) => bounds,
            None => Aabb::new(self.bounds.x, self.bounds.y, 0.0, 0.0),
        };
    }

    // --- Update ---

    /// Advance movement and shooting by one tick.
    pub fn update(
        &mut self,
        now_ms: u64,
        field: &Aabb,
        rng: &mut dyn RngCore,
        shots: &mut Vec<BulletSpec>,
    ) {
        if self.is_empty() {
            return;
        }
        let ctx = MoveContext {
            speed: self.speed,
            now_ms,
            field: *field,
            lower_limit: field.top() + field.h * FORMATION_LOWER_LIMIT_RATIO,
        };
        let interval = self.interval();
        for group in &mut self.subgroups {
            if group.strategy.needs_smooth_movement() {
                group.strategy.update_movement(&mut group.columns, &ctx);
            } else {
                group.ticks += 1;
                if group.ticks >= interval {
                    group.ticks = 0;
                    group.strategy.update_movement(&mut group.columns, &ctx);
                }
            }
        }
        self.recompute();

        let columns = self.subgroups.iter().flat_map(|g| g.columns.iter());
        if let Some(shot) = self.shooting.update(columns, field, now_ms, rng) {
            shots.push(shot);
        }
    }

    // --- Damage ---

    /// Apply damage to member `id`, destroying it when its health runs out.
    pub fn damage_member(&mut self, id: u32, damage: u32, now_ms: u64) -> MemberHit {
        let Some(ship) = self
            .subgroups
            .iter_mut()
            .flat_map(|g| g.columns.iter_mut())
            .flat_map(|c| c.ships.iter_mut())
            .find(|s| s.id == id)
        else {
            return MemberHit::Missed;
        };
        ship.health = ship.health.saturating_sub(damage);
        if ship.health > 0 {
            return MemberHit::Damaged;
        }
        match self.destroy_member(id, now_ms) {
            Some(ship) => MemberHit::Destroyed(ship),
            None => MemberHit::Missed,
        }
    }

    /// Remove member `id`, then recompute bounds, count and speed.
    pub fn destroy_member(&mut self, id: u32, now_ms: u64) -> Option<EnemyShip> {
        let mut removed = None;
        for group in &mut self.subgroups {
            for column in &mut group.columns {
                if let Some(index) = column.ships.iter().position(|s| s.id == id) {
                    removed = Some(column.ships.remove(index));
                    break;
                }
            }
            if removed.is_some() {
                group.strategy.on_member_destroyed(now_ms);
                break;
            }
        }
        let ship = removed?;
        self.destroyed += 1;
        self.recompute();
        self.recalculate_speed();
        tracing::debug!(
            formation = self.id,
            remaining = self.ship_count,
            speed = self.speed,
            "formation member destroyed"
        );
        Some(ship)
    }
}
