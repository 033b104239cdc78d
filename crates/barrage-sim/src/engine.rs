//! Simulation engine: the combat orchestrator.
//!
//! `SimulationEngine` owns the hecs world, the object pools, the formations
//! and bosses, processes player commands and runs the tick pipeline in a
//! fixed order: update, collide, apply effects, clean up. Completely
//! headless, so the same seed and command stream always give the same run.

use std::collections::{BTreeSet, VecDeque};

use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use barrage_core::commands::PlayerCommand;
use barrage_core::components::{Bullet, DropItem, PlayerShip};
use barrage_core::config::LevelConfig;
use barrage_core::constants::*;
use barrage_core::enums::{BossArchetype, GamePhase, Stage};
use barrage_core::events::{AchievementSink, NullAchievementSink, NullSoundSink, SoundCue, SoundSink};
use barrage_core::geometry::Aabb;
use barrage_core::state::{GameStateSnapshot, LevelResult};
use barrage_core::types::{PlayerId, SimTime};

use barrage_ai::boss::Boss;
use barrage_ai::formation::{Formation, FormationSpec};

use crate::context::SimContext;
use crate::pool::Pool;
use crate::score::{Feedback, Popup, ScoreState};
use crate::systems;
use crate::systems::collision::Contact;
use crate::systems::snapshot::SnapshotInput;
use crate::world_setup;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// Number of players, clamped to `1..=MAX_PLAYERS`.
    pub players: usize,
    pub field: Aabb,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            players: 1,
            field: Aabb::new(0.0, 0.0, FIELD_WIDTH, FIELD_HEIGHT),
        }
    }
}

/// Feedback receivers handed to the engine at construction.
pub struct Services {
    pub sound: Box<dyn SoundSink>,
    pub achievements: Box<dyn AchievementSink>,
}

impl Default for Services {
    fn default() -> Self {
        Self {
            sound: Box::new(NullSoundSink),
            achievements: Box::new(NullAchievementSink),
        }
    }
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    time: SimTime,
    phase: GamePhase,
    stage: Stage,
    players: usize,
    ctx: SimContext,
    rng: ChaCha8Rng,
    level: LevelConfig,
    boss_archetype: Option<BossArchetype>,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<hecs::Entity>,
    contacts: Vec<Contact>,
    bullet_pool: Pool<Bullet>,
    item_pool: Pool<DropItem>,
    formations: Vec<Formation>,
    bosses: Vec<Boss>,
    next_unit_id: u32,
    next_formation_id: u32,
    score: ScoreState,
    feedback: Feedback,
    popups: Vec<Popup>,
    /// Achievements already reported this session.
    unlocked: BTreeSet<String>,
    result: Option<LevelResult>,
    services: Services,
}

impl SimulationEngine {
    /// Create a new simulation engine with the given config and null services.
    pub fn new(config: SimConfig) -> Self {
        Self::with_services(config, Services::default())
    }

    pub fn with_services(config: SimConfig, services: Services) -> Self {
        Self {
            world: World::new(),
            time: SimTime::default(),
            phase: GamePhase::default(),
            stage: Stage::default(),
            players: config.players.clamp(1, MAX_PLAYERS),
            ctx: SimContext::new(config.field),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            level: LevelConfig::default(),
            boss_archetype: None,
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            contacts: Vec::new(),
            bullet_pool: Pool::with_capacity("bullets", BULLET_POOL_CAPACITY),
            item_pool: Pool::with_capacity("items", ITEM_POOL_CAPACITY),
            formations: Vec::new(),
            bosses: Vec::new(),
            next_unit_id: 0,
            next_formation_id: 0,
            score: ScoreState::default(),
            feedback: Feedback::default(),
            popups: Vec::new(),
            unlocked: BTreeSet::new(),
            result: None,
            services,
        }
    }

    /// Reset the world and start `level`. Configuration problems are logged
    /// and fall back to "no boss" or the default movement.
    pub fn start_level(&mut self, level: LevelConfig) {
        for problem in level.validate() {
            tracing::warn!(level = %level.name, %problem, "level configuration problem");
        }
        self.boss_archetype = match level.resolve_boss() {
            Ok(archetype) => archetype,
            Err(err) => {
                tracing::warn!(%err, "boss unavailable, level continues without one");
                None
            }
        };
        let movements = level.resolve_movements();

        self.world.clear();
        self.time = SimTime::default();
        self.ctx = SimContext::new(self.ctx.field);
        self.phase = GamePhase::Active;
        self.stage = Stage::Formations;
        self.command_queue.clear();
        self.contacts.clear();
        self.formations.clear();
        self.bosses.clear();
        self.score = ScoreState::default();
        self.feedback = Feedback::default();
        self.popups.clear();
        self.result = None;

        let field = self.ctx.field;
        for n in 1..=self.players {
            world_setup::spawn_player(&mut self.world, PlayerId(n as u8), self.players, &field);
        }

        if level.formation_width > 0 && level.formation_height > 0 {
            let spec = FormationSpec {
                width: level.formation_width,
                height: level.formation_height,
                base_speed: level.base_speed,
                shooting_frequency_ms: level.shooting_frequency_ms,
                movements,
            };
            let id = self.next_formation_id;
            self.next_formation_id += 1;
            self.formations
                .push(Formation::new(id, &spec, &mut self.next_unit_id, &field, 0));
        }

        if let Some(track) = &level.music {
            self.feedback.play(SoundCue::Music {
                track: track.clone(),
            });
        }
        self.feedback.popup(level.name.clone(), 0);
        tracing::info!(
            level = level.level,
            name = %level.name,
            boss = ?self.boss_archetype,
            "level started"
        );
        self.level = level;
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one tick and return the resulting snapshot.
    pub fn tick(&mut self) -> GameStateSnapshot {
        self.ctx.now_ms = self.time.now_ms();
        self.process_commands();

        if self.phase == GamePhase::Active {
            self.run_systems();
            self.time.advance();
        }

        let audio_events = self.flush_feedback();
        let now = self.time.now_ms();
        self.popups.retain(|p| !p.life.is_finished(now));

        systems::snapshot::build_snapshot(
            &self.world,
            SnapshotInput {
                time: self.time,
                phase: self.phase,
                stage: self.stage,
                level_name: &self.level.name,
                formations: &self.formations,
                bosses: &self.bosses,
                score: &self.score,
                popups: &self.popups,
                audio_events,
            },
        )
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// End-of-level aggregate, once the level is cleared or lost.
    pub fn result(&self) -> Option<&LevelResult> {
        self.result.as_ref()
    }

    #[cfg(test)]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    #[cfg(test)]
    pub fn score(&self) -> &ScoreState {
        &self.score
    }

    #[cfg(test)]
    pub fn formations(&self) -> &[Formation] {
        &self.formations
    }

    #[cfg(test)]
    pub fn bosses(&self) -> &[Boss] {
        &self.bosses
    }

    #[cfg(test)]
    pub fn bullet_pool(&self) -> &Pool<Bullet> {
        &self.bullet_pool
    }

    /// Spawn a player bullet centered on `center` moving by `velocity` per tick.
    #[cfg(test)]
    pub fn spawn_test_bullet(
        &mut self,
        owner: Option<PlayerId>,
        center: glam::Vec2,
        velocity: glam::Vec2,
        max_penetration: u32,
    ) -> hecs::Entity {
        use barrage_core::enums::{BulletKind, Faction};
        use barrage_core::types::{Hitbox, Position, Velocity};

        let mut bullet = self.bullet_pool.acquire();
        bullet.reinit(
            BulletKind::Standard,
            Faction::Player,
            owner,
            PLAYER_BULLET_DAMAGE,
            max_penetration,
        );
        let rect = Aabb::centered(center, PLAYER_BULLET_WIDTH, PLAYER_BULLET_HEIGHT);
        self.world.spawn((
            bullet,
            Position::new(rect.x, rect.y),
            Velocity::from(velocity),
            Hitbox::new(rect.w, rect.h),
        ))
    }

    #[cfg(test)]
    pub fn spawn_test_hostile_bullet(&mut self, spec: &barrage_ai::output::BulletSpec) -> hecs::Entity {
        world_setup::spawn_hostile_bullet(&mut self.world, &mut self.bullet_pool, spec, self.time.now_ms())
    }

    #[cfg(test)]
    pub fn spawn_test_item(&mut self, kind: barrage_core::enums::ItemKind, center: glam::Vec2) -> hecs::Entity {
        world_setup::spawn_item(&mut self.world, &mut self.item_pool, kind, center)
    }

    #[cfg(test)]
    pub fn spawn_test_laser(&mut self, spec: &barrage_ai::output::LaserSpec) -> hecs::Entity {
        world_setup::spawn_laser(&mut self.world, spec, self.time.now_ms())
    }

    #[cfg(test)]
    pub fn spawn_test_black_hole(&mut self, spec: &barrage_ai::output::BlackHoleSpec) -> hecs::Entity {
        world_setup::spawn_black_hole(&mut self.world, spec, self.time.now_ms())
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::Pause => {
                if self.phase == GamePhase::Active {
                    self.phase = GamePhase::Paused;
                }
            }
            PlayerCommand::Resume => {
                if self.phase == GamePhase::Paused {
                    self.phase = GamePhase::Active;
                }
            }
            _ if self.phase == GamePhase::Active => systems::players::apply_command(
                &mut self.world,
                &command,
                &mut self.ctx,
                &mut self.bullet_pool,
                &mut self.score,
                &mut self.feedback,
            ),
            _ => {}
        }
    }

    /// Run every system in pipeline order.
    fn run_systems(&mut self) {
        // 1. Update
        systems::players::run(&mut self.world);
        systems::enemies::run(
            &mut self.world,
            &mut self.formations,
            &mut self.bosses,
            &self.ctx,
            &mut self.rng,
            &mut self.bullet_pool,
            &mut self.next_unit_id,
            &mut self.next_formation_id,
            &mut self.contacts,
            &mut self.feedback,
        );
        systems::projectiles::run(&mut self.world, &self.ctx);
        systems::hazards::run(&mut self.world, &self.ctx);

        // 2. Collide
        systems::collision::run(
            &self.world,
            &self.formations,
            &self.bosses,
            &self.ctx,
            &mut self.contacts,
        );

        // 3. Effects
        systems::effects::run(
            &mut self.world,
            &mut self.contacts,
            &mut self.formations,
            &mut self.bosses,
            &self.ctx,
            &self.level,
            &mut self.rng,
            &mut self.item_pool,
            &mut self.score,
            &mut self.feedback,
        );
        self.formations.retain(|f| !f.is_empty());
        self.advance_level();

        // 4. Cleanup
        systems::cleanup::run(
            &mut self.world,
            &self.ctx,
            &mut self.bullet_pool,
            &mut self.item_pool,
            &mut self.despawn_buffer,
        );
    }

    /// Boss arrival, level completion and game over.
    fn advance_level(&mut self) {
        let any_alive = self
            .world
            .query::<&PlayerShip>()
            .iter()
            .any(|(_, ship)| ship.is_alive());
        if !any_alive {
            self.phase = GamePhase::GameOver;
            self.feedback.play(SoundCue::GameOver);
            self.result = Some(self.level_result(false));
            tracing::info!(level = self.level.level, "game over");
            return;
        }

        match self.stage {
            Stage::Formations if self.formations.is_empty() => match self.boss_archetype {
                Some(archetype) => {
                    let id = self.next_unit_id;
                    self.next_unit_id += 1;
                    self.bosses.push(Boss::new(id, archetype, &self.ctx.field));
                    self.stage = Stage::Boss;
                    self.feedback.play(SoundCue::BossAppear { archetype });
                    self.feedback.popup("Warning: boss approaching".to_string(), self.ctx.now_ms);
                    tracing::info!(?archetype, "boss spawned");
                }
                None => self.complete_level(),
            },
            Stage::Boss if self.bosses.iter().all(|b| b.is_defeated()) => self.complete_level(),
            _ => {}
        }
    }

    fn complete_level(&mut self) {
        self.stage = Stage::Cleared;
        self.phase = GamePhase::LevelComplete;
        self.score.coins += self.level.completion_bonus;
        if let Some(achievement) = &self.level.achievement {
            self.feedback.unlock(achievement);
        }
        self.feedback.play(SoundCue::LevelComplete);
        self.result = Some(self.level_result(true));
        tracing::info!(
            level = self.level.level,
            coins = self.score.coins,
            ships_destroyed = self.score.ships_destroyed,
            "level complete"
        );
    }

    fn level_result(&self, cleared: bool) -> LevelResult {
        let mut lives: Vec<(PlayerId, u32)> = self
            .world
            .query::<&PlayerShip>()
            .iter()
            .map(|(_, ship)| (ship.id, ship.lives))
            .collect();
        lives.sort_by_key(|(id, _)| *id);

        LevelResult {
            level: self.level.level,
            cleared,
            score_per_player: lives.iter().map(|(id, _)| self.score.score(*id)).collect(),
            lives_per_player: lives.iter().map(|(_, l)| *l).collect(),
            bullets_shot: self.score.bullets_shot,
            ships_destroyed: self.score.ships_destroyed,
            coins: self.score.coins,
        }
    }

    /// Forward this tick's cues and unlocks to the services. Returns the
    /// cues for the snapshot.
    fn flush_feedback(&mut self) -> Vec<SoundCue> {
        let now = self.time.now_ms();
        for achievement in std::mem::take(&mut self.feedback.achievements) {
            if self.unlocked.insert(achievement.clone()) {
                self.services.achievements.unlock(&achievement);
                self.feedback.popup(format!("Achievement unlocked: {achievement}"), now);
                tracing::info!(%achievement, "achievement unlocked");
            }
        }
        self.popups.append(&mut self.feedback.popups);

        let audio = std::mem::take(&mut self.feedback.audio);
        for cue in &audio {
            self.services.sound.play(cue);
        }
        audio
    }
}
