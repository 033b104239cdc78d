//! Simulation constants and tuning parameters.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 60;

/// Milliseconds per tick (rounded down; `SimTime` derives exact time from ticks).
pub const TICK_MS: u64 = 1000 / TICK_RATE as u64;

// --- Playfield ---

pub const FIELD_WIDTH: f32 = 800.0;
pub const FIELD_HEIGHT: f32 = 600.0;

/// Distance past the field edge after which entities are purged.
pub const OFF_SCREEN_MARGIN: f32 = 64.0;

/// Maximum number of simultaneous players.
pub const MAX_PLAYERS: usize = 2;

// --- Player ---

pub const PLAYER_WIDTH: f32 = 32.0;
pub const PLAYER_HEIGHT: f32 = 24.0;
/// Pixels moved per `Move` command.
pub const PLAYER_SPEED: f32 = 6.0;
pub const PLAYER_START_LIVES: u32 = 3;
pub const PLAYER_MAX_LIVES: u32 = 9;
pub const PLAYER_FIRE_COOLDOWN_MS: u64 = 180;
pub const PLAYER_BULLET_SPEED: f32 = 12.0;
pub const PLAYER_BULLET_WIDTH: f32 = 4.0;
pub const PLAYER_BULLET_HEIGHT: f32 = 12.0;
pub const PLAYER_BULLET_DAMAGE: u32 = 1;
/// Highest penetration level reachable through power-ups.
pub const PLAYER_MAX_PENETRATION: u32 = 3;
pub const INVINCIBILITY_MS: u64 = 2_000;

pub const TELEPORT_DISTANCE: f32 = 120.0;
pub const TELEPORT_COOLDOWN_MS: u64 = 3_000;

/// Minimum hold time before a released charge fires a beam.
pub const CHARGE_MIN_MS: u64 = 800;
/// Hold time at which the beam reaches full damage.
pub const CHARGE_FULL_MS: u64 = 2_000;
pub const BEAM_WIDTH: f32 = 10.0;
pub const BEAM_VISIBLE_MS: u64 = 300;
pub const BEAM_MIN_DAMAGE: u32 = 2;
pub const BEAM_MAX_DAMAGE: u32 = 6;

// --- Sub-ships ---

pub const MAX_SUB_SHIPS: usize = 2;
pub const SUB_SHIP_WIDTH: f32 = 14.0;
pub const SUB_SHIP_HEIGHT: f32 = 14.0;
/// Horizontal offset of a sub-ship from its owner's edge.
pub const SUB_SHIP_OFFSET_X: f32 = 22.0;
pub const SUB_SHIP_OFFSET_Y: f32 = 10.0;

// --- Skills ---

pub const BOMB_COOLDOWN_MS: u64 = 1_500;
pub const BOMB_START_CHARGES: u32 = 2;
pub const BOMB_MAX_CHARGES: u32 = 5;
pub const BOMB_SPEED: f32 = 5.0;
pub const BOMB_SIZE: f32 = 12.0;
/// Bombs detonate on their own after this long.
pub const BOMB_FUSE_MS: u64 = 2_500;
pub const BOMB_RADIUS: f32 = 110.0;
pub const BOMB_DAMAGE: u32 = 4;
pub const EXPLOSION_VISIBLE_MS: u64 = 400;

pub const TIME_STOP_MS: u64 = 3_000;
pub const TIME_STOP_COOLDOWN_MS: u64 = 20_000;

pub const SHIELD_MS: u64 = 4_000;
pub const SHIELD_COOLDOWN_MS: u64 = 15_000;

// --- Enemies & formations ---

pub const ENEMY_WIDTH: f32 = 28.0;
pub const ENEMY_HEIGHT: f32 = 22.0;
pub const FORMATION_GAP_X: f32 = 14.0;
pub const FORMATION_GAP_Y: f32 = 12.0;
pub const FORMATION_ORIGIN_Y: f32 = 60.0;

/// Floor added to every recalculated formation speed.
pub const FORMATION_MIN_SPEED: f32 = 1.0;
/// How strongly destroyed members accelerate the survivors.
pub const FORMATION_SPEED_SCALE: f32 = 1.0;
/// Ticks between stepped moves for a full formation.
pub const FORMATION_BASE_INTERVAL: u32 = 12;
/// Stepped moves never happen more often than this.
pub const FORMATION_MIN_INTERVAL: u32 = 2;
/// Fraction of the field height formations may descend into.
pub const FORMATION_LOWER_LIMIT_RATIO: f32 = 0.7;
/// Continuous strategies move this fraction of the stepped speed per tick.
pub const SMOOTH_SPEED_FACTOR: f32 = 0.25;

pub const SIDE_TO_SIDE_DROP: f32 = 16.0;

pub const DIAGONAL_SLOW_FACTOR: f32 = 0.5;
pub const DIAGONAL_SLOW_MS: u64 = 1_200;

pub const ZIGZAG_SEGMENT_STEPS: u32 = 6;

pub const PURSUIT_LOOK_AHEAD: f32 = 24.0;
pub const PURSUIT_T_STEP: f32 = 0.005;
/// Beyond this distance from the look-ahead point a member moves faster.
pub const PURSUIT_BOOST_RANGE: f32 = 48.0;
pub const PURSUIT_BOOST_FACTOR: f32 = 1.6;
pub const PURSUIT_FINISH_DISTANCE: f32 = 6.0;
/// Ticks between consecutive entries on the same side.
pub const PURSUIT_STAGGER_TICKS: u32 = 18;
pub const PURSUIT_ENTRY_MARGIN: f32 = 40.0;

/// How far above the field parked members wait.
pub const PARK_MARGIN: f32 = 40.0;

pub const LOOP_FAST_SPEED: f32 = 5.0;
pub const LOOP_SLOW_SPEED: f32 = 1.5;
/// Fraction of the field height where looping members slow down.
pub const LOOP_SLOW_THRESHOLD_RATIO: f32 = 0.35;
pub const LOOP_RESPAWN_MS: u64 = 1_500;

pub const ENEMY_BULLET_SPEED: f32 = 5.0;
pub const ENEMY_BULLET_SIZE: f32 = 8.0;

/// Coins awarded per point of enemy value.
pub const COIN_DIVISOR: u32 = 10;

// --- Items ---

pub const ITEM_SIZE: f32 = 16.0;
pub const ITEM_FALL_SPEED: f32 = 2.0;
pub const ITEM_COIN_VALUE: u32 = 10;

// --- Bosses ---

pub const BOSS_ENTRY_SPEED: f32 = 2.0;
/// Y coordinate at which an entering boss starts its patterns.
pub const BOSS_HOVER_Y: f32 = 60.0;
/// Fraction of the field height bosses roam in.
pub const BOSS_BAND_RATIO: f32 = 0.45;
pub const BOSS_MOVE_SPEED: f32 = 2.5;

pub const SPREAD_INTERVAL_MS: u64 = 900;
pub const SPREAD_VOLLEYS: u32 = 4;
pub const SPREAD_COUNT: u32 = 7;
pub const SPREAD_ANGLE: f32 = std::f32::consts::FRAC_PI_2;
pub const BOSS_BULLET_SPEED: f32 = 4.0;
pub const BOSS_BULLET_SIZE: f32 = 10.0;

/// How long the horizontal and diagonal movers run as a cycle step.
pub const MOVER_DURATION_MS: u64 = 5_000;
pub const MOVER_SHOT_MS: u64 = 700;

pub const ZIGZAG_DURATION_MS: u64 = 6_000;
pub const ZIGZAG_SHOT_MS: u64 = 450;
pub const ZIGZAG_AMPLITUDE: f32 = 40.0;
pub const ZIGZAG_PERIOD_MS: f32 = 1_200.0;

pub const DASH_RETREAT_SPEED: f32 = 4.0;
pub const DASH_TELEGRAPH_MS: u64 = 1_000;
pub const DASH_START_SPEED: f32 = 2.0;
pub const DASH_ACCELERATION: f32 = 0.8;
pub const DASH_MAX_SPEED: f32 = 18.0;
pub const DASH_STAGING_Y: f32 = 40.0;

pub const BARRAGE_LASERS: u32 = 5;
pub const BARRAGE_GAP_MS: u64 = 700;
pub const LASER_CHARGE_MS: u64 = 900;
pub const LASER_VISIBLE_MS: u64 = 500;
pub const LASER_FADE_MS: u64 = 250;
pub const LASER_WIDTH: f32 = 8.0;
/// How far outside the field laser origins are placed.
pub const LASER_ORIGIN_MARGIN: f32 = 20.0;

pub const GRAVITY_RADIUS: f32 = 160.0;
pub const GRAVITY_PULL: f32 = 0.03;
pub const GRAVITY_DURATION_MS: u64 = 4_000;

pub const APOCALYPSE_LANES: usize = 5;
pub const APOCALYPSE_TELEGRAPH_MS: u64 = 1_800;
pub const APOCALYPSE_SWEEP_MS: u64 = 1_200;

pub const MOB_WAVES: u32 = 2;
pub const MOB_GAP_MS: u64 = 2_500;
pub const MOB_COUNT: u32 = 4;
/// Child mobs alive at once across every boss; waves beyond this are dropped.
pub const MAX_LIVE_MOBS: usize = 16;

pub const MISSILE_VOLLEYS: u32 = 3;
pub const MISSILE_GAP_MS: u64 = 1_100;
pub const MISSILE_PER_VOLLEY: u32 = 2;
pub const MISSILE_SPEED: f32 = 3.5;
/// Maximum heading change per tick (radians).
pub const MISSILE_TURN_RATE: f32 = 0.05;
pub const MISSILE_LIFETIME_MS: u64 = 4_000;
pub const MISSILE_SIZE: f32 = 10.0;

// --- HUD ---

pub const POPUP_VISIBLE_MS: u64 = 1_500;

// --- Pools ---

/// Bullets pre-allocated at level start.
pub const BULLET_POOL_CAPACITY: usize = 256;
pub const ITEM_POOL_CAPACITY: usize = 32;
