//! ECS systems run by the engine each tick.
//!
//! Systems are free functions over the hecs `World` (`&World` when
//! read-only). Aggregates the engine owns, such as formations, bosses, pools
//! and score, are passed in explicitly.

pub mod cleanup;
pub mod collision;
pub mod effects;
pub mod enemies;
pub mod hazards;
pub mod players;
pub mod projectiles;
pub mod snapshot;
