//! Combat simulation for BARRAGE.
//!
//! Owns the hecs ECS world, runs the update, collision, effects and cleanup
//! pipeline at a fixed tick rate, and produces `GameStateSnapshot`s for a
//! renderer.

pub mod context;
pub mod engine;
pub mod pool;
pub mod score;
pub mod systems;
pub mod world_setup;

pub use barrage_core as core;
pub use engine::{Services, SimConfig, SimulationEngine};
