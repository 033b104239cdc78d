//! Behaviour logic for BARRAGE.
//!
//! Boss pattern state machines with their per-boss coordinator, boss
//! archetype profiles, and formation movement strategies. Operates on plain
//! data with no ECS dependency; the orchestrator feeds in targets and
//! collects the spawn requests each update produces.

pub mod boss;
pub mod formation;
pub mod output;
pub mod profiles;

pub use barrage_core as core;

#[cfg(test)]
mod tests;
