//! Core types and definitions for the BARRAGE combat simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! geometry, timers, components, commands, snapshots, events, level
//! configuration and constants. It has no dependency on any runtime.

pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod cooldown;
pub mod enums;
pub mod events;
pub mod geometry;
pub mod state;
pub mod types;
