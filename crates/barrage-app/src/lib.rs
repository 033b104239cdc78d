//! Headless host for the BARRAGE combat simulation.
//!
//! Runs the engine on its own thread at the fixed tick rate, and provides
//! the log-backed services and the scripted autopilot used by the demo
//! binary.

pub mod autopilot;
pub mod game_loop;
pub mod sinks;
pub mod state;
