//! Penalty shootout engine: kick resolution, termination rules and the
//! turn-order state machine.

pub mod autoplay;
pub mod config;
pub mod dice;
pub mod resolution;
pub mod rules;
pub mod shootout_engine;
pub mod state;

pub use autoplay::play_out;
pub use config::{EngineConfig, CONFIG_PATH_ENV};
pub use dice::{Dice, Draw, ScriptedDice};
pub use rules::{check_shootout_end, Tally};
pub use shootout_engine::ShootoutEngine;
pub use state::{EngineEvent, GameState};
