//! # shootout_core - Penalty Shootout Engine
//!
//! Match simulation for a player-versus-CPU penalty shootout.
//!
//! ## Features
//! - Turn-order state machine with typed errors for out-of-order calls
//! - Injected, seedable randomness (same seed = same kicks)
//! - Regulation rounds, early decision and sudden death
//! - Shootout history and running stats (MessagePack + LZ4 + SHA-256)
//!
//! ```no_run
//! use shootout_core::{Difficulty, GameState, ShootoutEngine, ShotZone};
//!
//! let mut engine = ShootoutEngine::seeded(42);
//! engine.start_new(Difficulty::Medium);
//! while engine.state() != GameState::Finished {
//!     let (_keeper, _result) = engine.player_shoot(ShotZone::TopLeft)?;
//!     if engine.after_player_shot()? == GameState::Finished {
//!         break;
//!     }
//!     let (_target, _result) = engine.player_dive(ShotZone::BottomRight)?;
//!     engine.after_opponent_shot()?;
//! }
//! println!("{}", engine.shootout().score_line());
//! # Ok::<(), shootout_core::EngineError>(())
//! ```

pub mod calibration;
pub mod engine;
pub mod error;
pub mod models;
pub mod save;

pub use engine::{
    play_out, Dice, Draw, EngineConfig, EngineEvent, GameState, ScriptedDice, ShootoutEngine,
};
pub use error::{EngineError, Result};
pub use models::{
    zone_statistics, Difficulty, Outcome, PlayerStats, Shootout, ShootoutStatus, Shot,
    ShotResult, ShotZone, Side, ZoneStatistics,
};
pub use save::{HistorySaveManager, MemoryStore, SaveError, ShootoutHistory, ShootoutStore};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
