use crate::models::{Shootout, Side};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where the engine is in the shootout flow.
///
/// ```text
/// Ready -> PlayerShooting -> Animating{Player} -> PlayerKeeping
///            ^                                        |
///            |                                        v
///            +-------- Animating{Opponent} <----------+
///
/// either Animating state -> Finished
/// ```
///
/// `Animating` holds input while the caller plays out a kick; the engine
/// does no timing of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameState {
    Ready,
    PlayerShooting,
    PlayerKeeping,
    Animating { shooter: Side },
    Finished,
}

impl GameState {
    /// Prompt shown to the player for this state.
    pub fn status_text(self, shootout: &Shootout) -> String {
        match self {
            GameState::Ready => "Tap Play to Start".to_string(),
            GameState::PlayerShooting => "Swipe the ball to shoot!".to_string(),
            GameState::PlayerKeeping => "Tap a zone to dive!".to_string(),
            GameState::Animating { .. } => String::new(),
            GameState::Finished => shootout.result_text(),
        }
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GameState::Ready => f.write_str("ready"),
            GameState::PlayerShooting => f.write_str("player shooting"),
            GameState::PlayerKeeping => f.write_str("player keeping"),
            GameState::Animating { shooter: Side::Player } => f.write_str("animating player kick"),
            GameState::Animating { shooter: Side::Opponent } => {
                f.write_str("animating opponent kick")
            }
            GameState::Finished => f.write_str("finished"),
        }
    }
}

/// Notifications queued by the engine for the caller to drain.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    StateChanged(GameState),
    ShootoutEnded(Shootout),
}
