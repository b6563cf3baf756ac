use super::zone::ShotZone;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShotResult {
    Goal,
    Saved,
    Missed,
}

impl ShotResult {
    pub fn is_goal(self) -> bool {
        self == ShotResult::Goal
    }
}

impl fmt::Display for ShotResult {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.pad(match self {
            ShotResult::Goal => "GOAL",
            ShotResult::Saved => "SAVED",
            ShotResult::Missed => "MISSED",
        })
    }
}

/// Who took a shot. The player shoots on their own turn and keeps goal
/// on the opponent's.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Player,
    Opponent,
}

/// A resolved penalty kick. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shot {
    pub id: Uuid,
    /// 1-based round; both kicks of a round share the tag
    pub round: u32,
    pub target: ShotZone,
    pub keeper: ShotZone,
    pub result: ShotResult,
    pub side: Side,
}

impl Shot {
    pub fn new(round: u32, target: ShotZone, keeper: ShotZone, result: ShotResult, side: Side) -> Self {
        Self { id: Uuid::new_v4(), round, target, keeper, result, side }
    }
}
