use super::difficulty::Difficulty;
use super::shot::{Shot, ShotResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

pub const DEFAULT_REGULATION_ROUNDS: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShootoutStatus {
    InProgress,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    InProgress,
    Win,
    Loss,
    Draw,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.pad(match self {
            Outcome::InProgress => "In Progress",
            Outcome::Win => "Win",
            Outcome::Loss => "Loss",
            Outcome::Draw => "Draw",
        })
    }
}

fn default_regulation_rounds() -> u32 {
    DEFAULT_REGULATION_ROUNDS
}

/// One penalty shootout between the player and the CPU.
///
/// Scores, the current round and the turn owner are derived from the two
/// shot lists and never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shootout {
    pub id: Uuid,
    pub player_name: String,
    pub opponent_name: String,
    pub player_shots: Vec<Shot>,
    pub opponent_shots: Vec<Shot>,
    pub date: DateTime<Utc>,
    pub status: ShootoutStatus,
    pub difficulty: Difficulty,
    /// Rounds before sudden death
    #[serde(default = "default_regulation_rounds")]
    pub regulation_rounds: u32,
}

impl Default for Shootout {
    fn default() -> Self {
        Self::new(Difficulty::default())
    }
}

impl Shootout {
    pub fn new(difficulty: Difficulty) -> Self {
        Self::with_names("You", "CPU", difficulty, DEFAULT_REGULATION_ROUNDS)
    }

    pub fn with_names(
        player_name: impl Into<String>,
        opponent_name: impl Into<String>,
        difficulty: Difficulty,
        regulation_rounds: u32,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            player_name: player_name.into(),
            opponent_name: opponent_name.into(),
            player_shots: Vec::new(),
            opponent_shots: Vec::new(),
            date: Utc::now(),
            status: ShootoutStatus::InProgress,
            difficulty,
            regulation_rounds,
        }
    }

    pub fn player_score(&self) -> u32 {
        count_goals(&self.player_shots)
    }

    pub fn opponent_score(&self) -> u32 {
        count_goals(&self.opponent_shots)
    }

    pub fn current_round(&self) -> u32 {
        self.player_shots.len().max(self.opponent_shots.len()) as u32 + 1
    }

    pub fn is_player_turn(&self) -> bool {
        self.player_shots.len() <= self.opponent_shots.len()
    }

    pub fn is_completed(&self) -> bool {
        self.status == ShootoutStatus::Completed
    }

    /// True once play went past the regulation rounds.
    pub fn went_to_sudden_death(&self) -> bool {
        self.player_shots.len() as u32 > self.regulation_rounds
    }

    pub fn outcome(&self) -> Outcome {
        if self.status == ShootoutStatus::InProgress {
            return Outcome::InProgress;
        }
        match self.player_score().cmp(&self.opponent_score()) {
            std::cmp::Ordering::Greater => Outcome::Win,
            std::cmp::Ordering::Less => Outcome::Loss,
            std::cmp::Ordering::Equal => Outcome::Draw,
        }
    }

    pub fn result_text(&self) -> String {
        self.outcome().to_string()
    }

    pub fn score_line(&self) -> String {
        format!(
            "{} {} - {} {}",
            self.player_name,
            self.player_score(),
            self.opponent_score(),
            self.opponent_name
        )
    }

    /// Both sides' shots in play order: each round's player kick, then the
    /// opponent's.
    pub fn shots(&self) -> Vec<&Shot> {
        let mut all = Vec::with_capacity(self.player_shots.len() + self.opponent_shots.len());
        let mut opponent = self.opponent_shots.iter().peekable();
        for shot in &self.player_shots {
            while let Some(o) = opponent.next_if(|o| o.round < shot.round) {
                all.push(o);
            }
            all.push(shot);
            if let Some(o) = opponent.next_if(|o| o.round == shot.round) {
                all.push(o);
            }
        }
        all.extend(opponent);
        all
    }
}

fn count_goals(shots: &[Shot]) -> u32 {
    shots.iter().filter(|s| s.result == ShotResult::Goal).count() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ShotZone, Side};

    fn shot(round: u32, result: ShotResult, side: Side) -> Shot {
        Shot::new(round, ShotZone::TopLeft, ShotZone::BottomRight, result, side)
    }

    fn sample() -> Shootout {
        let mut s = Shootout::new(Difficulty::Hard);
        s.player_shots.push(shot(1, ShotResult::Goal, Side::Player));
        s.opponent_shots.push(shot(1, ShotResult::Saved, Side::Opponent));
        s.player_shots.push(shot(2, ShotResult::Missed, Side::Player));
        s.opponent_shots.push(shot(2, ShotResult::Goal, Side::Opponent));
        s.player_shots.push(shot(3, ShotResult::Goal, Side::Player));
        s
    }

    #[test]
    fn test_derived_values() {
        let s = sample();
        assert_eq!(s.player_score(), 2);
        assert_eq!(s.opponent_score(), 1);
        assert_eq!(s.current_round(), 4);
        assert!(!s.is_player_turn());
        assert_eq!(s.outcome(), Outcome::InProgress);
        assert_eq!(s.result_text(), "In Progress");
    }

    #[test]
    fn test_scores_are_pure_functions_of_history() {
        let s = sample();
        let first = (s.player_score(), s.opponent_score(), s.current_round());
        let second = (s.player_score(), s.opponent_score(), s.current_round());
        assert_eq!(first, second);
    }

    #[test]
    fn test_outcome_after_completion() {
        let mut s = sample();
        s.opponent_shots.push(shot(3, ShotResult::Missed, Side::Opponent));
        s.status = ShootoutStatus::Completed;
        assert_eq!(s.outcome(), Outcome::Win);
        assert_eq!(s.score_line(), "You 2 - 1 CPU");
    }

    #[test]
    fn test_shots_interleave_in_play_order() {
        let s = sample();
        let order: Vec<(u32, Side)> = s.shots().iter().map(|s| (s.round, s.side)).collect();
        assert_eq!(
            order,
            vec![
                (1, Side::Player),
                (1, Side::Opponent),
                (2, Side::Player),
                (2, Side::Opponent),
                (3, Side::Player),
            ]
        );
    }

    #[test]
    fn test_json_roundtrip_preserves_record() {
        let mut s = sample();
        s.opponent_shots.push(shot(3, ShotResult::Goal, Side::Opponent));
        s.status = ShootoutStatus::Completed;

        let json = serde_json::to_string(&s).unwrap();
        let back: Shootout = serde_json::from_str(&json).unwrap();

        assert_eq!(back, s);
        assert_eq!(back.player_score(), s.player_score());
        assert_eq!(back.opponent_score(), s.opponent_score());
        assert_eq!(back.status, ShootoutStatus::Completed);
    }

    #[test]
    fn test_missing_regulation_rounds_defaults() {
        let s = Shootout::new(Difficulty::Easy);
        let mut value = serde_json::to_value(&s).unwrap();
        value.as_object_mut().unwrap().remove("regulation_rounds");
        let back: Shootout = serde_json::from_value(value).unwrap();
        assert_eq!(back.regulation_rounds, DEFAULT_REGULATION_ROUNDS);
    }
}
