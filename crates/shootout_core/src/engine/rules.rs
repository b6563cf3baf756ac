//! When a shootout is over.

use crate::models::Shootout;

/// Kicks taken and goals scored by each side so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Tally {
    pub player_shots: u32,
    pub opponent_shots: u32,
    pub player_score: u32,
    pub opponent_score: u32,
}

impl Tally {
    pub fn of(shootout: &Shootout) -> Self {
        Self {
            player_shots: shootout.player_shots.len() as u32,
            opponent_shots: shootout.opponent_shots.len() as u32,
            player_score: shootout.player_score(),
            opponent_score: shootout.opponent_score(),
        }
    }

    /// Rounds each side is entitled to at this point: the regulation
    /// length, or the sudden-death round currently open.
    fn rounds_in_play(&self, regulation_rounds: u32) -> u32 {
        regulation_rounds.max(self.player_shots).max(self.opponent_shots)
    }

    pub fn player_remaining(&self, regulation_rounds: u32) -> u32 {
        self.rounds_in_play(regulation_rounds).saturating_sub(self.player_shots)
    }

    pub fn opponent_remaining(&self, regulation_rounds: u32) -> u32 {
        self.rounds_in_play(regulation_rounds).saturating_sub(self.opponent_shots)
    }
}

/// True once the result can no longer change.
///
/// - A side whose lead exceeds everything the other side can still score
///   has won, even mid-round.
/// - With kicks level at or beyond regulation, any score difference ends it.
///
/// In sudden death the side still to kick keeps its pending attempt, so a
/// round is always completed before it is judged.
pub fn check_shootout_end(tally: &Tally, regulation_rounds: u32) -> bool {
    let p_remaining = tally.player_remaining(regulation_rounds);
    let o_remaining = tally.opponent_remaining(regulation_rounds);

    if tally.player_score > tally.opponent_score + o_remaining {
        return true;
    }
    if tally.opponent_score > tally.player_score + p_remaining {
        return true;
    }

    tally.player_shots >= regulation_rounds
        && tally.player_shots == tally.opponent_shots
        && tally.player_score != tally.opponent_score
}
