//! Running totals over finished shootouts.

use super::shootout::{Outcome, Shootout};
use super::shot::ShotResult;
use super::zone::ShotZone;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub total_shootouts: u32,
    pub wins: u32,
    pub losses: u32,
    /// Penalties taken by the player
    pub total_shots: u32,
    pub goals: u32,
    /// Opponent penalties stopped by the player
    pub saves: u32,
    pub misses: u32,
    /// Opponent penalties the player kept goal against
    #[serde(default)]
    pub shots_faced: u32,
    pub current_streak: u32,
    pub best_streak: u32,
}

impl PlayerStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one finished shootout into the totals.
    pub fn record(&mut self, shootout: &Shootout) {
        self.total_shootouts += 1;

        if shootout.outcome() == Outcome::Win {
            self.wins += 1;
            self.current_streak += 1;
            self.best_streak = self.best_streak.max(self.current_streak);
        } else {
            self.losses += 1;
            self.current_streak = 0;
        }

        for shot in &shootout.player_shots {
            self.total_shots += 1;
            match shot.result {
                ShotResult::Goal => self.goals += 1,
                ShotResult::Missed => self.misses += 1,
                ShotResult::Saved => {}
            }
        }

        for shot in &shootout.opponent_shots {
            self.shots_faced += 1;
            if shot.result == ShotResult::Saved {
                self.saves += 1;
            }
        }
    }

    /// Rebuild totals from a newest-first history.
    pub fn from_history(history: &[Shootout]) -> Self {
        let mut stats = Self::new();
        for shootout in history.iter().rev().filter(|s| s.is_completed()) {
            stats.record(shootout);
        }
        stats
    }

    pub fn win_rate(&self) -> f64 {
        percentage(self.wins, self.total_shootouts)
    }

    pub fn accuracy(&self) -> f64 {
        percentage(self.goals, self.total_shots)
    }

    pub fn save_rate(&self) -> f64 {
        percentage(self.saves, self.shots_faced)
    }
}

/// Player shooting record for a single zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneStatistics {
    pub zone: ShotZone,
    pub attempts: u32,
    pub goals: u32,
    pub saved: u32,
    pub missed: u32,
}

impl ZoneStatistics {
    pub fn new(zone: ShotZone) -> Self {
        Self { zone, attempts: 0, goals: 0, saved: 0, missed: 0 }
    }

    pub fn success_rate(&self) -> f64 {
        percentage(self.goals, self.attempts)
    }
}

/// Per-zone breakdown of every player shot in `shootouts`, in zone order.
pub fn zone_statistics(shootouts: &[Shootout]) -> Vec<ZoneStatistics> {
    let mut stats: Vec<ZoneStatistics> = ShotZone::ALL.iter().map(|&z| ZoneStatistics::new(z)).collect();

    for shot in shootouts.iter().flat_map(|s| s.player_shots.iter()) {
        let entry = &mut stats[shot.target.index()];
        entry.attempts += 1;
        match shot.result {
            ShotResult::Goal => entry.goals += 1,
            ShotResult::Saved => entry.saved += 1,
            ShotResult::Missed => entry.missed += 1,
        }
    }

    stats
}

fn percentage(part: u32, whole: u32) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    part as f64 / whole as f64 * 100.0
}
