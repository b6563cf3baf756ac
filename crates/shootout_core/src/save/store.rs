use super::error::SaveError;
use crate::models::{zone_statistics, PlayerStats, Shootout, ZoneStatistics};

/// Receives every finished shootout from the engine.
///
/// `add_shootout` is always called before `update_aggregate_stats` for the
/// same record.
pub trait ShootoutStore {
    fn add_shootout(&mut self, shootout: &Shootout) -> Result<(), SaveError>;

    fn update_aggregate_stats(&mut self, shootout: &Shootout) -> Result<(), SaveError>;
}

impl<S: ShootoutStore + ?Sized> ShootoutStore for &mut S {
    fn add_shootout(&mut self, shootout: &Shootout) -> Result<(), SaveError> {
        (**self).add_shootout(shootout)
    }

    fn update_aggregate_stats(&mut self, shootout: &Shootout) -> Result<(), SaveError> {
        (**self).update_aggregate_stats(shootout)
    }
}

/// In-process store, used by simulations and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    shootouts: Vec<Shootout>,
    stats: PlayerStats,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Newest first.
    pub fn shootouts(&self) -> &[Shootout] {
        &self.shootouts
    }

    pub fn stats(&self) -> &PlayerStats {
        &self.stats
    }

    pub fn zone_statistics(&self) -> Vec<ZoneStatistics> {
        zone_statistics(&self.shootouts)
    }

    pub fn reset_all_data(&mut self) {
        self.shootouts.clear();
        self.stats = PlayerStats::default();
    }
}

impl ShootoutStore for MemoryStore {
    fn add_shootout(&mut self, shootout: &Shootout) -> Result<(), SaveError> {
        self.shootouts.insert(0, shootout.clone());
        Ok(())
    }

    fn update_aggregate_stats(&mut self, shootout: &Shootout) -> Result<(), SaveError> {
        self.stats.record(shootout);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Difficulty, ShootoutStatus};

    fn finished(difficulty: Difficulty) -> Shootout {
        let mut s = Shootout::new(difficulty);
        s.status = ShootoutStatus::Completed;
        s
    }

    /// Takes the store by value, so `&mut MemoryStore` goes through the
    /// blanket impl the way a borrowed store is handed to the engine.
    fn record<S: ShootoutStore>(mut store: S, shootout: &Shootout) {
        store.add_shootout(shootout).unwrap();
        store.update_aggregate_stats(shootout).unwrap();
    }

    #[test]
    fn test_memory_store_keeps_newest_first_and_resets() {
        let mut store = MemoryStore::new();
        let first = finished(Difficulty::Easy);
        let second = finished(Difficulty::Hard);

        for s in [&first, &second] {
            record(&mut store, s);
        }

        assert_eq!(store.shootouts(), &[second, first]);
        assert_eq!(store.stats().total_shootouts, 2);

        store.reset_all_data();
        assert!(store.shootouts().is_empty());
        assert_eq!(store.stats(), &PlayerStats::default());
    }
}
