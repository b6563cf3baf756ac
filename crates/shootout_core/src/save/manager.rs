use super::error::SaveError;
use super::format::{decompress_and_deserialize, serialize_and_compress, ShootoutHistory};
use super::migration::migrate_history;
use super::store::ShootoutStore;
use crate::models::{zone_statistics, PlayerStats, Shootout, ZoneStatistics};

use std::fs::{remove_file, rename, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

/// File-backed shootout history.
///
/// The whole history is kept in memory and rewritten atomically on every
/// change. Memory only moves ahead of the file once a write has succeeded.
#[derive(Debug)]
pub struct HistorySaveManager {
    path: PathBuf,
    history: ShootoutHistory,
}

impl HistorySaveManager {
    /// Open the history at `path`, starting empty if the file does not exist.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, SaveError> {
        let path = path.into();
        let history = if path.exists() {
            Self::load_from_path(&path)?
        } else {
            log::debug!("No history at {:?}, starting fresh", path);
            ShootoutHistory::new()
        };
        Ok(Self { path, history })
    }

    /// `saves/shootouts.dat` under the working directory.
    pub fn default_path() -> PathBuf {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join("saves")
            .join("shootouts.dat")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Newest first.
    pub fn shootouts(&self) -> &[Shootout] {
        &self.history.shootouts
    }

    pub fn completed_shootouts(&self) -> Vec<&Shootout> {
        self.history.shootouts.iter().filter(|s| s.is_completed()).collect()
    }

    pub fn stats(&self) -> &PlayerStats {
        &self.history.stats
    }

    pub fn zone_statistics(&self) -> Vec<ZoneStatistics> {
        zone_statistics(&self.history.shootouts)
    }

    pub fn save(&mut self) -> Result<(), SaveError> {
        self.history.update_timestamp();
        Self::save_to_path(&self.path, &self.history)
    }

    /// Forget all shootouts and totals and remove the file.
    pub fn reset_all_data(&mut self) -> Result<(), SaveError> {
        self.history = ShootoutHistory::new();
        Self::reset_path(&self.path)
    }

    /// Delete the history at `path`, plus any temp file a crashed save left
    /// behind. The file is never decoded, so damaged histories can be reset.
    pub fn reset_path(path: &Path) -> Result<(), SaveError> {
        for file in [path.to_path_buf(), path.with_extension("tmp")] {
            if file.exists() {
                remove_file(&file)?;
                log::info!("Deleted shootout history at {:?}", file);
            }
        }
        Ok(())
    }

    fn save_to_path(path: &Path, history: &ShootoutHistory) -> Result<(), SaveError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let data = serialize_and_compress(history)?;

        // Atomic save: write to temp file, then rename
        let temp_path = path.with_extension("tmp");

        {
            let mut file = File::create(&temp_path)?;
            file.write_all(&data)?;
            file.flush()?;
            file.sync_all()?;
        }

        rename(&temp_path, path)?;

        log::debug!("Saved {} bytes to {:?}", data.len(), path);
        Ok(())
    }

    fn load_from_path(path: &Path) -> Result<ShootoutHistory, SaveError> {
        if !path.exists() {
            return Err(SaveError::FileNotFound { path: path.display().to_string() });
        }

        let mut file = File::open(path)?;
        let mut data = Vec::new();
        file.read_to_end(&mut data)?;

        let history = decompress_and_deserialize(&data)?;
        let history = migrate_history(history)?;

        log::debug!("Loaded {} bytes from {:?}", data.len(), path);
        Ok(history)
    }
}

impl ShootoutStore for HistorySaveManager {
    fn add_shootout(&mut self, shootout: &Shootout) -> Result<(), SaveError> {
        let dropped = self.history.push_newest(shootout.clone());
        if let Err(e) = self.save() {
            self.history.shootouts.remove(0);
            self.history.shootouts.extend(dropped);
            return Err(e);
        }

        if !dropped.is_empty() {
            log::info!("Dropped {} oldest shootouts from history", dropped.len());
        }
        log::info!("Recorded shootout {} ({})", shootout.id, shootout.score_line());
        Ok(())
    }

    fn update_aggregate_stats(&mut self, shootout: &Shootout) -> Result<(), SaveError> {
        let previous = self.history.stats.clone();
        self.history.stats.record(shootout);
        if let Err(e) = self.save() {
            self.history.stats = previous;
            return Err(e);
        }
        Ok(())
    }
}
