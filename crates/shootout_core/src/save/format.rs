use super::error::SaveError;
use super::SAVE_VERSION;
use crate::models::{PlayerStats, Shootout};
use serde::{Deserialize, Serialize};

use chrono::Utc;
use lz4_flex::{compress_prepend_size, decompress_size_prepended};
use rmp_serde::{from_slice, to_vec_named};
use sha2::{Digest, Sha256};

/// Most shootouts kept in a history. Older ones are dropped as new ones
/// arrive; `stats` keeps counting them.
pub const MAX_HISTORY_LEN: usize = 10_000;

/// Everything persisted between sessions.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ShootoutHistory {
    /// Save format version for migration
    pub version: u32,

    /// Save timestamp (unix milliseconds)
    pub timestamp: u64,

    /// Finished shootouts, newest first
    pub shootouts: Vec<Shootout>,

    /// Running totals over `shootouts`; absent in version 0 files
    #[serde(default)]
    pub stats: PlayerStats,
}

impl Default for ShootoutHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl ShootoutHistory {
    pub fn new() -> Self {
        Self {
            version: SAVE_VERSION,
            timestamp: current_timestamp(),
            shootouts: Vec::new(),
            stats: PlayerStats::default(),
        }
    }

    /// Insert `shootout` as the newest record. Returns whatever fell off
    /// the old end to stay within `MAX_HISTORY_LEN`, oldest last.
    pub fn push_newest(&mut self, shootout: Shootout) -> Vec<Shootout> {
        self.shootouts.insert(0, shootout);
        if self.shootouts.len() > MAX_HISTORY_LEN {
            self.shootouts.split_off(MAX_HISTORY_LEN)
        } else {
            Vec::new()
        }
    }

    pub fn update_timestamp(&mut self) {
        self.timestamp = current_timestamp();
    }

    pub fn validate(&self) -> Result<(), SaveError> {
        if self.shootouts.len() > MAX_HISTORY_LEN {
            return Err(SaveError::DataTooLarge { size: self.shootouts.len() });
        }

        let mut ids = std::collections::HashSet::new();
        for shootout in &self.shootouts {
            if !ids.insert(shootout.id) {
                return Err(SaveError::Corrupted);
            }

            // Strict alternation: the player is never more than one kick ahead
            let p = shootout.player_shots.len();
            let o = shootout.opponent_shots.len();
            if p < o || p - o > 1 {
                return Err(SaveError::Corrupted);
            }
        }

        Ok(())
    }
}

/// Serialize and compress shootout history
pub fn serialize_and_compress(history: &ShootoutHistory) -> Result<Vec<u8>, SaveError> {
    history.validate()?;

    // 1. MessagePack with field names
    let msgpack = to_vec_named(history).map_err(SaveError::Serialization)?;

    // 2. LZ4, size prepended
    let compressed = compress_prepend_size(&msgpack);

    // 3. SHA256 checksum at the end
    let mut hasher = Sha256::new();
    hasher.update(&compressed);
    let checksum = hasher.finalize();

    let mut result = compressed;
    result.extend_from_slice(&checksum);

    Ok(result)
}

/// Decompress and deserialize shootout history
pub fn decompress_and_deserialize(bytes: &[u8]) -> Result<ShootoutHistory, SaveError> {
    // size header + checksum
    if bytes.len() < 4 + 32 {
        return Err(SaveError::Corrupted);
    }

    let (payload, checksum_bytes) = bytes.split_at(bytes.len() - 32);

    let mut hasher = Sha256::new();
    hasher.update(payload);
    let calculated_checksum = hasher.finalize();

    if &calculated_checksum[..] != checksum_bytes {
        return Err(SaveError::ChecksumMismatch);
    }

    let msgpack = decompress_size_prepended(payload).map_err(|_| SaveError::Decompression)?;

    let history: ShootoutHistory = from_slice(&msgpack).map_err(SaveError::Deserialization)?;

    if history.version > SAVE_VERSION {
        return Err(SaveError::VersionMismatch { found: history.version, expected: SAVE_VERSION });
    }

    Ok(history)
}

pub fn current_timestamp() -> u64 {
    Utc::now().timestamp_millis().max(0) as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Difficulty, ShootoutStatus, Shot, ShotResult, ShotZone, Side};

    fn completed_shootout() -> Shootout {
        let mut s = Shootout::new(Difficulty::Hard);
        for round in 1..=3 {
            s.player_shots.push(Shot::new(
                round,
                ShotZone::TopRight,
                ShotZone::BottomLeft,
                ShotResult::Goal,
                Side::Player,
            ));
            s.opponent_shots.push(Shot::new(
                round,
                ShotZone::BottomLeft,
                ShotZone::BottomLeft,
                ShotResult::Saved,
                Side::Opponent,
            ));
        }
        s.status = ShootoutStatus::Completed;
        s
    }

    #[test]
    fn test_serialize_deserialize_roundtrip() {
        let mut history = ShootoutHistory::new();
        let shootout = completed_shootout();
        history.stats.record(&shootout);
        history.shootouts.push(shootout);

        let bytes = serialize_and_compress(&history).unwrap();
        let back = decompress_and_deserialize(&bytes).unwrap();

        assert_eq!(back, history);
        let reloaded = &back.shootouts[0];
        assert_eq!(reloaded.player_score(), 3);
        assert_eq!(reloaded.opponent_score(), 0);
        assert_eq!(reloaded.status, ShootoutStatus::Completed);
        assert_eq!(reloaded.shots().len(), 6);
    }

    #[test]
    fn test_checksum_validation() {
        let history = ShootoutHistory::new();
        let mut bytes = serialize_and_compress(&history).unwrap();

        if let Some(last) = bytes.last_mut() {
            *last = last.wrapping_add(1);
        }

        let result = decompress_and_deserialize(&bytes);
        assert!(matches!(result, Err(SaveError::ChecksumMismatch)));
    }

    #[test]
    fn test_truncated_input_is_corrupted() {
        assert!(matches!(decompress_and_deserialize(&[0u8; 10]), Err(SaveError::Corrupted)));
    }

    #[test]
    fn test_future_version_rejected() {
        let mut history = ShootoutHistory::new();
        history.version = SAVE_VERSION + 1;
        let bytes = serialize_and_compress(&history).unwrap();

        let result = decompress_and_deserialize(&bytes);
        assert!(matches!(result, Err(SaveError::VersionMismatch { found, .. }) if found == SAVE_VERSION + 1));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let mut history = ShootoutHistory::new();
        let shootout = completed_shootout();
        history.shootouts.push(shootout.clone());
        history.shootouts.push(shootout);

        assert!(matches!(history.validate(), Err(SaveError::Corrupted)));
    }

    #[test]
    fn test_push_newest_drops_oldest_past_cap() {
        let mut history = ShootoutHistory::new();
        let oldest = completed_shootout();
        history.shootouts.push(oldest.clone());
        for _ in 1..MAX_HISTORY_LEN {
            history.shootouts.insert(0, completed_shootout());
        }
        assert_eq!(history.shootouts.len(), MAX_HISTORY_LEN);

        let newest = completed_shootout();
        let dropped = history.push_newest(newest.clone());

        assert_eq!(dropped, vec![oldest]);
        assert_eq!(history.shootouts.len(), MAX_HISTORY_LEN);
        assert_eq!(history.shootouts[0], newest);
        assert!(history.validate().is_ok());
    }

    #[test]
    fn test_broken_alternation_rejected() {
        let mut history = ShootoutHistory::new();
        let mut shootout = completed_shootout();
        shootout.player_shots.clear();
        history.shootouts.push(shootout);

        assert!(matches!(serialize_and_compress(&history), Err(SaveError::Corrupted)));
    }
}
