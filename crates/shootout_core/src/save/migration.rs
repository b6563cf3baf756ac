use super::error::SaveError;
use super::format::ShootoutHistory;
use super::SAVE_VERSION;
use crate::models::PlayerStats;

/// Migrate history data from older versions to current version
pub fn migrate_history(mut history: ShootoutHistory) -> Result<ShootoutHistory, SaveError> {
    let original_version = history.version;

    history = match history.version {
        0 => migrate_v0_to_v1(history)?,
        1 => history,
        _ => {
            return Err(SaveError::VersionMismatch {
                found: history.version,
                expected: SAVE_VERSION,
            });
        }
    };

    history.version = SAVE_VERSION;

    if original_version != SAVE_VERSION {
        history.update_timestamp();
        log::info!("Migrated history from version {} to {}", original_version, SAVE_VERSION);
    }

    Ok(history)
}

/// Version 0 stored only the shootout list; totals are rebuilt from it.
fn migrate_v0_to_v1(mut history: ShootoutHistory) -> Result<ShootoutHistory, SaveError> {
    log::info!("Migrating history from version 0 to 1");

    let before = history.shootouts.len();
    history.shootouts.retain(|s| s.is_completed());
    if history.shootouts.len() != before {
        log::warn!("Dropped {} unfinished shootouts", before - history.shootouts.len());
    }

    history.stats = PlayerStats::from_history(&history.shootouts);
    Ok(history)
}
