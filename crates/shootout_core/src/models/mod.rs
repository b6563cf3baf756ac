pub mod difficulty;
pub mod shootout;
pub mod shot;
pub mod stats;
pub mod zone;

pub use difficulty::Difficulty;
pub use shootout::{Outcome, Shootout, ShootoutStatus, DEFAULT_REGULATION_ROUNDS};
pub use shot::{Shot, ShotResult, Side};
pub use stats::{zone_statistics, PlayerStats, ZoneStatistics};
pub use zone::ShotZone;
