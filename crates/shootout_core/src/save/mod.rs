// Shootout history persistence
// MessagePack + LZ4 compression with versioning and integrity checks

pub mod error;
pub mod format;
pub mod manager;
pub mod migration;
pub mod store;

pub use error::SaveError;
pub use format::{decompress_and_deserialize, serialize_and_compress, ShootoutHistory};
pub use manager::HistorySaveManager;
pub use migration::migrate_history;
pub use store::{MemoryStore, ShootoutStore};

pub const SAVE_VERSION: u32 = 1;
