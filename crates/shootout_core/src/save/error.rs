use thiserror::Error;

#[derive(Error, Debug)]
pub enum SaveError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] rmp_serde::encode::Error),

    #[error("Deserialization error: {0}")]
    Deserialization(#[from] rmp_serde::decode::Error),

    #[error("Decompression error")]
    Decompression,

    #[error("Corrupted data")]
    Corrupted,

    #[error("Version mismatch: found {found}, expected {expected}")]
    VersionMismatch { found: u32, expected: u32 },

    #[error("Checksum mismatch")]
    ChecksumMismatch,

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("History too large: {size} shootouts")]
    DataTooLarge { size: usize },
}

impl SaveError {
    /// The bytes on disk cannot be turned back into a history. A newer
    /// save version is not counted: the file is fine, this build is old.
    pub fn is_unreadable_file(&self) -> bool {
        matches!(
            self,
            SaveError::Corrupted
                | SaveError::ChecksumMismatch
                | SaveError::Decompression
                | SaveError::Deserialization(_)
                | SaveError::DataTooLarge { .. }
        )
    }
}
