use crate::engine::GameState;
use crate::save::SaveError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("{operation} is not allowed while {state}")]
    IllegalTransition { operation: &'static str, state: GameState },

    #[error("{operation} called after the shootout finished; call start_new first")]
    ShootoutFinished { operation: &'static str },

    #[error("Failed to persist shootout: {0}")]
    Persistence(#[from] SaveError),

    #[error("Invalid engine config: {0}")]
    Config(String),
}

impl EngineError {
    /// Caller-discipline errors, as opposed to failures of the store.
    pub fn is_transition_error(&self) -> bool {
        matches!(self, EngineError::IllegalTransition { .. } | EngineError::ShootoutFinished { .. })
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
