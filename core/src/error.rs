use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("persisted overrides are corrupt: {0}")]
    CorruptOverrides(String),
    #[error("storage backend failed: {0}")]
    Storage(String),
}

pub type Result<T> = core::result::Result<T, GameError>;
