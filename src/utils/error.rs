use thiserror::Error;

#[derive(Error, Debug)]
pub enum SkillError {
    #[error("Invalid value for slot {slot}: {value:?} ({reason})")]
    InvalidSlotValue {
        slot: String,
        value: String,
        reason: String,
    },

    #[error("Winner history is empty")]
    EmptyHistory,

    #[error("Persistence operation failed: {message}")]
    PersistenceError { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid configuration value for {field}: {value:?} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

pub type Result<T> = std::result::Result<T, SkillError>;
