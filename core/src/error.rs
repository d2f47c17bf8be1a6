use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeskError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Transaction '{id}' not found")]
    TransactionNotFound { id: String },

    #[error("Alert '{id}' not found")]
    AlertNotFound { id: String },

    #[error("Unknown review action: '{0}'")]
    UnknownAction(String),

    #[error("Desk is paused: tick() requires a running clock")]
    Paused,

    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

pub type DeskResult<T> = Result<T, DeskError>;
