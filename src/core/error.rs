use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store file '{}' is corrupted: {reason}", path.display())]
    Corrupted { path: PathBuf, reason: String },

    #[error("Lock error: {0}")]
    Lock(String),

    #[error("Recipe ids exhausted: next_id {next_id} cannot be advanced")]
    IdsExhausted { next_id: i64 },
}

pub type Result<T> = std::result::Result<T, StoreError>;

impl<T> From<std::sync::PoisonError<T>> for StoreError {
    fn from(err: std::sync::PoisonError<T>) -> Self {
        Self::Lock(err.to_string())
    }
}
