use thiserror::Error;

use promptkeep_history::HistoryError;

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("context menu error: {0}")]
    Menu(String),

    #[error("history error: {0}")]
    History(#[from] HistoryError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
