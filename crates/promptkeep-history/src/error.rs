use thiserror::Error;

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("storage error: {0}")]
    Storage(#[from] promptkeep_storage::StorageError),

    #[error("entry store has shut down")]
    Closed,
}
