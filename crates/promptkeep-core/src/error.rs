use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid entry: {0}")]
    InvalidEntry(String),
}
