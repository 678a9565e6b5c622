use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomError {
    #[error("document has been torn down")]
    Detached,

    #[error("element no longer in document")]
    NotFound,

    #[error("page rejected the operation: {0}")]
    Rejected(String),
}
