use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("io error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("store file is not a JSON object: {path}")]
    Malformed { path: String },

    #[error("store unavailable: {0}")]
    Unavailable(String),
}
