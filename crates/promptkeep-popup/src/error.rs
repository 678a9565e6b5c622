use thiserror::Error;

use crate::tabs::TabId;

/// Failures of the tab transport itself.
#[derive(Debug, Error)]
pub enum TabError {
    #[error("tab {0} is no longer open")]
    Closed(TabId),

    #[error("script injection failed: {0}")]
    Script(String),
}

#[derive(Debug, Error)]
pub enum InsertError {
    #[error("No active tab found.")]
    NoActiveTab,

    #[error(transparent)]
    Transport(#[from] TabError),
}

#[derive(Debug, Error)]
pub enum CopyError {
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),

    #[error("clipboard write failed: {0}")]
    Write(String),
}
