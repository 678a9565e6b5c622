use std::sync::Arc;

use jiff::Timestamp;
use tokio::sync::{mpsc, oneshot};

use promptkeep_core::models::entry::{Entry, NewEntry};
use promptkeep_core::store_keys;
use promptkeep_storage::KvStore;
use promptkeep_storage::state::{load_state, save_state};

use crate::error::HistoryError;
use crate::ops::{self, AppendOutcome, ListQuery};

type Reply<T> = oneshot::Sender<Result<T, HistoryError>>;

/// Where the history lives and how large it may grow.
#[derive(Debug, Clone)]
pub struct HistorySettings {
    pub key: String,
    pub max_entries: usize,
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self {
            key: store_keys::PROMPTS.to_string(),
            max_entries: store_keys::DEFAULT_MAX_ENTRIES,
        }
    }
}

enum Command {
    Append {
        draft: NewEntry,
        reply: Option<Reply<AppendOutcome>>,
    },
    List {
        query: ListQuery,
        reply: Reply<Vec<Entry>>,
    },
    DeleteAt {
        index: usize,
        reply: Reply<bool>,
    },
    Clear {
        reply: Reply<()>,
    },
}

/// Handle to the entry store.
///
/// All operations are processed one at a time, in arrival order, by a single
/// task that owns every read-modify-write of the persisted list. Handles are
/// cheap to clone; the task exits once every handle is dropped.
#[derive(Clone)]
pub struct EntryStore {
    tx: mpsc::UnboundedSender<Command>,
}

impl EntryStore {
    /// Start the writer task on the current tokio runtime.
    pub fn spawn(store: Arc<dyn KvStore>, settings: HistorySettings) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(Writer { store, settings }.run(rx));
        Self { tx }
    }

    /// Append a captured text. Blank and duplicate texts are no-ops.
    pub async fn append(&self, draft: NewEntry) -> Result<AppendOutcome, HistoryError> {
        self.request(|reply| Command::Append {
            draft,
            reply: Some(reply),
        })
        .await
    }

    /// Queue an append without waiting for it. Never blocks; failures are
    /// logged by the writer.
    pub fn submit(&self, draft: NewEntry) {
        if self
            .tx
            .send(Command::Append { draft, reply: None })
            .is_err()
        {
            tracing::warn!("entry store has shut down, dropping capture");
        }
    }

    /// Entries matching `query`, most recent first.
    pub async fn list(&self, query: ListQuery) -> Result<Vec<Entry>, HistoryError> {
        self.request(|reply| Command::List { query, reply }).await
    }

    /// Delete the entry at `index`. Returns `false` if out of range.
    pub async fn delete_at(&self, index: usize) -> Result<bool, HistoryError> {
        self.request(|reply| Command::DeleteAt { index, reply })
            .await
    }

    /// Remove every entry.
    pub async fn clear(&self) -> Result<(), HistoryError> {
        self.request(|reply| Command::Clear { reply }).await
    }

    async fn request<T>(
        &self,
        command: impl FnOnce(Reply<T>) -> Command,
    ) -> Result<T, HistoryError> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(command(reply))
            .map_err(|_| HistoryError::Closed)?;
        rx.await.map_err(|_| HistoryError::Closed)?
    }
}

struct Writer {
    store: Arc<dyn KvStore>,
    settings: HistorySettings,
}

impl Writer {
    async fn run(self, mut rx: mpsc::UnboundedReceiver<Command>) {
        tracing::debug!(key = %self.settings.key, "entry store writer started");

        while let Some(command) = rx.recv().await {
            match command {
                Command::Append { draft, reply } => {
                    let result = self.append(draft).await;
                    match reply {
                        Some(reply) => {
                            let _ = reply.send(result);
                        }
                        None => {
                            if let Err(e) = result {
                                tracing::warn!(error = %e, "capture dropped, store write failed");
                            }
                        }
                    }
                }
                Command::List { query, reply } => {
                    let _ = reply.send(self.list(&query).await);
                }
                Command::DeleteAt { index, reply } => {
                    let _ = reply.send(self.delete_at(index).await);
                }
                Command::Clear { reply } => {
                    let _ = reply.send(self.clear().await);
                }
            }
        }

        tracing::debug!("entry store writer stopped");
    }

    async fn load(&self) -> Result<Vec<Entry>, HistoryError> {
        load_state(self.store.as_ref(), &self.settings.key)
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, key = %self.settings.key, "failed to load history");
                HistoryError::from(e)
            })
    }

    async fn save(&self, entries: &[Entry]) -> Result<(), HistoryError> {
        save_state(self.store.as_ref(), &self.settings.key, entries)
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, key = %self.settings.key, "failed to save history");
                HistoryError::from(e)
            })
    }

    async fn append(&self, draft: NewEntry) -> Result<AppendOutcome, HistoryError> {
        if draft.trimmed_text().is_none() {
            return Ok(AppendOutcome::Empty);
        }

        let mut entries = self.load().await?;
        let outcome = ops::append(
            &mut entries,
            draft,
            Timestamp::now(),
            self.settings.max_entries,
        );

        match outcome {
            AppendOutcome::Inserted { evicted } => {
                self.save(&entries).await?;
                tracing::debug!(len = entries.len(), evicted, "entry captured");
            }
            AppendOutcome::Duplicate => tracing::debug!("duplicate capture ignored"),
            AppendOutcome::Empty => {}
        }
        Ok(outcome)
    }

    async fn list(&self, query: &ListQuery) -> Result<Vec<Entry>, HistoryError> {
        let entries = self.load().await?;
        Ok(ops::filter(entries, query))
    }

    async fn delete_at(&self, index: usize) -> Result<bool, HistoryError> {
        let mut entries = self.load().await?;
        if ops::delete_at(&mut entries, index).is_none() {
            return Ok(false);
        }
        self.save(&entries).await?;
        tracing::debug!(index, len = entries.len(), "entry deleted");
        Ok(true)
    }

    async fn clear(&self) -> Result<(), HistoryError> {
        self.save(&[]).await?;
        tracing::info!("history cleared");
        Ok(())
    }
}
