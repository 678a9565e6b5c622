use jiff::tz::TimeZone;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

use promptkeep_history::{EntryStore, ListQuery};
use promptkeep_storage::StoreChange;

use crate::render::{self, EntryList};

/// Render once, then again every time `key` changes. Ends when the change
/// stream closes or the entry store shuts down.
pub fn rerender_on_change<F>(
    mut changes: broadcast::Receiver<StoreChange>,
    store: EntryStore,
    key: String,
    query: ListQuery,
    mut on_render: F,
) -> JoinHandle<()>
where
    F: FnMut(EntryList) + Send + 'static,
{
    tokio::spawn(async move {
        let tz = TimeZone::system();
        loop {
            match store.list(ListQuery::all()).await {
                Ok(entries) => on_render(render::render(&entries, &query, &tz)),
                Err(e) => {
                    tracing::debug!(error = %e, "entry store gone, stopping re-render");
                    return;
                }
            }

            loop {
                match changes.recv().await {
                    Ok(change) if change.key == key => break,
                    Ok(_) => continue,
                    Err(broadcast::error::RecvError::Lagged(missed)) => {
                        tracing::debug!(missed, "change stream lagged, re-rendering");
                        break;
                    }
                    Err(broadcast::error::RecvError::Closed) => return,
                }
            }
        }
    })
}
