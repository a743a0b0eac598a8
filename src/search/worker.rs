use std::sync::Arc;
use std::sync::mpsc::Sender;
use std::thread;
use std::thread::JoinHandle;

use chrono::{DateTime, Utc};

use super::engine::{SearchResult, execute_search};
use crate::archive::ArchiveStore;

/// A completed search tagged with the generation it was issued under. The
/// session applies an update only if the generation still matches its
/// current one, so the latest request always wins.
#[derive(Debug)]
pub struct SearchUpdate {
    pub generation: u64,
    pub result: SearchResult,
}

/// Scan the corpus on a background thread and deliver the result through
/// `tx`. The store is an immutable snapshot; a stale update is discarded at
/// the receiving end, never cancelled mid-scan.
pub fn spawn_search(
    store: Arc<ArchiveStore>,
    term: String,
    after: Option<DateTime<Utc>>,
    before: Option<DateTime<Utc>>,
    generation: u64,
    tx: Sender<SearchUpdate>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let result = execute_search(&store, &term, after, before);
        // The receiver may be gone if the session was dropped.
        let _ = tx.send(SearchUpdate { generation, result });
    })
}
