//! The browse session: the single stateful coordinator between the corpus,
//! the search engine, and a presentation layer.
//!
//! The session owns the current [`BrowseFilter`], the derived row→contact
//! projection, and the selection-driven timeline. All state mutation happens
//! on one logical control flow: background populate and search work arrives
//! over mpsc channels and is applied in [`BrowseSession::handle_events`],
//! which the presentation layer drains each tick. Search results carry a
//! generation counter; a result from a superseded search is discarded, so
//! the latest request is always the one reflected in final state.

pub mod transcript;

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};

use crate::archive::persistence::save_summary;
use crate::archive::{ArchiveStore, PopulateEvent, spawn_populate};
use crate::classify::ContactDirectory;
use crate::error::ExportError;
use crate::models::filter::MIN_SEARCH_TERM_LEN;
use crate::models::{Attachment, BrowseFilter, ChatItem, Contact};
use crate::search::{SearchUpdate, spawn_search};
use crate::timeline;

/// What the presentation layer should show for the current selection.
#[derive(Debug, Clone, Default)]
pub struct TimelineView {
    /// Chronologically sorted items to display.
    pub items: Vec<ChatItem>,
    /// Date-sorted attachments for gallery display; empty while a search is
    /// active (attachments are never search targets).
    pub attachments: Vec<Attachment>,
    /// Term to highlight, present only while a search is active.
    pub highlight: Option<String>,
}

/// An applied search: the term it ran with and its atomic result.
#[derive(Debug, Clone)]
struct ActiveSearch {
    term: String,
    result: crate::search::SearchResult,
}

pub struct BrowseSession {
    store: Option<Arc<ArchiveStore>>,
    archive_dir: Option<PathBuf>,
    directory: ContactDirectory,
    filter: BrowseFilter,
    include_unknown: bool,
    active_search: Option<ActiveSearch>,
    /// Term of the search issued under the current generation, if one is in
    /// flight.
    pending_term: Option<String>,
    generation: u64,
    progress: Option<(u64, u64)>,
    populate_error: Option<String>,
    populate_tx: Sender<PopulateEvent>,
    populate_rx: Receiver<PopulateEvent>,
    search_tx: Sender<SearchUpdate>,
    search_rx: Receiver<SearchUpdate>,
}

impl Default for BrowseSession {
    fn default() -> Self {
        Self::new()
    }
}

impl BrowseSession {
    pub fn new() -> Self {
        let (populate_tx, populate_rx) = mpsc::channel();
        let (search_tx, search_rx) = mpsc::channel();

        Self {
            store: None,
            archive_dir: None,
            directory: ContactDirectory::default(),
            filter: BrowseFilter::default(),
            include_unknown: false,
            active_search: None,
            pending_term: None,
            generation: 0,
            progress: None,
            populate_error: None,
            populate_tx,
            populate_rx,
            search_tx,
            search_rx,
        }
    }

    /// Start populating the corpus from `dir` in the background. The session
    /// stays non-interactive (empty listings) until completion arrives via
    /// [`handle_events`](Self::handle_events). Opening again replaces the
    /// current store; search and selection-relevant state reset with it.
    pub fn open(&mut self, dir: PathBuf) {
        // Fresh channel: a terminal event from a superseded populate must not
        // attach a stale store.
        let (populate_tx, populate_rx) = mpsc::channel();
        self.populate_tx = populate_tx;
        self.populate_rx = populate_rx;

        self.store = None;
        self.directory = ContactDirectory::default();
        self.active_search = None;
        self.pending_term = None;
        self.generation += 1;
        self.populate_error = None;
        self.archive_dir = Some(dir.clone());
        self.progress = Some((0, 0));
        spawn_populate(dir, self.populate_tx.clone());
    }

    /// Re-import the corpus from the archive directory this session was
    /// opened from. Returns false when the session has no directory (stores
    /// adopted via [`attach_store`](Self::attach_store) have nothing to
    /// re-read).
    pub fn refresh(&mut self) -> bool {
        match self.archive_dir.clone() {
            Some(dir) => {
                self.open(dir);
                true
            }
            None => false,
        }
    }

    /// Adopt an already-loaded store directly, bypassing the background
    /// populate. Used by one-shot CLI commands and tests.
    pub fn attach_store(&mut self, store: ArchiveStore) {
        let store = Arc::new(store);
        self.directory = ContactDirectory::from_store(&store);
        self.store = Some(store);
        self.progress = None;
    }

    /// Drain pending populate/search events onto the session's control flow.
    /// Returns true if visible state changed.
    pub fn handle_events(&mut self) -> bool {
        let mut changed = false;

        while let Ok(event) = self.populate_rx.try_recv() {
            changed |= self.apply_populate_event(event);
        }
        while let Ok(update) = self.search_rx.try_recv() {
            changed |= self.apply_search_update(update);
        }

        changed
    }

    fn apply_populate_event(&mut self, event: PopulateEvent) -> bool {
        match event {
            PopulateEvent::Progress { done, total } => {
                self.progress = Some((done, total));
                true
            }
            PopulateEvent::Completed(store) => {
                self.attach_store(*store);
                self.schedule_save();
                true
            }
            PopulateEvent::Failed(message) => {
                self.progress = None;
                self.populate_error = Some(message);
                true
            }
        }
    }

    fn apply_search_update(&mut self, update: SearchUpdate) -> bool {
        if update.generation != self.generation {
            // A newer search superseded this one; its result is authoritative.
            return false;
        }
        let term = match self.pending_term.take() {
            Some(term) => term,
            None => return false,
        };
        self.active_search = Some(ActiveSearch { term, result: update.result });
        true
    }

    /// Persist the corpus summary off the interactive path. Failures are
    /// logged, never surfaced.
    fn schedule_save(&self) {
        let (Some(store), Some(dir)) = (self.store.clone(), self.archive_dir.clone()) else {
            return;
        };
        thread::spawn(move || {
            if let Err(e) = save_summary(&dir, &store) {
                log::warn!("archive summary save failed: {:#}", e);
            }
        });
    }

    /// Update the filter. An empty term clears the search and restores the
    /// unfiltered listing; a 1-2 character term is a no-op; three or more
    /// characters issue a background search under a fresh generation.
    pub fn set_filter(
        &mut self,
        term: &str,
        after: Option<DateTime<Utc>>,
        before: Option<DateTime<Utc>>,
    ) {
        if term.is_empty() {
            self.filter = BrowseFilter { term: None, after, before };
            self.generation += 1; // invalidate any in-flight search
            self.pending_term = None;
            self.active_search = None;
            return;
        }

        if term.chars().count() < MIN_SEARCH_TERM_LEN {
            // Too short to search; prior listing stays untouched.
            return;
        }

        self.filter = BrowseFilter { term: Some(term.to_string()), after, before };
        self.generation += 1;
        self.pending_term = Some(term.to_string());

        match &self.store {
            Some(store) => {
                spawn_search(
                    Arc::clone(store),
                    term.to_string(),
                    after,
                    before,
                    self.generation,
                    self.search_tx.clone(),
                );
            }
            None => {
                // Corpus not populated yet: degrade to an empty result.
                self.pending_term = None;
                self.active_search = Some(ActiveSearch {
                    term: term.to_string(),
                    result: crate::search::SearchResult::default(),
                });
            }
        }
    }

    /// Toggle whether unknown contacts are appended after known ones in the
    /// unfiltered listing. While a search is active the search-derived
    /// listing takes precedence, so the toggle has no visible effect until
    /// the search clears.
    pub fn set_include_unknown(&mut self, include: bool) {
        self.include_unknown = include;
    }

    pub fn include_unknown(&self) -> bool {
        self.include_unknown
    }

    pub fn search_active(&self) -> bool {
        self.active_search.is_some()
    }

    pub fn search_pending(&self) -> bool {
        self.pending_term.is_some()
    }

    pub fn filter(&self) -> &BrowseFilter {
        &self.filter
    }

    pub fn is_ready(&self) -> bool {
        self.store.is_some()
    }

    pub fn progress(&self) -> Option<(u64, u64)> {
        self.progress
    }

    pub fn populate_error(&self) -> Option<&str> {
        self.populate_error.as_deref()
    }

    /// Number of distinct chats recorded for `contact`; zero before the
    /// corpus is populated.
    pub fn chat_count(&self, contact: &Contact) -> usize {
        self.store.as_ref().map_or(0, |s| s.chats_for_contact(&contact.name).len())
    }

    /// Number of contact rows under the current filter state.
    pub fn row_count(&self) -> usize {
        if let Some(search) = &self.active_search {
            return search.result.contacts.len();
        }
        if self.include_unknown {
            self.directory.known().len() + self.directory.unknown().len()
        } else {
            self.directory.known().len()
        }
    }

    /// Contact shown at `row`, or `None` when out of range. Prefers the
    /// search-derived list; otherwise known contacts come first, then
    /// unknown ones when included.
    pub fn contact_at(&self, row: usize) -> Option<&Contact> {
        if let Some(search) = &self.active_search {
            return search.result.contacts.get(row);
        }

        let known = self.directory.known();
        if row < known.len() {
            return known.get(row);
        }
        if self.include_unknown {
            return self.directory.unknown().get(row - known.len());
        }
        None
    }

    /// Timeline to display after the selection moved to `row`.
    ///
    /// With a search active: the selected contact's subset of the sorted
    /// search matches, term carried for highlighting. Without one: the
    /// contact's full merged history plus a date-sorted attachment gallery.
    /// When no contact resolves, falls back to the whole search-result
    /// timeline if searching, else an empty view.
    pub fn selection_changed(&self, row: Option<usize>) -> TimelineView {
        let contact = row.and_then(|r| self.contact_at(r));

        match (contact, &self.active_search) {
            (Some(contact), Some(search)) => {
                let items = search
                    .result
                    .sorted_messages
                    .iter()
                    .filter(|m| m.contact_name == contact.name)
                    .cloned()
                    .map(ChatItem::Message)
                    .collect();
                TimelineView {
                    items,
                    attachments: Vec::new(),
                    highlight: Some(search.term.clone()),
                }
            }
            (Some(contact), None) => {
                let Some(store) = &self.store else {
                    return TimelineView::default();
                };
                let items = timeline::contact_timeline(store, contact);
                let (_, attachments) = store.collect_items_for_contact(&contact.name);
                TimelineView {
                    items,
                    attachments: timeline::sort_attachments(attachments),
                    highlight: None,
                }
            }
            (None, Some(search)) => {
                let items = search
                    .result
                    .sorted_messages
                    .iter()
                    .cloned()
                    .map(ChatItem::Message)
                    .collect();
                TimelineView {
                    items,
                    attachments: Vec::new(),
                    highlight: Some(search.term.clone()),
                }
            }
            (None, None) => TimelineView::default(),
        }
    }

    /// Render a contact's full message history as a plain-text transcript,
    /// one line per message in chronological order. Attachments are
    /// excluded.
    pub fn contact_transcript(&self, contact: &Contact) -> Result<String, ExportError> {
        let Some(store) = &self.store else {
            return Ok(String::new());
        };
        let (messages, _) = store.collect_items_for_contact(&contact.name);
        let sorted = timeline::sort_messages(messages);
        let text = transcript::render_transcript(&sorted);
        // Validate encodability up front so export never writes partially.
        transcript::encode_transcript(&text)?;
        Ok(text)
    }

    /// Write a contact's transcript to `path`. The full byte content is
    /// produced before any write, so a failure leaves no partial file.
    pub fn export_transcript(&self, contact: &Contact, path: &Path) -> Result<(), ExportError> {
        let text = self.contact_transcript(contact)?;
        let bytes = transcript::encode_transcript(&text)?;
        fs::write(path, bytes)?;
        Ok(())
    }

    /// Block until populate completes (or fails), for one-shot callers that
    /// have no event loop. Returns true when the corpus became ready.
    pub fn wait_until_ready(&mut self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        while !self.is_ready() && self.populate_error.is_none() {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return false;
            }
            match self.populate_rx.recv_timeout(remaining) {
                Ok(event) => {
                    self.apply_populate_event(event);
                }
                Err(_) => return false,
            }
        }
        self.is_ready()
    }

    /// Block until the in-flight search (if any) has been applied. Returns
    /// true if no search remains pending.
    pub fn wait_for_search(&mut self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        while self.pending_term.is_some() {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return false;
            }
            match self.search_rx.recv_timeout(remaining) {
                Ok(update) => {
                    self.apply_search_update(update);
                }
                Err(_) => return false,
            }
        }
        true
    }
}
