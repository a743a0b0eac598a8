//! Chat History Browser - Browse and search an archived message history
//!
//! This library implements a read-only browser over a message archive laid
//! out on disk (contacts, JSONL message chunks, attachments). It supports:
//!
//! - Loading the corpus in the background while the browser stays responsive
//! - Classifying contacts as known (address book) or unknown
//! - Case-insensitive text search with optional date-range bounds
//! - Chronological timelines merging messages and attachments
//! - Plain-text transcript export per contact
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use chat_history_browser::archive::ArchiveStore;
//!
//! let store = ArchiveStore::load(Path::new("/home/alice/.chat-archive"), &mut |_, _| {})?;
//! println!("Loaded {} messages", store.messages().len());
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod archive;
pub mod classify;
pub mod cli;
pub mod clipboard;
pub mod error;
pub mod models;
pub mod search;
pub mod session;
pub mod timeline;
pub mod tui;
pub mod utils;

// Re-export commonly used types
pub use archive::ArchiveStore;
pub use error::ExportError;
pub use models::{BrowseFilter, ChatItem, Classification, Contact, Message};
pub use search::execute_search;
pub use session::BrowseSession;
pub use utils::{format_path_with_tilde, get_archive_dir, transcript_file_name};
