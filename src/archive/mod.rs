//! Archive access: loading the message-history corpus from disk.
//!
//! # Error Handling Strategy
//!
//! This module follows a **graceful degradation** approach suitable for a
//! browsing tool over imported data:
//!
//! - **File-level errors**: A missing contacts file or attachments file is
//!   logged as a warning and treated as empty, allowing partial corpora.
//! - **Line-level errors**: Malformed JSONL lines are logged and skipped.
//!   A chunk fails if more than 50% of its lines fail to parse.
//! - **Chunk-level errors**: Populate fails only if more than 50% of message
//!   chunks fail, which indicates systematic corruption rather than the odd
//!   truncated export.
//! - **Persistence**: the post-populate summary save is best-effort; failures
//!   are logged, never surfaced to the interactive session.

pub mod parse;
pub mod persistence;
pub mod records;
pub mod store;

pub use records::{AttachmentRecord, ContactRecord, MessageRecord};
pub use store::{ArchiveStore, PopulateEvent, spawn_populate};
