//! Data models for the message-history archive.
//!
//! This module defines the data structures used throughout the application:
//!
//! - [`Contact`] - A conversation partner, keyed by display name
//! - [`Message`] / [`Attachment`] - The two kinds of timestamped chat items
//! - [`ChatItem`] - Tagged variant unifying messages and attachments
//! - [`Chat`] - A conversation thread grouping (identity only)
//! - [`BrowseFilter`] - Current search term and date bounds
//!
//! These models use serde for JSON (de)serialization; archive-specific record
//! shapes and custom deserializers live in the `archive` module.

pub mod chat;
pub mod contact;
pub mod filter;

pub use chat::{Attachment, Chat, ChatItem, Message};
pub use contact::{Classification, Contact};
pub use filter::BrowseFilter;
