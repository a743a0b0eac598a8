use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single text message belonging to one contact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub contact_name: String,
    pub chat_id: String,
    pub body: String,
    /// True for messages sent by the archive owner, false for received ones.
    pub is_from_me: bool,
    pub timestamp: DateTime<Utc>,
}

/// A file attachment belonging to one contact. Carries no searchable text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    pub contact_name: String,
    pub file_path: PathBuf,
    pub timestamp: DateTime<Utc>,
}

/// A conversation thread grouping. Only its identity matters here; a contact
/// may belong to several chats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chat {
    pub id: String,
    pub contact_name: String,
}

/// Either a message or an attachment. Both carry a timestamp and a
/// back-reference to their owning contact; timelines sort over this variant
/// and pattern-match only where the payload matters.
#[derive(Debug, Clone, PartialEq)]
pub enum ChatItem {
    Message(Message),
    Attachment(Attachment),
}

impl ChatItem {
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            ChatItem::Message(m) => m.timestamp,
            ChatItem::Attachment(a) => a.timestamp,
        }
    }

    pub fn contact_name(&self) -> &str {
        match self {
            ChatItem::Message(m) => &m.contact_name,
            ChatItem::Attachment(a) => &a.contact_name,
        }
    }

    pub fn as_message(&self) -> Option<&Message> {
        match self {
            ChatItem::Message(m) => Some(m),
            ChatItem::Attachment(_) => None,
        }
    }
}
