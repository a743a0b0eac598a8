//! Chronological merging of chat items.
//!
//! One comparator, [`date_order`], is reused for every sorted view the
//! browser shows: the full message+attachment history of a contact, the
//! attachment gallery, and search-matched messages. All sorts are stable, so
//! items with equal timestamps keep their input order.

use std::cmp::Ordering;

use crate::archive::ArchiveStore;
use crate::models::{Attachment, ChatItem, Contact, Message};

/// Ascending timestamp order for chat items.
pub fn date_order(a: &ChatItem, b: &ChatItem) -> Ordering {
    a.timestamp().cmp(&b.timestamp())
}

/// Sort a collection of chat items chronologically. Equal timestamps keep
/// their relative input order (`sort_by` is stable).
pub fn merge(mut items: Vec<ChatItem>) -> Vec<ChatItem> {
    items.sort_by(date_order);
    items
}

/// Sort messages by the same date rule as [`merge`].
pub fn sort_messages(mut messages: Vec<Message>) -> Vec<Message> {
    messages.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
    messages
}

/// Sort attachments by the same date rule as [`merge`].
pub fn sort_attachments(mut attachments: Vec<Attachment>) -> Vec<Attachment> {
    attachments.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
    attachments
}

/// Full history of a contact: the union of its messages and attachments,
/// merged into one chronological stream.
pub fn contact_timeline(store: &ArchiveStore, contact: &Contact) -> Vec<ChatItem> {
    let (messages, attachments) = store.collect_items_for_contact(&contact.name);

    let mut items: Vec<ChatItem> = Vec::with_capacity(messages.len() + attachments.len());
    items.extend(messages.into_iter().map(ChatItem::Message));
    items.extend(attachments.into_iter().map(ChatItem::Attachment));

    merge(items)
}
