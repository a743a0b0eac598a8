//! In-memory archive corpus and its background populate operation.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use std::thread;
use std::thread::JoinHandle;

use anyhow::{Result, bail};
use walkdir::WalkDir;

use super::parse::{parse_attachments_file, parse_contacts_file, parse_message_chunk};
use crate::models::{Attachment, Chat, ChatItem, Classification, Contact, Message};

const CONTACTS_FILENAME: &str = "contacts.json";
const MESSAGES_DIRNAME: &str = "messages";
const ATTACHMENTS_FILENAME: &str = "attachments.jsonl";

/// Events reported by the background populate operation. `Completed` and
/// `Failed` are terminal and sent exactly once.
#[derive(Debug)]
pub enum PopulateEvent {
    Progress { done: u64, total: u64 },
    Completed(Box<ArchiveStore>),
    Failed(String),
}

/// The loaded corpus: contacts, messages, and attachments in import order.
/// Immutable once populated; browse sessions share it behind an `Arc` so
/// search workers can scan it off the interactive path.
#[derive(Debug, Default, Clone)]
pub struct ArchiveStore {
    contacts: Vec<Contact>,
    messages: Vec<Message>,
    attachments: Vec<Attachment>,
    chats: Vec<Chat>,
}

impl ArchiveStore {
    /// Assemble a store from already-materialized parts.
    ///
    /// Contacts deduplicate by name (first record wins). Names that appear
    /// only on messages or attachments get an unknown-classified contact
    /// appended after the declared ones, so every chat item has exactly one
    /// owner.
    pub fn from_parts(
        contacts: Vec<Contact>,
        messages: Vec<Message>,
        attachments: Vec<Attachment>,
    ) -> Self {
        let mut seen_names: HashSet<String> = HashSet::new();
        let mut unique_contacts: Vec<Contact> = Vec::with_capacity(contacts.len());

        for contact in contacts {
            if seen_names.insert(contact.name.clone()) {
                unique_contacts.push(contact);
            }
        }

        for name in messages
            .iter()
            .map(|m| &m.contact_name)
            .chain(attachments.iter().map(|a| &a.contact_name))
        {
            if seen_names.insert(name.clone()) {
                unique_contacts.push(Contact {
                    name: name.clone(),
                    classification: Classification::Unknown,
                    chat_ids: Vec::new(),
                });
            }
        }

        let chats = build_chats(&unique_contacts, &messages);

        Self { contacts: unique_contacts, messages, attachments, chats }
    }

    /// Load the corpus from an archive directory, reporting `(done, total)`
    /// unit counts through `progress` as each file completes.
    pub fn load(dir: &Path, progress: &mut dyn FnMut(u64, u64)) -> Result<Self> {
        let chunk_paths = message_chunk_paths(dir);
        let total = chunk_paths.len() as u64 + 2;
        let mut done = 0u64;
        let mut report = |done: u64| progress(done, total);

        let contacts_path = dir.join(CONTACTS_FILENAME);
        let contact_records = if contacts_path.exists() {
            match parse_contacts_file(&contacts_path) {
                Ok(records) => records,
                Err(e) => {
                    log::warn!("failed to parse {}: {}", contacts_path.display(), e);
                    Vec::new()
                }
            }
        } else {
            log::warn!("no {} in {}", CONTACTS_FILENAME, dir.display());
            Vec::new()
        };
        done += 1;
        report(done);

        let mut messages = Vec::new();
        let mut chunks_failed = 0usize;
        for chunk_path in &chunk_paths {
            match parse_message_chunk(chunk_path) {
                Ok(records) => {
                    messages.extend(records.into_iter().map(|r| Message {
                        contact_name: r.contact,
                        chat_id: r.chat_id,
                        body: r.body,
                        is_from_me: r.is_from_me,
                        timestamp: r.timestamp,
                    }));
                }
                Err(e) => {
                    chunks_failed += 1;
                    log::warn!("failed to parse chunk {}: {}", chunk_path.display(), e);
                }
            }
            done += 1;
            report(done);
        }

        if !chunk_paths.is_empty() {
            let failure_rate = chunks_failed as f64 / chunk_paths.len() as f64;
            if failure_rate > 0.5 {
                bail!(
                    "Populate failed: {}/{} message chunks failed to parse",
                    chunks_failed,
                    chunk_paths.len()
                );
            }
        }

        let attachments_path = dir.join(ATTACHMENTS_FILENAME);
        let attachments = if attachments_path.exists() {
            match parse_attachments_file(&attachments_path) {
                Ok(records) => records
                    .into_iter()
                    .map(|r| Attachment {
                        contact_name: r.contact,
                        file_path: r.path,
                        timestamp: r.timestamp,
                    })
                    .collect(),
                Err(e) => {
                    log::warn!("failed to parse {}: {}", attachments_path.display(), e);
                    Vec::new()
                }
            }
        } else {
            Vec::new()
        };
        done += 1;
        report(done);

        let contacts = contact_records
            .into_iter()
            .map(|r| Contact {
                name: r.name,
                classification: if r.known {
                    Classification::Known
                } else {
                    Classification::Unknown
                },
                chat_ids: r.chat_ids,
            })
            .collect();

        Ok(Self::from_parts(contacts, messages, attachments))
    }

    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn attachments(&self) -> &[Attachment] {
        &self.attachments
    }

    pub fn contact_by_name(&self, name: &str) -> Option<&Contact> {
        self.contacts.iter().find(|c| c.name == name)
    }

    /// Materialize a contact's messages and attachments for timeline access.
    pub fn collect_items_for_contact(&self, name: &str) -> (Vec<Message>, Vec<Attachment>) {
        let messages =
            self.messages.iter().filter(|m| m.contact_name == name).cloned().collect();
        let attachments =
            self.attachments.iter().filter(|a| a.contact_name == name).cloned().collect();
        (messages, attachments)
    }

    pub fn chats_for_contact(&self, name: &str) -> Vec<&Chat> {
        self.chats.iter().filter(|c| c.contact_name == name).collect()
    }

    /// All contact timelines expressed as chat items, unsorted.
    pub fn all_items(&self) -> Vec<ChatItem> {
        let mut items: Vec<ChatItem> =
            Vec::with_capacity(self.messages.len() + self.attachments.len());
        items.extend(self.messages.iter().cloned().map(ChatItem::Message));
        items.extend(self.attachments.iter().cloned().map(ChatItem::Attachment));
        items
    }
}

/// Build the chat list from declared contact chat ids plus ids observed on
/// messages, first occurrence wins.
fn build_chats(contacts: &[Contact], messages: &[Message]) -> Vec<Chat> {
    let mut seen: HashSet<(String, String)> = HashSet::new();
    let mut chats = Vec::new();

    for contact in contacts {
        for chat_id in &contact.chat_ids {
            if seen.insert((contact.name.clone(), chat_id.clone())) {
                chats.push(Chat { id: chat_id.clone(), contact_name: contact.name.clone() });
            }
        }
    }

    for message in messages {
        if seen.insert((message.contact_name.clone(), message.chat_id.clone())) {
            chats.push(Chat {
                id: message.chat_id.clone(),
                contact_name: message.contact_name.clone(),
            });
        }
    }

    chats
}

/// Message chunk files under `<archive>/messages/`, sorted by path so the
/// corpus order is deterministic across runs.
fn message_chunk_paths(dir: &Path) -> Vec<PathBuf> {
    let messages_dir = dir.join(MESSAGES_DIRNAME);
    let mut paths: Vec<PathBuf> = WalkDir::new(&messages_dir)
        .min_depth(1)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "jsonl"))
        .collect();
    paths.sort();
    paths
}

/// Run the populate operation on a background thread. Progress events stream
/// through `tx`; exactly one terminal event (`Completed` or `Failed`)
/// follows.
pub fn spawn_populate(dir: PathBuf, tx: Sender<PopulateEvent>) -> JoinHandle<()> {
    thread::spawn(move || {
        let progress_tx = tx.clone();
        let mut progress = move |done: u64, total: u64| {
            let _ = progress_tx.send(PopulateEvent::Progress { done, total });
        };

        match ArchiveStore::load(&dir, &mut progress) {
            Ok(store) => {
                let _ = tx.send(PopulateEvent::Completed(Box::new(store)));
            }
            Err(e) => {
                log::error!("populate failed for {}: {:#}", dir.display(), e);
                let _ = tx.send(PopulateEvent::Failed(format!("{:#}", e)));
            }
        }
    })
}
