//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::fs;
use std::io::Write;
use std::path::Path;

use tempfile::TempDir;

/// Builder for creating test archive directory structures
pub struct ArchiveDirBuilder {
    temp_dir: TempDir,
}

impl ArchiveDirBuilder {
    /// Create a new builder with an empty archive directory
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        Self { temp_dir }
    }

    /// Get the path to the archive directory
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Add a contacts.json file with the given raw content
    pub fn with_contacts_raw(self, content: &str) -> Self {
        let path = self.temp_dir.path().join("contacts.json");
        fs::write(path, content).expect("Failed to write contacts.json");
        self
    }

    /// Add contact entries programmatically
    pub fn with_contacts(self, entries: &[ContactEntryBuilder]) -> Self {
        let body = entries.iter().map(|e| e.to_json()).collect::<Vec<_>>().join(",");
        self.with_contacts_raw(&format!("[{}]", body))
    }

    /// Add a message chunk under messages/ with the given file name
    pub fn with_message_chunk(self, filename: &str, entries: &[MessageEntryBuilder]) -> Self {
        let content = entries.iter().map(|e| e.to_json()).collect::<Vec<_>>().join("\n");
        self.with_message_chunk_raw(filename, &content)
    }

    /// Add a message chunk with raw JSONL content
    pub fn with_message_chunk_raw(self, filename: &str, content: &str) -> Self {
        let messages_dir = self.temp_dir.path().join("messages");
        fs::create_dir_all(&messages_dir).expect("Failed to create messages dir");

        let mut file = fs::File::create(messages_dir.join(filename))
            .expect("Failed to create message chunk");
        file.write_all(content.as_bytes()).expect("Failed to write message chunk");
        self
    }

    /// Add an attachments.jsonl file
    pub fn with_attachments(self, entries: &[AttachmentEntryBuilder]) -> Self {
        let content = entries.iter().map(|e| e.to_json()).collect::<Vec<_>>().join("\n");
        let path = self.temp_dir.path().join("attachments.jsonl");
        fs::write(path, content).expect("Failed to write attachments.jsonl");
        self
    }

    /// Build and return the temp directory (consumes self)
    pub fn build(self) -> TempDir {
        self.temp_dir
    }
}

impl Default for ArchiveDirBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for contacts.json entries
pub struct ContactEntryBuilder {
    name: String,
    known: bool,
    chat_ids: Vec<String>,
}

impl ContactEntryBuilder {
    pub fn new(name: &str) -> Self {
        Self { name: name.to_string(), known: true, chat_ids: Vec::new() }
    }

    pub fn known(mut self, known: bool) -> Self {
        self.known = known;
        self
    }

    pub fn chat_id(mut self, chat_id: &str) -> Self {
        self.chat_ids.push(chat_id.to_string());
        self
    }

    /// Convert to JSON string
    pub fn to_json(&self) -> String {
        let ids = self
            .chat_ids
            .iter()
            .map(|id| format!(r#""{}""#, id))
            .collect::<Vec<_>>()
            .join(",");
        format!(r#"{{"name":"{}","known":{},"chatIds":[{}]}}"#, self.name, self.known, ids)
    }
}

/// Builder for message chunk entries
pub struct MessageEntryBuilder {
    contact: String,
    chat_id: String,
    body: String,
    is_from_me: bool,
    timestamp_ms: i64,
}

impl MessageEntryBuilder {
    pub fn new(contact: &str) -> Self {
        Self {
            contact: contact.to_string(),
            chat_id: "550e8400-e29b-41d4-a716-446655440000".to_string(),
            body: "Test message".to_string(),
            is_from_me: false,
            timestamp_ms: 1_234_567_890_000,
        }
    }

    pub fn chat_id(mut self, chat_id: &str) -> Self {
        self.chat_id = chat_id.to_string();
        self
    }

    pub fn body(mut self, body: &str) -> Self {
        self.body = body.to_string();
        self
    }

    pub fn from_me(mut self, from_me: bool) -> Self {
        self.is_from_me = from_me;
        self
    }

    /// Set the timestamp in epoch milliseconds
    pub fn timestamp_ms(mut self, timestamp_ms: i64) -> Self {
        self.timestamp_ms = timestamp_ms;
        self
    }

    /// Convert to JSON string
    pub fn to_json(&self) -> String {
        format!(
            r#"{{"contact":"{}","chatId":"{}","body":"{}","isFromMe":{},"timestamp":{}}}"#,
            self.contact, self.chat_id, self.body, self.is_from_me, self.timestamp_ms
        )
    }
}

/// Builder for attachments.jsonl entries
pub struct AttachmentEntryBuilder {
    contact: String,
    path: String,
    timestamp_ms: i64,
}

impl AttachmentEntryBuilder {
    pub fn new(contact: &str) -> Self {
        Self {
            contact: contact.to_string(),
            path: "photos/img-0001.jpg".to_string(),
            timestamp_ms: 1_234_567_890_000,
        }
    }

    pub fn path(mut self, path: &str) -> Self {
        self.path = path.to_string();
        self
    }

    pub fn timestamp_ms(mut self, timestamp_ms: i64) -> Self {
        self.timestamp_ms = timestamp_ms;
        self
    }

    /// Convert to JSON string
    pub fn to_json(&self) -> String {
        format!(
            r#"{{"contact":"{}","path":"{}","timestamp":{}}}"#,
            self.contact, self.path, self.timestamp_ms
        )
    }
}

/// Helper to create a minimal valid archive directory
pub fn minimal_archive_dir() -> TempDir {
    ArchiveDirBuilder::new().with_contacts(&[]).build()
}

/// Helper to create a realistic archive with known/unknown contacts,
/// two message chunks, and attachments
pub fn realistic_archive_dir() -> TempDir {
    ArchiveDirBuilder::new()
        .with_contacts(&[
            ContactEntryBuilder::new("Alice Smith")
                .chat_id("550e8400-e29b-41d4-a716-446655440000"),
            ContactEntryBuilder::new("Bob Jones").chat_id("550e8400-e29b-41d4-a716-446655440001"),
            ContactEntryBuilder::new("+15550001111")
                .known(false)
                .chat_id("550e8400-e29b-41d4-a716-446655440002"),
        ])
        .with_message_chunk(
            "chunk-0001.jsonl",
            &[
                MessageEntryBuilder::new("Alice Smith")
                    .body("lunch tomorrow?")
                    .timestamp_ms(1_000_000),
                MessageEntryBuilder::new("Alice Smith")
                    .body("sounds good")
                    .from_me(true)
                    .timestamp_ms(2_000_000),
                MessageEntryBuilder::new("Bob Jones")
                    .chat_id("550e8400-e29b-41d4-a716-446655440001")
                    .body("did you see the game")
                    .timestamp_ms(3_000_000),
            ],
        )
        .with_message_chunk(
            "chunk-0002.jsonl",
            &[
                MessageEntryBuilder::new("+15550001111")
                    .chat_id("550e8400-e29b-41d4-a716-446655440002")
                    .body("your package has shipped")
                    .timestamp_ms(4_000_000),
                MessageEntryBuilder::new("Alice Smith")
                    .body("see you at noon tomorrow")
                    .timestamp_ms(5_000_000),
            ],
        )
        .with_attachments(&[
            AttachmentEntryBuilder::new("Alice Smith")
                .path("photos/menu.jpg")
                .timestamp_ms(1_500_000),
        ])
        .build()
}
