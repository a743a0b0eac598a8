//! Plain-text transcript rendering for a contact's message history.
//! Attachments never appear in transcripts; they have no text body.

use crate::error::ExportError;
use crate::models::Message;

/// One transcript line: timestamp, sender, body.
pub fn format_message(message: &Message) -> String {
    let sender = if message.is_from_me { "Me" } else { message.contact_name.as_str() };
    format!("[{}] {}: {}", message.timestamp.format("%Y-%m-%d %H:%M"), sender, message.body)
}

/// Join already-sorted messages into a newline-separated transcript.
pub fn render_transcript(messages: &[Message]) -> String {
    messages.iter().map(format_message).collect::<Vec<_>>().join("\n")
}

/// Produce the bytes to write for a transcript, or fail without producing
/// anything. Rust strings are always valid UTF-8, so the only content a
/// text destination cannot carry is an interior NUL.
pub fn encode_transcript(text: &str) -> Result<Vec<u8>, ExportError> {
    if text.contains('\0') {
        return Err(ExportError::Encoding);
    }
    Ok(text.as_bytes().to_vec())
}
