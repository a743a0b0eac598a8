use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::de::Error;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use uuid::Uuid;

/// One entry of `contacts.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct ContactRecord {
    pub name: String,
    /// True when the importer resolved this contact to an address-book
    /// identity.
    #[serde(default)]
    pub known: bool,
    #[serde(default, rename = "chatIds")]
    pub chat_ids: Vec<String>,
}

/// One line of a `messages/*.jsonl` chunk.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageRecord {
    pub contact: String,
    #[serde(rename = "chatId", deserialize_with = "deserialize_chat_id")]
    pub chat_id: String,
    pub body: String,
    #[serde(default, rename = "isFromMe")]
    pub is_from_me: bool,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub timestamp: DateTime<Utc>,
}

/// One line of `attachments.jsonl`.
#[derive(Debug, Clone, Deserialize)]
pub struct AttachmentRecord {
    pub contact: String,
    pub path: PathBuf,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub timestamp: DateTime<Utc>,
}

/// Custom deserializer for timestamps that accepts both integers (epoch
/// milliseconds) and RFC3339 strings.
pub fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match value {
        Value::Number(n) => {
            let ms = n.as_i64().ok_or_else(|| Error::custom("invalid timestamp"))?;
            DateTime::from_timestamp_millis(ms)
                .ok_or_else(|| Error::custom("timestamp out of range"))
        }
        Value::String(s) => s
            .parse::<DateTime<Utc>>()
            .map_err(|e| Error::custom(format!("invalid RFC3339 timestamp: {}", e))),
        _ => Err(Error::custom("timestamp must be a number or string")),
    }
}

/// Custom deserializer for chat ids that validates UUID format.
pub fn deserialize_chat_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;

    if s.is_empty() {
        return Err(Error::custom("chat id cannot be empty"));
    }

    Uuid::parse_str(&s)
        .map_err(|e| Error::custom(format!("invalid UUID format for chat id: {}", e)))?;

    Ok(s)
}
