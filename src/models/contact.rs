use serde::{Deserialize, Serialize};

/// Whether a contact resolves to an address-book identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Classification {
    Known,
    Unknown,
}

/// A distinct conversation partner. The display name is the identity:
/// listings deduplicate contacts by name, and chat items refer back to
/// their owner by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub name: String,
    pub classification: Classification,
    /// Ids of the conversation threads this contact participates in.
    pub chat_ids: Vec<String>,
}

impl Contact {
    pub fn is_known(&self) -> bool {
        self.classification == Classification::Known
    }
}
