use std::collections::HashSet;

use chrono::{DateTime, Utc};

use crate::archive::ArchiveStore;
use crate::models::filter::MIN_SEARCH_TERM_LEN;
use crate::models::{Contact, Message};
use crate::timeline;

/// Outcome of one search: the raw matches, the contacts they imply, and the
/// matches re-sorted chronologically. Built in one pass and handed over as a
/// single value so callers never observe a partial update.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchResult {
    /// All matching messages, in corpus order.
    pub matching_messages: Vec<Message>,
    /// Contacts referenced by the matches, deduplicated by name, ordered by
    /// first occurrence in `matching_messages`.
    pub contacts: Vec<Contact>,
    /// `matching_messages` sorted by the timeline date rule.
    pub sorted_messages: Vec<Message>,
}

impl SearchResult {
    pub fn is_empty(&self) -> bool {
        self.matching_messages.is_empty()
    }
}

/// True when a message body contains `term_lower` (already lowercased) and
/// its timestamp falls inside the inclusive date bounds.
fn message_matches(
    message: &Message,
    term_lower: &str,
    after: Option<DateTime<Utc>>,
    before: Option<DateTime<Utc>>,
) -> bool {
    if let Some(after) = after
        && message.timestamp < after
    {
        return false;
    }
    if let Some(before) = before
        && message.timestamp > before
    {
        return false;
    }
    message.body.to_lowercase().contains(term_lower)
}

/// Scan the corpus for messages matching `term` within the date bounds.
///
/// Matching is case-insensitive. Terms shorter than the search threshold
/// yield an empty result; the session refuses to issue them, the engine
/// enforces the same floor.
pub fn execute_search(
    store: &ArchiveStore,
    term: &str,
    after: Option<DateTime<Utc>>,
    before: Option<DateTime<Utc>>,
) -> SearchResult {
    if term.chars().count() < MIN_SEARCH_TERM_LEN {
        return SearchResult::default();
    }

    let term_lower = term.to_lowercase();
    let matching_messages: Vec<Message> = store
        .messages()
        .iter()
        .filter(|m| message_matches(m, &term_lower, after, before))
        .cloned()
        .collect();

    let contacts = contacts_from_messages(store, &matching_messages);
    let sorted_messages = timeline::sort_messages(matching_messages.clone());

    SearchResult { matching_messages, contacts, sorted_messages }
}

/// Distinct contacts referenced by `messages`, first occurrence first.
/// One-pass dedup by name; no re-sort.
pub fn contacts_from_messages(store: &ArchiveStore, messages: &[Message]) -> Vec<Contact> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut contacts = Vec::new();

    for message in messages {
        if seen.insert(message.contact_name.as_str())
            && let Some(contact) = store.contact_by_name(&message.contact_name)
        {
            contacts.push(contact.clone());
        }
    }

    contacts
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::models::{Classification, Contact};

    fn message(contact_name: &str, body: &str, ts: i64) -> Message {
        Message {
            contact_name: contact_name.to_string(),
            chat_id: "chat-1".to_string(),
            body: body.to_string(),
            is_from_me: false,
            timestamp: Utc.timestamp_opt(ts, 0).unwrap(),
        }
    }

    fn store_with(messages: Vec<Message>) -> ArchiveStore {
        ArchiveStore::from_parts(
            vec![
                Contact {
                    name: "Alice".to_string(),
                    classification: Classification::Known,
                    chat_ids: vec![],
                },
                Contact {
                    name: "Bob".to_string(),
                    classification: Classification::Unknown,
                    chat_ids: vec![],
                },
            ],
            messages,
            vec![],
        )
    }

    #[test]
    fn test_search_substring_match() {
        let store = store_with(vec![
            message("Alice", "hello world", 1),
            message("Bob", "nothing here", 2),
        ]);

        let result = execute_search(&store, "hello", None, None);
        assert_eq!(result.matching_messages.len(), 1);
        assert_eq!(result.matching_messages[0].contact_name, "Alice");
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let store = store_with(vec![message("Alice", "Hello World", 1)]);

        assert_eq!(execute_search(&store, "hello", None, None).matching_messages.len(), 1);
        assert_eq!(execute_search(&store, "HELLO", None, None).matching_messages.len(), 1);
        assert_eq!(execute_search(&store, "lo wo", None, None).matching_messages.len(), 1);
    }

    #[test]
    fn test_search_short_term_yields_empty() {
        let store = store_with(vec![message("Alice", "hi there", 1)]);

        assert!(execute_search(&store, "hi", None, None).is_empty());
        assert!(execute_search(&store, "", None, None).is_empty());
    }

    #[test]
    fn test_search_after_bound_inclusive() {
        let boundary = Utc.timestamp_opt(100, 0).unwrap();
        let store = store_with(vec![
            message("Alice", "hello before", 99),
            message("Alice", "hello at", 100),
            message("Alice", "hello after", 101),
        ]);

        let result = execute_search(&store, "hello", Some(boundary), None);
        let bodies: Vec<&str> =
            result.matching_messages.iter().map(|m| m.body.as_str()).collect();
        assert_eq!(bodies, vec!["hello at", "hello after"]);
    }

    #[test]
    fn test_search_before_bound_inclusive() {
        let boundary = Utc.timestamp_opt(100, 0).unwrap();
        let store = store_with(vec![
            message("Alice", "hello before", 99),
            message("Alice", "hello at", 100),
            message("Alice", "hello after", 101),
        ]);

        let result = execute_search(&store, "hello", None, Some(boundary));
        let bodies: Vec<&str> =
            result.matching_messages.iter().map(|m| m.body.as_str()).collect();
        assert_eq!(bodies, vec!["hello before", "hello at"]);
    }

    #[test]
    fn test_contacts_deduped_in_first_seen_order() {
        let store = store_with(vec![
            message("Bob", "hello one", 5),
            message("Alice", "hello two", 1),
            message("Bob", "hello three", 3),
        ]);

        let result = execute_search(&store, "hello", None, None);
        let names: Vec<&str> = result.contacts.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Bob", "Alice"]);
    }

    #[test]
    fn test_sorted_messages_chronological() {
        let store = store_with(vec![
            message("Bob", "hello one", 5),
            message("Alice", "hello two", 1),
            message("Bob", "hello three", 3),
        ]);

        let result = execute_search(&store, "hello", None, None);
        let timestamps: Vec<i64> =
            result.sorted_messages.iter().map(|m| m.timestamp.timestamp()).collect();
        assert_eq!(timestamps, vec![1, 3, 5]);

        // Raw matches keep corpus order.
        assert_eq!(result.matching_messages[0].body, "hello one");
    }

    #[test]
    fn test_search_no_matches() {
        let store = store_with(vec![message("Alice", "hello", 1)]);
        let result = execute_search(&store, "absent", None, None);
        assert!(result.is_empty());
        assert!(result.contacts.is_empty());
    }

    #[test]
    fn test_search_empty_store() {
        let result = execute_search(&ArchiveStore::default(), "hello", None, None);
        assert!(result.is_empty());
    }
}
