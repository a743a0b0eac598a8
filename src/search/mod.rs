//! Text + date-range search over the message corpus.
//!
//! Matching is case-insensitive substring containment on message bodies;
//! attachments carry no text and are never search targets. A search result
//! carries both the raw matches (corpus order) and the contact list they
//! imply (first-occurrence dedup by name), delivered atomically as one
//! value. The background worker tags results with a generation counter so a
//! superseded search can never overwrite a newer one.

pub mod engine;
pub mod worker;

pub use engine::{SearchResult, execute_search};
pub use worker::{SearchUpdate, spawn_search};
