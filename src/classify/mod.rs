//! Contact classification: known versus unknown listings.
//!
//! A pure read over the populated corpus. Ordering follows the store's
//! import order, which is deterministic across calls for a given corpus
//! state. Before populate completes there is no store and the directory is
//! simply empty, a valid state rather than an error.

use crate::archive::ArchiveStore;
use crate::models::Contact;

/// Ordered known/unknown contact listings derived from a populated store.
#[derive(Debug, Clone, Default)]
pub struct ContactDirectory {
    known: Vec<Contact>,
    unknown: Vec<Contact>,
}

impl ContactDirectory {
    /// Partition the store's contacts. The store already deduplicates by
    /// name, so each name appears in exactly one listing.
    pub fn from_store(store: &ArchiveStore) -> Self {
        let (known, unknown) =
            store.contacts().iter().cloned().partition(|c: &Contact| c.is_known());
        Self { known, unknown }
    }

    pub fn known(&self) -> &[Contact] {
        &self.known
    }

    pub fn unknown(&self) -> &[Contact] {
        &self.unknown
    }

    pub fn is_empty(&self) -> bool {
        self.known.is_empty() && self.unknown.is_empty()
    }
}
