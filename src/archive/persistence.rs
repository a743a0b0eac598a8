//! Best-effort summary persistence: a small snapshot of corpus statistics
//! saved after populate completes, with atomic writes.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::store::ArchiveStore;

pub const SUMMARY_VERSION: u32 = 1;

const SUMMARY_FILENAME: &str = "archive-summary.json";

/// Snapshot of the last completed populate for an archive directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchiveSummary {
    pub version: u32,
    pub saved_at: DateTime<Utc>,
    pub contact_count: usize,
    pub message_count: usize,
    pub attachment_count: usize,
}

impl ArchiveSummary {
    pub fn of(store: &ArchiveStore) -> Self {
        Self {
            version: SUMMARY_VERSION,
            saved_at: Utc::now(),
            contact_count: store.contacts().len(),
            message_count: store.messages().len(),
            attachment_count: store.attachments().len(),
        }
    }
}

/// Compute hash of canonical path for cache subdirectory isolation.
fn compute_path_hash(path: &Path) -> Result<String> {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    let canonical = path.canonicalize().context("Failed to canonicalize archive path")?;

    let mut hasher = DefaultHasher::new();
    canonical.hash(&mut hasher);
    let hash = hasher.finish();

    Ok(format!("{:016x}", hash)[..12].to_string())
}

/// Platform cache directory for a specific archive directory.
fn cache_dir_for(archive_dir: &Path) -> Result<PathBuf> {
    let cache_base = dirs::cache_dir().context("Failed to get platform cache directory")?;
    let path_hash = compute_path_hash(archive_dir)?;
    let cache_dir = cache_base.join("chat-history-browser").join(path_hash);

    if !cache_dir.exists() {
        fs::create_dir_all(&cache_dir).context("Failed to create cache directory")?;
    }

    Ok(cache_dir)
}

/// Save the summary atomically (temp file + rename). Callers treat failures
/// as log-only; nothing interactive depends on this file.
pub fn save_summary(archive_dir: &Path, store: &ArchiveStore) -> Result<()> {
    let cache_dir = cache_dir_for(archive_dir)?;

    let summary = ArchiveSummary::of(store);
    let json = serde_json::to_string_pretty(&summary).context("Failed to serialize summary")?;

    let path = cache_dir.join(SUMMARY_FILENAME);
    let temp = cache_dir.join(format!("{}.tmp", SUMMARY_FILENAME));
    fs::write(&temp, json).context("Failed to write summary temp file")?;
    fs::rename(&temp, &path).context("Failed to rename summary temp file")?;

    Ok(())
}

/// Load the previously saved summary, if any. Returns `None` on a missing
/// file or version mismatch (callers fall back to live counts).
pub fn load_summary(archive_dir: &Path) -> Result<Option<ArchiveSummary>> {
    let path = cache_dir_for(archive_dir)?.join(SUMMARY_FILENAME);
    if !path.exists() {
        return Ok(None);
    }

    let json = fs::read_to_string(&path).context("Failed to read summary file")?;
    let summary: ArchiveSummary =
        serde_json::from_str(&json).context("Failed to parse summary JSON")?;

    if summary.version != SUMMARY_VERSION {
        return Ok(None);
    }

    Ok(Some(summary))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Classification, Contact};

    #[test]
    fn test_summary_of_counts() {
        let store = ArchiveStore::from_parts(
            vec![Contact {
                name: "Alice".to_string(),
                classification: Classification::Known,
                chat_ids: vec![],
            }],
            vec![],
            vec![],
        );

        let summary = ArchiveSummary::of(&store);
        assert_eq!(summary.version, SUMMARY_VERSION);
        assert_eq!(summary.contact_count, 1);
        assert_eq!(summary.message_count, 0);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let archive_dir = tempfile::tempdir().unwrap();
        let store = ArchiveStore::default();

        save_summary(archive_dir.path(), &store).unwrap();
        let loaded = load_summary(archive_dir.path()).unwrap();

        let summary = loaded.expect("summary should exist after save");
        assert_eq!(summary.contact_count, 0);
    }

    #[test]
    fn test_load_missing_summary() {
        let archive_dir = tempfile::tempdir().unwrap();
        assert!(load_summary(archive_dir.path()).unwrap().is_none());
    }
}
