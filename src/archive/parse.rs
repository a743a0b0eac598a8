//! Parsers for the on-disk archive files.

use std::fs;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result, bail};
use rayon::prelude::*;
use serde::de::DeserializeOwned;

use super::records::{AttachmentRecord, ContactRecord, MessageRecord};

const MAX_CONSECUTIVE_ERRORS: usize = 100;

/// Parse `contacts.json`: a JSON array of contact records.
pub fn parse_contacts_file(path: &Path) -> Result<Vec<ContactRecord>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read contacts file: {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse contacts file: {}", path.display()))
}

/// Parse one message chunk (JSONL). Malformed lines are logged and skipped;
/// the chunk fails if more than 50% of its lines fail to parse.
///
/// Lines are parsed in parallel but the result preserves file order, which
/// is the corpus order the search engine's contact dedup depends on.
pub fn parse_message_chunk(path: &Path) -> Result<Vec<MessageRecord>> {
    let lines = read_lines(path)?;

    let parsed: Vec<Option<MessageRecord>> = lines
        .par_iter()
        .map(|(line_num, line)| match serde_json::from_str::<MessageRecord>(line) {
            Ok(record) => Some(record),
            Err(e) => {
                log::warn!("skipping line {} in {}: {}", line_num + 1, path.display(), e);
                None
            }
        })
        .collect();

    let total = parsed.len();
    let records: Vec<MessageRecord> = parsed.into_iter().flatten().collect();

    check_failure_rate(total, total - records.len(), path)?;
    Ok(records)
}

/// Parse `attachments.jsonl`. Same skip-and-warn policy as message chunks,
/// plus a consecutive-error cap so a truncated file fails fast.
pub fn parse_attachments_file(path: &Path) -> Result<Vec<AttachmentRecord>> {
    parse_jsonl_sequential(path)
}

fn parse_jsonl_sequential<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let lines = read_lines(path)?;

    let mut records = Vec::new();
    let mut skipped = 0;
    let mut consecutive_errors = 0;

    for (line_num, line) in &lines {
        match serde_json::from_str::<T>(line) {
            Ok(record) => {
                records.push(record);
                consecutive_errors = 0;
            }
            Err(e) => {
                log::warn!("skipping line {} in {}: {}", line_num + 1, path.display(), e);
                skipped += 1;
                consecutive_errors += 1;

                if consecutive_errors >= MAX_CONSECUTIVE_ERRORS {
                    bail!(
                        "Too many consecutive parse errors ({}) in {} - file may be corrupted",
                        consecutive_errors,
                        path.display()
                    );
                }
            }
        }
    }

    check_failure_rate(lines.len(), skipped, path)?;
    Ok(records)
}

/// Read non-empty lines with their zero-based line numbers.
fn read_lines(path: &Path) -> Result<Vec<(usize, String)>> {
    let file =
        File::open(path).with_context(|| format!("Failed to open file: {}", path.display()))?;
    let reader = BufReader::new(file);

    let mut lines = Vec::new();
    for (line_num, line) in reader.lines().enumerate() {
        let line =
            line.with_context(|| format!("Failed to read line from {}", path.display()))?;
        if !line.trim().is_empty() {
            lines.push((line_num, line));
        }
    }
    Ok(lines)
}

fn check_failure_rate(total: usize, skipped: usize, path: &Path) -> Result<()> {
    if total > 0 {
        let failure_rate = skipped as f64 / total as f64;
        if failure_rate > 0.5 {
            bail!(
                "{}/{} lines failed to parse in {} - file may be corrupted",
                skipped,
                total,
                path.display()
            );
        }
    }
    Ok(())
}
