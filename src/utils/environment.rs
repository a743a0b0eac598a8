use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Archive directory: `CHAT_ARCHIVE_DIR` if set, else `~/.chat-archive`.
pub fn get_archive_dir() -> Result<PathBuf> {
    if let Ok(dir) = env::var("CHAT_ARCHIVE_DIR") {
        return Ok(PathBuf::from(dir));
    }
    let home = env::var("HOME").context("HOME environment variable not set")?;
    Ok(PathBuf::from(home).join(".chat-archive"))
}
