use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use chrono::{DateTime, NaiveDate, Utc};
use clap::{Parser, Subcommand};

use crate::archive::ArchiveStore;
use crate::archive::persistence::load_summary;
use crate::search::execute_search;
use crate::session::BrowseSession;
use crate::tui::run_interactive;
use crate::utils::{format_path_with_tilde, get_archive_dir, transcript_file_name};

#[derive(Parser)]
#[command(name = "chat-history-browser")]
#[command(version = "0.1.0")]
#[command(about = "Browse and search an archived message history", long_about = None)]
pub struct Cli {
    /// Archive directory (defaults to $CHAT_ARCHIVE_DIR, then ~/.chat-archive)
    #[arg(long, global = true)]
    pub archive: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show statistics about the archive
    Stats,
    /// Search message bodies and print the matches
    Search {
        /// Term to match (case-insensitive substring, minimum 3 characters)
        term: String,
        /// Only include messages on or after this date (YYYY-MM-DD)
        #[arg(long)]
        after: Option<String>,
        /// Only include messages on or before this date (YYYY-MM-DD)
        #[arg(long)]
        before: Option<String>,
    },
    /// Export a contact's transcript to a text file
    Export {
        /// Contact display name
        contact: String,
        /// Output path (defaults to <contact>.txt in the current directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let archive_dir = match cli.archive {
        Some(dir) => dir,
        None => get_archive_dir()?,
    };

    match &cli.command {
        Some(Commands::Stats) => show_stats(&archive_dir),
        Some(Commands::Search { term, after, before }) => {
            run_search(&archive_dir, term, after.as_deref(), before.as_deref())
        }
        Some(Commands::Export { contact, output }) => {
            run_export(&archive_dir, contact, output.clone())
        }
        None => run_interactive(archive_dir),
    }
}

fn load_store(archive_dir: &std::path::Path) -> Result<ArchiveStore> {
    ArchiveStore::load(archive_dir, &mut |_, _| {}).with_context(|| {
        format!("Failed to load archive from {}", format_path_with_tilde(archive_dir))
    })
}

fn show_stats(archive_dir: &std::path::Path) -> Result<()> {
    let store = load_store(archive_dir)?;

    let known = store.contacts().iter().filter(|c| c.is_known()).count();
    let unknown = store.contacts().len() - known;

    println!("Chat Archive Statistics");
    println!("================================");
    println!("Contacts: {}", store.contacts().len());
    println!("  Known: {}", known);
    println!("  Unknown: {}", unknown);
    println!("Messages: {}", store.messages().len());
    println!("Attachments: {}", store.attachments().len());
    println!();
    println!("Archive directory: {}", format_path_with_tilde(archive_dir));

    let mut items = store.all_items();
    items.sort_by(crate::timeline::date_order);
    if let Some(oldest) = items.first() {
        println!("Oldest item: {}", oldest.timestamp().format("%Y-%m-%d %H:%M:%S"));
    }
    if let Some(newest) = items.last() {
        println!("Newest item: {}", newest.timestamp().format("%Y-%m-%d %H:%M:%S"));
    }

    if let Ok(Some(summary)) = load_summary(archive_dir) {
        println!("Last browsed: {}", summary.saved_at.format("%Y-%m-%d %H:%M:%S"));
    }

    Ok(())
}

fn run_search(
    archive_dir: &std::path::Path,
    term: &str,
    after: Option<&str>,
    before: Option<&str>,
) -> Result<()> {
    let after = after.map(parse_start_of_day).transpose()?;
    let before = before.map(parse_end_of_day).transpose()?;

    let store = load_store(archive_dir)?;
    let result = execute_search(&store, term, after, before);

    if result.is_empty() {
        println!("No matches for \"{}\"", term);
        return Ok(());
    }

    for message in &result.sorted_messages {
        let sender = if message.is_from_me { "Me" } else { message.contact_name.as_str() };
        println!(
            "[{}] {}: {}",
            message.timestamp.format("%Y-%m-%d %H:%M"),
            sender,
            message.body
        );
    }
    println!();
    let names: Vec<&str> = result.contacts.iter().map(|c| c.name.as_str()).collect();
    println!(
        "{} matches across {} contacts: {}",
        result.sorted_messages.len(),
        result.contacts.len(),
        names.join(", ")
    );

    Ok(())
}

fn run_export(
    archive_dir: &std::path::Path,
    contact_name: &str,
    output: Option<PathBuf>,
) -> Result<()> {
    let store = load_store(archive_dir)?;
    let Some(contact) = store.contact_by_name(contact_name).cloned() else {
        bail!("No contact named \"{}\" in the archive", contact_name);
    };

    let path = output.unwrap_or_else(|| PathBuf::from(transcript_file_name(&contact.name)));

    let mut session = BrowseSession::new();
    session.attach_store(store);
    session
        .export_transcript(&contact, &path)
        .with_context(|| format!("Failed to export transcript for {}", contact.name))?;

    println!("Saved transcript to {}", format_path_with_tilde(&path));
    Ok(())
}

fn parse_start_of_day(input: &str) -> Result<DateTime<Utc>> {
    let date = parse_date(input)?;
    Ok(date.and_hms_opt(0, 0, 0).context("invalid time of day")?.and_utc())
}

fn parse_end_of_day(input: &str) -> Result<DateTime<Utc>> {
    let date = parse_date(input)?;
    Ok(date.and_hms_opt(23, 59, 59).context("invalid time of day")?.and_utc())
}

fn parse_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .with_context(|| format!("Invalid date \"{}\" (expected YYYY-MM-DD)", input))
}
