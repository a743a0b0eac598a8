// TUI module for the interactive archive browser
mod app;
mod events;
mod layout;
mod rendering;
mod timestamps;

use std::io;
use std::path::PathBuf;

use anyhow::Result;
pub use app::App;
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::session::BrowseSession;

/// Run the interactive TUI against the archive at `archive_dir`. The corpus
/// populates in the background; the browser is usable immediately.
pub fn run_interactive(archive_dir: PathBuf) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app state
    let mut session = BrowseSession::new();
    session.open(archive_dir);
    let mut app = App::new(session);

    // Run event loop
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}
