//! TUI application state and event handling.
//!
//! The `App` struct owns the [`BrowseSession`] and runs the main event loop
//! via `run()`. Each tick it drains background populate/search events from
//! the session, redraws when state changed, and maps keyboard input to
//! session operations:
//!
//! - **Live search**: every keystroke updates the filter; `after:`/`before:`
//!   date tokens in the input become range bounds
//! - **Selection**: arrow keys move through the contact rows, and the
//!   timeline pane follows the selection
//! - **Status messages**: transient feedback for clipboard and export
//! - **Dirty state tracking**: renders only when state changes

use std::time::{Duration, Instant};

use anyhow::Result;
use ratatui::Terminal;
use ratatui::backend::Backend;

use super::events::{Action, poll_event};
use super::rendering::{ContactRow, RenderState, render_ui};
use crate::clipboard::copy_to_clipboard;
use crate::models::filter::parse_query;
use crate::session::{BrowseSession, TimelineView};
use crate::utils::{format_path_with_tilde, transcript_file_name};

/// Duration for success status messages (milliseconds)
const STATUS_SUCCESS_DURATION_MS: u64 = 3000;
/// Duration for error status messages (milliseconds)
const STATUS_ERROR_DURATION_MS: u64 = 5000;

/// Type of status message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    Success,
    Error,
}

/// Transient status message with expiry
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub message_type: MessageType,
    pub expires_at: Instant,
}

pub struct App {
    session: BrowseSession,
    input: String,
    selected: Option<usize>,
    view: TimelineView,
    should_quit: bool,
    // Status message (clipboard feedback, etc.)
    status_message: Option<StatusMessage>,
    // Dirty state tracking for efficient rendering
    needs_redraw: bool,
    last_draw_time: Instant,
}

impl App {
    pub fn new(session: BrowseSession) -> Self {
        Self {
            session,
            input: String::new(),
            selected: None,
            view: TimelineView::default(),
            should_quit: false,
            status_message: None,
            needs_redraw: true, // Initial draw needed
            last_draw_time: Instant::now(),
        }
    }

    /// Set a transient status message with automatic expiry
    fn set_status(&mut self, text: impl Into<String>, message_type: MessageType, duration_ms: u64) {
        self.status_message = Some(StatusMessage {
            text: text.into(),
            message_type,
            expires_at: Instant::now() + Duration::from_millis(duration_ms),
        });
        self.needs_redraw = true;
    }

    /// Check and clear expired status messages
    fn check_and_clear_expired_status(&mut self) {
        let should_clear = self
            .status_message
            .as_ref()
            .map(|msg| Instant::now() >= msg.expires_at)
            .unwrap_or(false);
        if should_clear {
            self.status_message = None;
            self.needs_redraw = true;
        }
    }

    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        while !self.should_quit {
            self.check_and_clear_expired_status();

            // Drain background populate/search events
            if self.session.handle_events() {
                self.refresh_after_state_change();
            }

            // Draw if dirty or if it's been >100ms (for terminal resize handling)
            let now = Instant::now();
            let elapsed = now.duration_since(self.last_draw_time);
            if self.needs_redraw || elapsed >= Duration::from_millis(100) {
                let contacts = self.contact_rows();
                terminal.draw(|f| {
                    let state = RenderState {
                        input: &self.input,
                        selected: self.selected,
                        search_active: self.session.search_active(),
                        include_unknown: self.session.include_unknown(),
                        progress: self.session.progress(),
                        populate_error: self.session.populate_error(),
                        status_message: self.status_message.as_ref(),
                    };
                    render_ui(f, &contacts, &self.view, &state);
                })?;
                self.needs_redraw = false;
                self.last_draw_time = now;
            }

            let action = poll_event(Duration::from_millis(100))?;
            self.handle_action(action);
        }

        Ok(())
    }

    fn contact_rows(&self) -> Vec<ContactRow> {
        (0..self.session.row_count())
            .filter_map(|row| self.session.contact_at(row))
            .map(|c| ContactRow {
                name: c.name.clone(),
                known: c.is_known(),
                chat_count: self.session.chat_count(c),
            })
            .collect()
    }

    /// Re-derive selection and timeline after the row set may have changed
    /// (populate completed, search result arrived, filter cleared).
    fn refresh_after_state_change(&mut self) {
        let rows = self.session.row_count();
        if rows == 0 {
            self.selected = None;
        } else if let Some(selected) = self.selected
            && selected >= rows
        {
            self.selected = Some(rows - 1);
        }
        self.view = self.session.selection_changed(self.selected);
        self.needs_redraw = true;
    }

    /// Handle a user action (extracted for testing)
    fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::ClearSearch => {
                if self.input.is_empty() {
                    self.should_quit = true;
                } else {
                    self.input.clear();
                    self.apply_input();
                }
            }
            Action::MoveUp => self.move_selection(-1),
            Action::MoveDown => self.move_selection(1),
            Action::PageUp => self.move_selection(-10),
            Action::PageDown => self.move_selection(10),
            Action::UpdateSearch(c) => {
                self.input.push(c);
                self.apply_input();
            }
            Action::DeleteChar => {
                if self.input.pop().is_some() {
                    self.apply_input();
                }
            }
            Action::ToggleUnknown => {
                let include = !self.session.include_unknown();
                self.session.set_include_unknown(include);
                self.refresh_after_state_change();
            }
            Action::Refresh => self.refresh_archive(),
            Action::CopyToClipboard => self.copy_selected_transcript(),
            Action::ExportTranscript => self.export_selected_transcript(),
            Action::None => {}
        }
    }

    /// Push the current input through the filter parser into the session.
    /// Date tokens become range bounds; the remaining text is the term.
    fn apply_input(&mut self) {
        let filter = parse_query(&self.input);
        let term = filter.term.unwrap_or_default();
        self.session.set_filter(&term, filter.after, filter.before);
        self.selected = None;
        self.refresh_after_state_change();
    }

    fn move_selection(&mut self, delta: isize) {
        let rows = self.session.row_count();
        if rows == 0 {
            return;
        }

        let current = self.selected.map(|s| s as isize).unwrap_or(-1);
        let next = (current + delta).clamp(0, rows as isize - 1) as usize;
        self.selected = Some(next);
        self.view = self.session.selection_changed(self.selected);
        self.needs_redraw = true;
    }

    /// Re-import the archive from disk. Selection and search input reset;
    /// the listing comes back once the background populate completes.
    fn refresh_archive(&mut self) {
        if self.session.refresh() {
            self.input.clear();
            self.selected = None;
            self.view = TimelineView::default();
            self.set_status(
                "Reloading archive...",
                MessageType::Success,
                STATUS_SUCCESS_DURATION_MS,
            );
        } else {
            self.set_status(
                "✗ No archive directory to reload",
                MessageType::Error,
                STATUS_ERROR_DURATION_MS,
            );
        }
    }

    fn copy_selected_transcript(&mut self) {
        let Some(contact) = self.selected.and_then(|r| self.session.contact_at(r)).cloned()
        else {
            self.set_status("✗ No contact selected", MessageType::Error, STATUS_ERROR_DURATION_MS);
            return;
        };

        let transcript = match self.session.contact_transcript(&contact) {
            Ok(text) if !text.is_empty() => text,
            Ok(_) => {
                self.set_status(
                    "✗ No messages to copy",
                    MessageType::Error,
                    STATUS_ERROR_DURATION_MS,
                );
                return;
            }
            Err(e) => {
                self.set_status(
                    format!("✗ Transcript error: {}", e),
                    MessageType::Error,
                    STATUS_ERROR_DURATION_MS,
                );
                return;
            }
        };

        match copy_to_clipboard(&transcript) {
            Ok(()) => {
                self.set_status(
                    format!("✓ Copied {} transcript", contact.name),
                    MessageType::Success,
                    STATUS_SUCCESS_DURATION_MS,
                );
            }
            Err(e) => {
                self.set_status(
                    format!("✗ Clipboard error: {}", e),
                    MessageType::Error,
                    STATUS_ERROR_DURATION_MS,
                );
            }
        }
    }

    fn export_selected_transcript(&mut self) {
        let Some(contact) = self.selected.and_then(|r| self.session.contact_at(r)).cloned()
        else {
            self.set_status("✗ No contact selected", MessageType::Error, STATUS_ERROR_DURATION_MS);
            return;
        };

        let path = std::path::PathBuf::from(transcript_file_name(&contact.name));
        match self.session.export_transcript(&contact, &path) {
            Ok(()) => {
                self.set_status(
                    format!("✓ Saved {}", format_path_with_tilde(&path)),
                    MessageType::Success,
                    STATUS_SUCCESS_DURATION_MS,
                );
            }
            Err(e) => {
                self.set_status(
                    format!("✗ Export error: {}", e),
                    MessageType::Error,
                    STATUS_ERROR_DURATION_MS,
                );
            }
        }
    }
}
