use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Split-pane layout configuration
pub struct AppLayout {
    pub contacts_area: Rect,
    pub timeline_area: Rect,
    pub status_area: Rect,
}

impl AppLayout {
    /// Create split-pane layout:
    /// - Contact list: 40% width (left)
    /// - Timeline pane: 60% width (right)
    /// - Status bar: bottom row
    pub fn new(area: Rect) -> Self {
        // Vertical split: main area + status bar
        let vertical_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(3),    // Main area (at least 3 rows)
                Constraint::Length(1), // Status bar (1 row)
            ])
            .split(area);

        // Horizontal split: contacts + timeline
        let horizontal_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(40), // Contact list
                Constraint::Percentage(60), // Timeline pane
            ])
            .split(vertical_chunks[0]);

        Self {
            contacts_area: horizontal_chunks[0],
            timeline_area: horizontal_chunks[1],
            status_area: vertical_chunks[1],
        }
    }
}
