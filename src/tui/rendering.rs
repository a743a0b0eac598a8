use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph, Wrap};

use super::app::{MessageType, StatusMessage};
use super::layout::AppLayout;
use super::timestamps::format_timestamp;
use crate::models::ChatItem;
use crate::session::TimelineView;

/// One row of the contact list, precomputed by the app for rendering.
pub struct ContactRow {
    pub name: String,
    pub known: bool,
    pub chat_count: usize,
}

/// Everything the renderer needs beyond the contact rows and timeline.
pub struct RenderState<'a> {
    pub input: &'a str,
    pub selected: Option<usize>,
    pub search_active: bool,
    pub include_unknown: bool,
    pub progress: Option<(u64, u64)>,
    pub populate_error: Option<&'a str>,
    pub status_message: Option<&'a StatusMessage>,
}

/// Render the entire UI
pub fn render_ui(
    frame: &mut Frame,
    contacts: &[ContactRow],
    view: &TimelineView,
    state: &RenderState,
) {
    let layout = AppLayout::new(frame.area());

    render_contact_list(frame, layout.contacts_area, contacts, state.selected);
    render_timeline(frame, layout.timeline_area, view);
    render_status_bar(frame, layout.status_area, contacts.len(), state);
}

fn render_contact_list(
    frame: &mut Frame,
    area: Rect,
    contacts: &[ContactRow],
    selected: Option<usize>,
) {
    let items: Vec<ListItem> = contacts
        .iter()
        .enumerate()
        .map(|(idx, row)| {
            let marker = if row.known { " " } else { "?" };
            let content = if row.chat_count > 1 {
                format!("{} {} ({} chats)", marker, row.name, row.chat_count)
            } else {
                format!("{} {}", marker, row.name)
            };

            let style = if selected == Some(idx) {
                Style::default()
                    .fg(Color::Rgb(250, 250, 250)) // Bright text
                    .bg(Color::Rgb(16, 185, 129)) // Emerald background
                    .add_modifier(Modifier::BOLD)
            } else if row.known {
                Style::default().fg(Color::Rgb(212, 212, 216))
            } else {
                Style::default().fg(Color::Rgb(113, 113, 122)) // Muted text
            };

            ListItem::new(content).style(style)
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Rgb(113, 113, 122)))
            .title(" Contacts "),
    );

    frame.render_widget(list, area);
}

fn render_timeline(frame: &mut Frame, area: Rect, view: &TimelineView) {
    let content = if view.items.is_empty() {
        Text::from("No conversation selected")
    } else {
        let mut lines = Vec::with_capacity(view.items.len());
        for item in &view.items {
            lines.push(timeline_line(item, view.highlight.as_deref()));
        }
        if !view.attachments.is_empty() {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                format!("Gallery ({} attachments)", view.attachments.len()),
                Style::default().fg(Color::Rgb(113, 113, 122)).add_modifier(Modifier::BOLD),
            )));
            for attachment in &view.attachments {
                lines.push(Line::from(Span::styled(
                    format!("  {}", attachment.file_path.display()),
                    Style::default().fg(Color::Rgb(113, 113, 122)),
                )));
            }
        }
        Text::from(lines)
    };

    let title = match &view.highlight {
        Some(term) => format!(" Timeline (matches for \"{}\") ", term),
        None => " Timeline ".to_string(),
    };

    let paragraph = Paragraph::new(content)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Rgb(113, 113, 122)))
                .title(title),
        )
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}

fn timeline_line<'a>(item: &'a ChatItem, highlight: Option<&str>) -> Line<'a> {
    let timestamp = format_timestamp(&item.timestamp());
    let mut spans = vec![
        Span::styled(
            format!("[{}] ", timestamp),
            Style::default().fg(Color::Rgb(113, 113, 122)),
        ),
    ];

    match item {
        ChatItem::Message(message) => {
            let sender = if message.is_from_me { "Me" } else { message.contact_name.as_str() };
            spans.push(Span::styled(
                format!("{}: ", sender),
                Style::default().fg(Color::Rgb(16, 185, 129)),
            ));
            spans.extend(highlight_spans(&message.body, highlight));
        }
        ChatItem::Attachment(attachment) => {
            spans.push(Span::styled(
                format!("[attachment] {}", attachment.file_path.display()),
                Style::default().fg(Color::Rgb(113, 113, 122)).add_modifier(Modifier::ITALIC),
            ));
        }
    }

    Line::from(spans)
}

/// Split `text` into spans with case-insensitive occurrences of `term`
/// emphasized. Matching runs on a char-by-char lowercased copy while a byte
/// map carries each lowered offset back to the original char boundaries, so
/// mappings that change byte length (Kelvin sign, dotted I) still slice on
/// valid boundaries.
fn highlight_spans<'a>(text: &'a str, term: Option<&str>) -> Vec<Span<'a>> {
    let Some(term) = term.filter(|t| !t.is_empty()) else {
        return vec![Span::raw(text)];
    };

    let lower_term = term.to_lowercase();

    let mut lower_text = String::with_capacity(text.len());
    let mut char_starts = Vec::with_capacity(text.len());
    let mut char_ends = Vec::with_capacity(text.len());
    for (orig_start, ch) in text.char_indices() {
        let orig_end = orig_start + ch.len_utf8();
        let before = lower_text.len();
        lower_text.extend(ch.to_lowercase());
        for _ in before..lower_text.len() {
            char_starts.push(orig_start);
            char_ends.push(orig_end);
        }
    }

    let highlight_style = Style::default()
        .fg(Color::Rgb(24, 24, 27))
        .bg(Color::Rgb(250, 204, 21))
        .add_modifier(Modifier::BOLD);

    let mut spans = Vec::new();
    let mut lower_cursor = 0;
    let mut orig_cursor = 0;
    while let Some(offset) = lower_text[lower_cursor..].find(&lower_term) {
        let match_start = lower_cursor + offset;
        let match_end = match_start + lower_term.len();
        lower_cursor = match_end;

        // Widen to the enclosing chars when the match lands inside a
        // one-to-many mapping (e.g. half of the "ss" from an eszett).
        let orig_start = char_starts[match_start].max(orig_cursor);
        let orig_end = char_ends[match_end - 1];
        if orig_end <= orig_cursor {
            continue;
        }
        if orig_start > orig_cursor {
            spans.push(Span::raw(&text[orig_cursor..orig_start]));
        }
        spans.push(Span::styled(&text[orig_start..orig_end], highlight_style));
        orig_cursor = orig_end;
    }
    if orig_cursor < text.len() {
        spans.push(Span::raw(&text[orig_cursor..]));
    }
    if spans.is_empty() {
        spans.push(Span::raw(text));
    }
    spans
}

fn render_status_bar(frame: &mut Frame, area: Rect, contact_count: usize, state: &RenderState) {
    let (status_text, style) = if let Some(message) = state.status_message {
        let color = match message.message_type {
            MessageType::Success => Color::Rgb(16, 185, 129),
            MessageType::Error => Color::Rgb(239, 68, 68),
        };
        (
            format!(" {} ", message.text),
            Style::default().fg(color).bg(Color::Rgb(24, 24, 27)),
        )
    } else if let Some(error) = state.populate_error {
        (
            format!(" [ERROR] {} ", error),
            Style::default().fg(Color::Rgb(239, 68, 68)).bg(Color::Rgb(24, 24, 27)),
        )
    } else if let Some((done, total)) = state.progress {
        (
            format!(" Loading archive... {}/{} ", done, total),
            Style::default().fg(Color::Rgb(250, 204, 21)).bg(Color::Rgb(24, 24, 27)),
        )
    } else {
        let mut parts = vec![];

        if state.search_active {
            parts.push(format!("{} matching contacts", contact_count));
        } else if state.include_unknown {
            parts.push(format!("{} contacts (incl. unknown)", contact_count));
        } else {
            parts.push(format!("{} known contacts", contact_count));
        }

        if !state.input.is_empty() {
            parts.push(format!("search: {}", state.input));
        }

        if let Some(selected) = state.selected
            && contact_count > 0
        {
            parts.push(format!("contact {}/{}", selected + 1, contact_count));
        }

        parts.push("Ctrl+U: unknown".to_string());
        parts.push("Ctrl+R: reload".to_string());
        parts.push("Ctrl+Y: copy".to_string());
        parts.push("Ctrl+S: export".to_string());
        parts.push("Esc: clear".to_string());
        parts.push("Ctrl+C: quit".to_string());

        (
            format!(" {} ", parts.join(" | ")),
            Style::default().fg(Color::Rgb(250, 250, 250)).bg(Color::Rgb(24, 24, 27)),
        )
    };

    let paragraph = Paragraph::new(status_text).style(style);

    frame.render_widget(paragraph, area);
}
