// Lookup history sidebar, newest first.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use preamble_core::protocol::HistoryEntry;

const EMPTY_TEXT: &str = "No lookups yet. Explore a term or country.";

pub fn render(frame: &mut Frame, area: Rect, entries: &[HistoryEntry]) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(
            " Lookup History ",
            Style::default().add_modifier(Modifier::BOLD),
        ));

    let lines = if entries.is_empty() {
        vec![Line::from(Span::styled(
            EMPTY_TEXT,
            Style::default().fg(Color::DarkGray),
        ))]
    } else {
        history_lines(entries)
    };
    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
        area,
    );
}

/// Two lines per entry: numbered title with time, then the detail.
pub fn history_lines(entries: &[HistoryEntry]) -> Vec<Line<'static>> {
    let mut lines = Vec::with_capacity(entries.len() * 2);
    for (i, entry) in entries.iter().enumerate() {
        lines.push(Line::from(vec![
            Span::styled(
                format!("{}. {}", i + 1, entry.title()),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {}", entry.time_label()),
                Style::default().fg(Color::DarkGray),
            ),
        ]));
        lines.push(Line::from(Span::styled(
            format!("   {}", entry.detail()),
            Style::default().fg(Color::Gray),
        )));
    }
    lines
}
