// TUI widget modules for each panel.

pub mod country_input;
pub mod country_result;
pub mod explanation;
pub mod header;
pub mod help_bar;
pub mod history;
pub mod notice_bar;
pub mod preamble_card;
pub mod quit_confirm;
pub mod status_bar;
pub mod term_grid;

use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use preamble_core::protocol::LlmStatus;

/// Border style for a panel waiting on, or showing, generated text.
pub fn status_border_style(status: LlmStatus) -> Style {
    match status {
        LlmStatus::Pending => Style::default().fg(Color::Yellow),
        LlmStatus::Error => Style::default().fg(Color::Red),
        LlmStatus::Complete => Style::default().fg(Color::Green),
        LlmStatus::Idle => Style::default(),
    }
}

/// A dim metadata line built from `label: value` pairs joined with " · ".
pub fn meta_line(pairs: &[(&str, &str)]) -> Line<'static> {
    let mut spans = Vec::new();
    for (i, (label, value)) in pairs.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" · ", Style::default().fg(Color::DarkGray)));
        }
        spans.push(Span::styled(
            format!("{label}: "),
            Style::default().fg(Color::Gray),
        ));
        spans.push(Span::styled(value.to_string(), Style::default().fg(Color::Cyan)));
    }
    Line::from(spans)
}

/// Flatten a rendered buffer into text, one line per row.
#[cfg(test)]
pub(crate) fn buffer_text(buffer: &ratatui::buffer::Buffer) -> String {
    let width = buffer.area.width.max(1) as usize;
    buffer
        .content
        .chunks(width)
        .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}
