// Key hints for the current context.

use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use preamble_core::protocol::TabId;

use crate::tui::ViewState;

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let mut spans = Vec::new();
    for (i, (keys, action)) in hints(state).iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" "));
        }
        spans.push(Span::styled(*keys, Style::default().fg(Color::Yellow)));
        spans.push(Span::styled(
            format!(":{action}"),
            Style::default().fg(Color::Gray),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// (keys, action) pairs for the current mode.
pub fn hints(state: &ViewState) -> Vec<(&'static str, &'static str)> {
    if state.confirm_quit {
        return vec![("y", "Quit"), ("n", "Cancel")];
    }
    if state.input_mode {
        return vec![("Enter", "Generate"), ("Esc", "Cancel")];
    }
    let mut hints = match state.active_tab {
        TabId::India => vec![
            ("←→↑↓", "Select"),
            ("Enter", "Explain"),
            ("h", "Hindi"),
            ("+/-", "Depth"),
            ("p", "Preamble"),
            ("j/k", "Scroll"),
        ],
        TabId::World => vec![("Enter/i", "Type"), ("c", "Compare"), ("j/k", "Scroll")],
    };
    hints.push(("1/2", "Tab"));
    hints.push(("q", "Quit"));
    hints
}
