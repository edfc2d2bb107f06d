// Status bar widget: tab indicator and the lookup in flight.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use preamble_core::protocol::TabId;

use crate::tui::ViewState;

/// Render the status bar into the given area.
///
/// Layout: [tab bar] | [activity]
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let mut spans = vec![Span::raw(" ")];
    spans.extend(tab_spans(state.active_tab));
    spans.push(Span::styled("| ", Style::default().fg(Color::Gray)));
    spans.push(activity_span(state.working.as_deref()));

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Black));
    frame.render_widget(paragraph, area);
}

/// "[1:India] [2:World]" with the active tab highlighted.
pub fn tab_spans(active: TabId) -> Vec<Span<'static>> {
    let tabs = [(TabId::India, "1:India"), (TabId::World, "2:World")];

    let mut spans = Vec::new();
    for (tab_id, label) in tabs {
        let style = if tab_id == active {
            Style::default()
                .fg(Color::Black)
                .bg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        spans.push(Span::styled(format!("[{label}]"), style));
        spans.push(Span::raw(" "));
    }
    spans
}

pub fn tab_label(tab: TabId) -> &'static str {
    match tab {
        TabId::India => "Indian Preamble Explorer",
        TabId::World => "World Preamble Explorer",
    }
}

fn activity_span(working: Option<&str>) -> Span<'static> {
    match working {
        Some(text) => Span::styled(
            format!("⏳ {text}"),
            Style::default().fg(Color::Yellow),
        ),
        None => Span::styled("Ready", Style::default().fg(Color::Green)),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
