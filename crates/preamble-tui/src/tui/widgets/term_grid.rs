// Term grid: the nine preamble terms in three columns, plus the explanation
// options (language and depth).

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use preamble_core::preamble::{PreambleTerm, TermCategory, PREAMBLE_TERMS};

use crate::tui::ViewState;

/// Terms per grid row.
pub const GRID_COLUMNS: usize = 3;

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Select a Core Concept ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = PREAMBLE_TERMS.len().div_ceil(GRID_COLUMNS);
    let [grid_area, options_area] =
        Layout::vertical([Constraint::Length(rows as u16), Constraint::Length(1)]).areas(inner);

    let lines: Vec<Line> = PREAMBLE_TERMS
        .chunks(GRID_COLUMNS)
        .enumerate()
        .map(|(row, terms)| {
            let mut spans = Vec::new();
            for (col, term) in terms.iter().enumerate() {
                let index = row * GRID_COLUMNS + col;
                spans.push(term_span(
                    term,
                    index == state.term_cursor,
                    state.selected_term == Some(*term),
                ));
            }
            Line::from(spans)
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), grid_area);
    frame.render_widget(Paragraph::new(options_line(state)), options_area);
}

/// One fixed-width grid cell: "> Liberty (Core Value)".
fn term_span(term: &PreambleTerm, under_cursor: bool, selected: bool) -> Span<'static> {
    let marker = if under_cursor { ">" } else { " " };
    let text = format!("{marker} {:<11}{:<15}", term.label, format!("({})", term.category.label()));
    let mut style = Style::default().fg(category_color(term.category));
    if selected {
        style = style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
    }
    if under_cursor {
        style = style.bg(Color::DarkGray);
    }
    Span::styled(text, style)
}

fn category_color(category: TermCategory) -> Color {
    match category {
        TermCategory::Foundational => Color::LightBlue,
        TermCategory::CoreValue => Color::LightGreen,
    }
}

/// "Hindi 🇮🇳: off (h) · Depth: 2/3 (+/-)"
pub fn options_line(state: &ViewState) -> Line<'static> {
    let hindi = if state.explain_in_hindi { "on" } else { "off" };
    let hindi_color = if state.explain_in_hindi {
        Color::Green
    } else {
        Color::Gray
    };
    Line::from(vec![
        Span::raw(" Explain in Hindi 🇮🇳: "),
        Span::styled(hindi, Style::default().fg(hindi_color).add_modifier(Modifier::BOLD)),
        Span::styled(" (h)", Style::default().fg(Color::DarkGray)),
        Span::styled(" · ", Style::default().fg(Color::DarkGray)),
        Span::raw("Explanation depth: "),
        Span::styled(
            format!("{}/3", state.depth),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::styled(" (+/-, 1 = very short, 3 = more detailed)", Style::default().fg(Color::DarkGray)),
    ])
}
