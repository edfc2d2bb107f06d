// Explanation card for the selected term.
//
// Title: the term. First line: category, language mode and the model that
// answered. Body: the explanation, word-wrapped and scrollable with j/k.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use preamble_core::protocol::{LlmStatus, TermExplanation};

use super::{meta_line, status_border_style};
use crate::tui::ViewState;

pub const SCROLL_KEY: &str = "explanation";

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let title = match state.selected_term {
        Some(term) => format!(" 🧠 Explanation: {} ", term.label),
        None => " 🧠 Explanation ".to_string(),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(status_border_style(state.term_status))
        .title(Span::styled(title, Style::default().add_modifier(Modifier::BOLD)));

    let lines = match &state.term_explanation {
        Some(explanation) => explanation_lines(explanation),
        None => vec![Line::from(Span::styled(
            placeholder_text(state.term_status),
            Style::default().fg(Color::DarkGray),
        ))],
    };

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((state.scroll(SCROLL_KEY), 0));
    frame.render_widget(paragraph, area);
}

/// Metadata line, a blank line, then the text.
pub fn explanation_lines(result: &TermExplanation) -> Vec<Line<'static>> {
    let mut lines = vec![
        meta_line(&[
            ("Category", result.term.category.label()),
            ("Mode", result.language.mode_label()),
            ("Model", result.explanation.model_used.as_str()),
        ]),
        Line::default(),
    ];
    let body_style = if result.explanation.is_fallback() {
        Style::default().fg(Color::Red)
    } else {
        Style::default()
    };
    lines.extend(
        result
            .explanation
            .text
            .lines()
            .map(|l| Line::from(Span::styled(l.to_string(), body_style))),
    );
    lines
}

fn placeholder_text(status: LlmStatus) -> &'static str {
    match status {
        LlmStatus::Pending => "Generating explanation...",
        LlmStatus::Idle => "Pick a term and press Enter to have it explained.",
        LlmStatus::Complete | LlmStatus::Error => "No explanation available.",
    }
}
