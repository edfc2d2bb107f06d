// Preamble card: the text of the Indian Preamble, collapsed to its opening
// lines until expanded with `p`.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use preamble_core::preamble::{PREAMBLE_TERMS, PREAMBLE_TEXT};
use preamble_core::protocol::TabId;

use super::status_bar::tab_label;

/// Lines of the preamble shown while collapsed.
const COLLAPSED_LINES: usize = 2;

pub fn render(frame: &mut Frame, area: Rect, expanded: bool) {
    let hint = if expanded {
        " p: collapse "
    } else {
        " p: show full text "
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::LightYellow))
        .title(Span::styled(
            format!(" 🇮🇳 {} ", tab_label(TabId::India)),
            Style::default().add_modifier(Modifier::BOLD),
        ))
        .title_bottom(Line::from(Span::styled(hint, Style::default().fg(Color::DarkGray))));

    let paragraph = Paragraph::new(preamble_lines(expanded))
        .block(block)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

/// The preamble as styled lines, with the highlighted terms in bold.
pub fn preamble_lines(expanded: bool) -> Vec<Line<'static>> {
    let take = if expanded { usize::MAX } else { COLLAPSED_LINES };
    let mut lines: Vec<Line<'static>> = PREAMBLE_TEXT
        .lines()
        .take(take)
        .map(highlight_terms)
        .collect();
    if !expanded {
        lines.push(Line::from(Span::styled(
            "...",
            Style::default().fg(Color::DarkGray),
        )));
    }
    lines
}

/// Split a line into spans, emphasizing any word that is one of the terms.
fn highlight_terms(line: &'static str) -> Line<'static> {
    let emphasis = Style::default()
        .fg(Color::LightYellow)
        .add_modifier(Modifier::BOLD);
    let mut spans = Vec::new();
    for (i, word) in line.split(' ').enumerate() {
        if i > 0 {
            spans.push(Span::raw(" "));
        }
        let bare = word.trim_matches(|c: char| !c.is_alphabetic());
        let is_term = PREAMBLE_TERMS
            .iter()
            .any(|t| t.label.eq_ignore_ascii_case(bare));
        if is_term {
            spans.push(Span::styled(word, emphasis));
        } else {
            spans.push(Span::raw(word));
        }
    }
    Line::from(spans)
}
