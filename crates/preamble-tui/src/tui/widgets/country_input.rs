// Country name input and the comparison toggle for the World tab.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use preamble_core::protocol::TabId;

use super::status_bar::tab_label;
use crate::tui::ViewState;

const PLACEHOLDER: &str = "e.g., Germany, USA, South Africa";

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let border = if state.input_mode {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(Span::styled(
            format!(" 🌍 {} ", tab_label(TabId::World)),
            Style::default().add_modifier(Modifier::BOLD),
        ));

    let lines = vec![
        input_line(&state.country_input, state.input_mode),
        compare_line(state.compare_with_india),
    ];
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// "Country: Germany█" while typing, the placeholder when empty.
fn input_line(text: &str, editing: bool) -> Line<'static> {
    let mut spans = vec![Span::styled(" Country: ", Style::default().fg(Color::Gray))];
    if text.is_empty() && !editing {
        spans.push(Span::styled(PLACEHOLDER, Style::default().fg(Color::DarkGray)));
    } else {
        spans.push(Span::styled(
            text.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ));
    }
    if editing {
        spans.push(Span::styled("█", Style::default().fg(Color::Cyan)));
    }
    Line::from(spans)
}

fn compare_line(compare: bool) -> Line<'static> {
    let (value, color) = if compare {
        ("on", Color::Green)
    } else {
        ("off", Color::Gray)
    };
    Line::from(vec![
        Span::raw(" Include comparison with Indian Preamble: "),
        Span::styled(value, Style::default().fg(color).add_modifier(Modifier::BOLD)),
        Span::styled(" (c)", Style::default().fg(Color::DarkGray)),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::widgets::buffer_text;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn text_of(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn placeholder_when_empty_and_not_editing() {
        assert_eq!(text_of(&input_line("", false)), format!(" Country: {PLACEHOLDER}"));
    }

    #[test]
    fn cursor_while_editing() {
        assert_eq!(text_of(&input_line("Germ", true)), " Country: Germ█");
        assert_eq!(text_of(&input_line("", true)), " Country: █");
    }

    #[test]
    fn compare_toggle_text() {
        assert!(text_of(&compare_line(true)).ends_with("Indian Preamble: on (c)"));
        assert!(text_of(&compare_line(false)).ends_with("Indian Preamble: off (c)"));
    }

    #[test]
    fn render_shows_typed_country() {
        let mut terminal = Terminal::new(TestBackend::new(80, 4)).unwrap();
        let mut state = ViewState::default();
        state.country_input = "South Africa".into();
        terminal
            .draw(|frame| render(frame, frame.area(), &state))
            .unwrap();
        let text = buffer_text(terminal.backend().buffer());
        assert!(text.contains("World Preamble Explorer"));
        assert!(text.contains("Country: South Africa"));
    }
}
