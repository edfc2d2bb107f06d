// Quit confirmation overlay, drawn over the whole frame while
// `ViewState::confirm_quit` is set.

use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

const DIALOG_WIDTH: u16 = 28;
const DIALOG_HEIGHT: u16 = 5;

pub fn render(frame: &mut Frame, area: Rect) {
    let dialog = centered_rect(DIALOG_WIDTH, DIALOG_HEIGHT, area);
    frame.render_widget(Clear, dialog);

    let yes = Style::default().fg(Color::Green).add_modifier(Modifier::BOLD);
    let no = Style::default().fg(Color::Red).add_modifier(Modifier::BOLD);
    let lines = vec![
        Line::from(vec![
            Span::raw("  Really quit? ("),
            Span::styled("y", yes),
            Span::raw("/"),
            Span::styled("n", no),
            Span::raw(")"),
        ]),
        Line::from(Span::styled(
            "  History is not saved.",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(Span::styled(
            " Leave the explorer? ",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ));
    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .style(Style::default().bg(Color::Black)),
        dialog,
    );
}

/// A `width` x `height` rectangle centered in `area`, shrunk to fit.
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(row);
    cell
}
