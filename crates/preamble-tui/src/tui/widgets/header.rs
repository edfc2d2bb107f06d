// Title header and footer line.

use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

pub const TITLE: &str = "Preamble Explorer";
pub const SUBTITLE: &str =
    "A tool for understanding core constitutional values globally, powered by AI.";
pub const FOOTER: &str = "Built for Educational Purposes (Samvidhan Divas) · Version 1.0";

pub fn render(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(vec![
            Span::raw("🇮🇳 "),
            Span::styled(
                TITLE,
                Style::default()
                    .fg(Color::LightYellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" 🌍"),
        ]),
        Line::from(Span::styled(SUBTITLE, Style::default().fg(Color::Gray))),
    ];
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

pub fn render_footer(frame: &mut Frame, area: Rect) {
    let paragraph = Paragraph::new(Span::styled(
        FOOTER,
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::ITALIC),
    ))
    .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}
