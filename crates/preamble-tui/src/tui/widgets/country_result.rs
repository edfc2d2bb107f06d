// World tab result panels: the generated preamble and its analysis.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use preamble_core::protocol::{CountryPreamble, LlmStatus};

use super::{meta_line, status_border_style};
use crate::tui::ViewState;

pub const SCROLL_KEY: &str = "country";

/// Upper panel: the preamble text as generated.
pub fn render_preamble(frame: &mut Frame, area: Rect, state: &ViewState) {
    let title = match &state.country {
        Some(country) => format!(" 📜 Preamble of {} ", country.country),
        None => " 📜 Preamble ".to_string(),
    };
    let lines = match &state.country {
        Some(country) => preamble_lines(country),
        None => vec![dim_line(preamble_placeholder(state.country_status))],
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(if state.country.is_some() {
            Style::default().fg(Color::LightYellow)
        } else {
            status_border_style(state.country_status)
        })
        .title(Span::styled(title, Style::default().add_modifier(Modifier::BOLD)));
    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        area,
    );
}

/// Lower panel: the analysis, scrollable with j/k.
pub fn render_analysis(frame: &mut Frame, area: Rect, state: &ViewState) {
    let lines = match &state.country {
        Some(country) => analysis_lines(country, state.country_status),
        None => Vec::new(),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(status_border_style(state.country_status))
        .title(Span::styled(
            " 🔍 Analysis ",
            Style::default().add_modifier(Modifier::BOLD),
        ));
    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((state.scroll(SCROLL_KEY), 0));
    frame.render_widget(paragraph, area);
}

pub fn preamble_lines(country: &CountryPreamble) -> Vec<Line<'static>> {
    let mut lines = vec![
        meta_line(&[("Source", country.source.as_str())]),
        Line::default(),
    ];
    let body = Style::default().add_modifier(Modifier::ITALIC);
    lines.extend(
        country
            .preamble_text
            .lines()
            .map(|l| Line::from(Span::styled(l.to_string(), body))),
    );
    lines
}

pub fn analysis_lines(country: &CountryPreamble, status: LlmStatus) -> Vec<Line<'static>> {
    let Some(analysis) = &country.analysis else {
        let text = if status == LlmStatus::Pending {
            "Analyzing..."
        } else {
            "No analysis available."
        };
        return vec![dim_line(text)];
    };

    let mut lines = vec![
        meta_line(&[
            ("Mode", country.comparison_label()),
            ("Model", analysis.model_used.as_str()),
        ]),
        Line::default(),
    ];
    let style = if analysis.is_fallback() {
        Style::default().fg(Color::Red)
    } else {
        Style::default()
    };
    lines.extend(
        analysis
            .text
            .lines()
            .map(|l| Line::from(Span::styled(l.to_string(), style))),
    );
    lines
}

fn preamble_placeholder(status: LlmStatus) -> &'static str {
    match status {
        LlmStatus::Pending => "Generating preamble...",
        LlmStatus::Error => "No preamble available.",
        LlmStatus::Idle | LlmStatus::Complete => {
            "Press Enter, type a country name, then Enter again."
        }
    }
}

fn dim_line(text: &'static str) -> Line<'static> {
    Line::from(Span::styled(text, Style::default().fg(Color::DarkGray)))
}
