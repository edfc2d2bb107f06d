// Notice lines under the status bar: flow messages and dispatch errors.

use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use preamble_core::protocol::{Notice, NoticeLevel};

pub fn render(frame: &mut Frame, area: Rect, notices: &[Notice]) {
    if area.height == 0 {
        return;
    }
    let lines: Vec<Line> = notices.iter().map(notice_line).collect();
    frame.render_widget(Paragraph::new(lines), area);
}

fn notice_line(notice: &Notice) -> Line<'static> {
    let color = match notice.level {
        NoticeLevel::Info => Color::Cyan,
        NoticeLevel::Error => Color::Red,
    };
    Line::from(Span::styled(
        format!(" {}", notice.message),
        Style::default().fg(color),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::widgets::buffer_text;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    #[test]
    fn error_notices_are_red() {
        let line = notice_line(&Notice::error("Please enter a country name."));
        assert_eq!(line.spans[0].style.fg, Some(Color::Red));
        let line = notice_line(&Notice::info("ok"));
        assert_eq!(line.spans[0].style.fg, Some(Color::Cyan));
    }

    #[test]
    fn renders_each_notice_on_its_own_row() {
        let mut terminal = Terminal::new(TestBackend::new(80, 2)).unwrap();
        let notices = vec![
            Notice::error("All provided Gemini API keys failed to generate content."),
            Notice::error("❌ Preamble fetch failed"),
        ];
        terminal
            .draw(|frame| render(frame, frame.area(), &notices))
            .unwrap();
        let text = buffer_text(terminal.backend().buffer());
        let rows: Vec<&str> = text.lines().collect();
        assert!(rows[0].contains("failed to generate content"));
        assert!(rows[1].contains("Preamble fetch failed"));
    }

    #[test]
    fn zero_height_area_is_skipped() {
        let mut terminal = Terminal::new(TestBackend::new(80, 1)).unwrap();
        terminal
            .draw(|frame| {
                let mut area = frame.area();
                area.height = 0;
                render(frame, area, &[Notice::info("hidden")]);
            })
            .unwrap();
        assert!(!buffer_text(terminal.backend().buffer()).contains("hidden"));
    }
}
