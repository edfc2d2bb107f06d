// Screen layout: panel arrangement and sizing.
//
// +--------------------------------------------------+
// | Header (2 rows: title, subtitle)                  |
// | Status Bar (1 row)                                |
// | Notices (0-2 rows)                                |
// +-------------------------+------------------------+
// | Main Panel (65%)         | History (35%)          |
// +-------------------------+------------------------+
// | Help Bar (1 row)                                  |
// | Footer (1 row)                                    |
// +--------------------------------------------------+
//
// The main panel is split again per tab by `india_layout` / `world_layout`.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Resolved screen areas for each zone.
#[derive(Debug, Clone)]
pub struct AppLayout {
    pub header: Rect,
    pub status_bar: Rect,
    /// Zero height when there is nothing to report.
    pub notices: Rect,
    pub main_panel: Rect,
    pub history: Rect,
    pub help_bar: Rect,
    pub footer: Rect,
}

/// Build the top-level layout. `notice_rows` is the number of notice lines
/// currently shown.
pub fn build_layout(area: Rect, notice_rows: u16) -> AppLayout {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),           // header
            Constraint::Length(1),           // status bar
            Constraint::Length(notice_rows), // notices
            Constraint::Min(8),              // main + history
            Constraint::Length(1),           // help bar
            Constraint::Length(1),           // footer
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(vertical[3]);

    AppLayout {
        header: vertical[0],
        status_bar: vertical[1],
        notices: vertical[2],
        main_panel: horizontal[0],
        history: horizontal[1],
        help_bar: vertical[4],
        footer: vertical[5],
    }
}

// ---------------------------------------------------------------------------
// Per-tab layouts
// ---------------------------------------------------------------------------

/// Rows the preamble card takes when collapsed and when expanded.
const PREAMBLE_COLLAPSED_ROWS: u16 = 5;
const PREAMBLE_EXPANDED_ROWS: u16 = 13;

/// India tab: preamble card, term grid with options, explanation card.
#[derive(Debug, Clone)]
pub struct IndiaLayout {
    pub preamble: Rect,
    pub terms: Rect,
    pub explanation: Rect,
}

pub fn india_layout(area: Rect, preamble_expanded: bool) -> IndiaLayout {
    let preamble_rows = if preamble_expanded {
        PREAMBLE_EXPANDED_ROWS
    } else {
        PREAMBLE_COLLAPSED_ROWS
    };
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(preamble_rows),
            Constraint::Length(6), // 3 rows of terms + options + borders
            Constraint::Min(3),
        ])
        .split(area);

    IndiaLayout {
        preamble: sections[0],
        terms: sections[1],
        explanation: sections[2],
    }
}

/// World tab: country input, generated preamble, analysis.
#[derive(Debug, Clone)]
pub struct WorldLayout {
    pub input: Rect,
    pub preamble: Rect,
    pub analysis: Rect,
}

pub fn world_layout(area: Rect) -> WorldLayout {
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // input line + compare toggle + borders
            Constraint::Percentage(40),
            Constraint::Min(3),
        ])
        .split(area);

    WorldLayout {
        input: sections[0],
        preamble: sections[1],
        analysis: sections[2],
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
