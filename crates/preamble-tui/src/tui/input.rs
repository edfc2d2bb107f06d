// Keyboard input handling and command dispatch.
//
// Translates crossterm key events into UserCommand messages for the app
// task, or into local ViewState changes (tab switching, grid cursor,
// explanation options, scrolling, country input).

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use preamble_core::preamble::PREAMBLE_TERMS;
use preamble_core::protocol::{TabId, UserCommand};

use super::widgets::term_grid::GRID_COLUMNS;
use super::widgets::{country_result, explanation};
use super::ViewState;

/// Lines moved by PageUp/PageDown.
const PAGE_SIZE: usize = 10;

/// Handle a keyboard event.
///
/// Returns `Some(UserCommand)` when the key starts a lookup or quits.
/// Everything else is handled locally and returns `None`.
pub fn handle_key(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    // Windows reports both Press and Release.
    if key_event.kind != KeyEventKind::Press {
        return None;
    }

    if key_event.modifiers.contains(KeyModifiers::CONTROL)
        && key_event.code == KeyCode::Char('c')
    {
        return Some(UserCommand::Quit);
    }

    if view_state.confirm_quit {
        return handle_confirm_quit(key_event, view_state);
    }

    if view_state.input_mode {
        return handle_country_input(key_event, view_state);
    }

    match key_event.code {
        KeyCode::Char('1') => {
            view_state.active_tab = TabId::India;
            None
        }
        KeyCode::Char('2') => {
            view_state.active_tab = TabId::World;
            None
        }
        KeyCode::Tab => {
            view_state.active_tab = match view_state.active_tab {
                TabId::India => TabId::World,
                TabId::World => TabId::India,
            };
            None
        }
        KeyCode::Char('q') => {
            view_state.confirm_quit = true;
            None
        }
        _ => match view_state.active_tab {
            TabId::India => handle_india_key(key_event.code, view_state),
            TabId::World => handle_world_key(key_event.code, view_state),
        },
    }
}

/// y/q confirm, n/Esc cancel, everything else is swallowed.
fn handle_confirm_quit(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Char('q') | KeyCode::Char('Q') => {
            Some(UserCommand::Quit)
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            view_state.confirm_quit = false;
            None
        }
        _ => None,
    }
}

fn handle_country_input(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Esc => {
            view_state.input_mode = false;
            None
        }
        KeyCode::Enter => {
            if view_state.is_busy() {
                return None;
            }
            view_state.input_mode = false;
            Some(UserCommand::ExploreCountry {
                country: view_state.country_input.trim().to_string(),
                compare: view_state.compare_with_india,
            })
        }
        KeyCode::Backspace => {
            view_state.country_input.pop();
            None
        }
        KeyCode::Char(c) => {
            view_state.country_input.push(c);
            None
        }
        _ => None,
    }
}

fn handle_india_key(code: KeyCode, view_state: &mut ViewState) -> Option<UserCommand> {
    match code {
        KeyCode::Left | KeyCode::Right | KeyCode::Up | KeyCode::Down => {
            view_state.term_cursor = move_cursor(view_state.term_cursor, code);
            None
        }
        KeyCode::Enter => {
            if view_state.is_busy() {
                return None;
            }
            let term = PREAMBLE_TERMS.get(view_state.term_cursor).copied()?;
            Some(UserCommand::ExplainTerm {
                term,
                explain_in_hindi: view_state.explain_in_hindi,
                depth: view_state.depth,
            })
        }
        KeyCode::Char('h') => {
            view_state.explain_in_hindi = !view_state.explain_in_hindi;
            None
        }
        KeyCode::Char('+') | KeyCode::Char('=') => {
            view_state.depth = view_state.depth.increase();
            None
        }
        KeyCode::Char('-') => {
            view_state.depth = view_state.depth.decrease();
            None
        }
        KeyCode::Char('p') => {
            view_state.show_full_preamble = !view_state.show_full_preamble;
            None
        }
        other => {
            scroll(view_state, explanation::SCROLL_KEY, other);
            None
        }
    }
}

fn handle_world_key(code: KeyCode, view_state: &mut ViewState) -> Option<UserCommand> {
    match code {
        KeyCode::Enter | KeyCode::Char('i') | KeyCode::Char('/') => {
            view_state.input_mode = true;
            None
        }
        KeyCode::Char('c') => {
            view_state.compare_with_india = !view_state.compare_with_india;
            None
        }
        other => {
            scroll(view_state, country_result::SCROLL_KEY, other);
            None
        }
    }
}

/// Move the grid cursor, staying inside the grid.
fn move_cursor(cursor: usize, code: KeyCode) -> usize {
    let last = PREAMBLE_TERMS.len() - 1;
    match code {
        KeyCode::Left if cursor % GRID_COLUMNS > 0 => cursor - 1,
        KeyCode::Right if cursor % GRID_COLUMNS < GRID_COLUMNS - 1 && cursor < last => cursor + 1,
        KeyCode::Up if cursor >= GRID_COLUMNS => cursor - GRID_COLUMNS,
        KeyCode::Down if cursor + GRID_COLUMNS <= last => cursor + GRID_COLUMNS,
        _ => cursor,
    }
}

fn scroll(view_state: &mut ViewState, key: &str, code: KeyCode) {
    let offset = view_state.scroll_offset.entry(key.to_string()).or_insert(0);
    match code {
        KeyCode::Char('j') => *offset = offset.saturating_add(1),
        KeyCode::Char('k') => *offset = offset.saturating_sub(1),
        KeyCode::PageDown => *offset = offset.saturating_add(PAGE_SIZE),
        KeyCode::PageUp => *offset = offset.saturating_sub(PAGE_SIZE),
        _ => {}
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
