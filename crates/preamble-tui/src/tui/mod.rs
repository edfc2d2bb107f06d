// TUI: layout, input handling, and widget rendering.
//
// The TUI owns a `ViewState` that mirrors what the app task has produced.
// The app task pushes `UiUpdate` messages over an mpsc channel; the TUI
// applies them to `ViewState` and re-renders at ~30 fps.

pub mod input;
pub mod layout;
pub mod widgets;

use std::collections::HashMap;
use std::time::Duration;

use crossterm::event::{Event, EventStream};
use futures_util::StreamExt;
use ratatui::Frame;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use preamble_core::config::Config;
use preamble_core::preamble::PreambleTerm;
use preamble_core::protocol::{
    CountryPreamble, ExplanationDepth, HistoryEntry, LlmStatus, Notice, TabId, TermExplanation,
    UiUpdate, UserCommand,
};

use layout::{build_layout, india_layout, world_layout};

/// Most notices kept on screen at once; older ones scroll off.
pub const MAX_NOTICES: usize = 2;

// ---------------------------------------------------------------------------
// ViewState
// ---------------------------------------------------------------------------

/// TUI-local state that mirrors the application state for rendering.
pub struct ViewState {
    /// Which explorer occupies the main panel.
    pub active_tab: TabId,

    // -- India tab --
    /// Index into `PREAMBLE_TERMS` of the highlighted grid cell.
    pub term_cursor: usize,
    pub explain_in_hindi: bool,
    pub depth: ExplanationDepth,
    pub show_full_preamble: bool,
    pub selected_term: Option<PreambleTerm>,
    pub term_explanation: Option<TermExplanation>,
    pub term_status: LlmStatus,

    // -- World tab --
    pub country_input: String,
    /// True while keystrokes go to the country input.
    pub input_mode: bool,
    pub compare_with_india: bool,
    pub country: Option<CountryPreamble>,
    pub country_status: LlmStatus,

    // -- Shared --
    /// Description of the generation call in flight, if any.
    pub working: Option<String>,
    pub notices: Vec<Notice>,
    /// Most recent history entries, newest first.
    pub history: Vec<HistoryEntry>,
    /// Per-widget scroll offsets (keyed by widget name).
    pub scroll_offset: HashMap<String, usize>,
    /// Whether the quit confirmation dialog is showing.
    pub confirm_quit: bool,
}

impl Default for ViewState {
    fn default() -> Self {
        ViewState {
            active_tab: TabId::India,
            term_cursor: 0,
            explain_in_hindi: false,
            depth: ExplanationDepth::default(),
            show_full_preamble: false,
            selected_term: None,
            term_explanation: None,
            term_status: LlmStatus::Idle,
            country_input: String::new(),
            input_mode: false,
            compare_with_india: true,
            country: None,
            country_status: LlmStatus::Idle,
            working: None,
            notices: Vec::new(),
            history: Vec::new(),
            scroll_offset: HashMap::new(),
            confirm_quit: false,
        }
    }
}

impl ViewState {
    /// Initial state with the option defaults taken from configuration.
    pub fn from_config(config: &Config) -> Self {
        ViewState {
            explain_in_hindi: config.explainer.explain_in_hindi,
            depth: ExplanationDepth::new(config.explainer.default_depth),
            compare_with_india: config.explainer.compare_with_india,
            ..ViewState::default()
        }
    }

    /// True while a lookup is running; new lookups are refused meanwhile.
    pub fn is_busy(&self) -> bool {
        self.working.is_some()
    }

    pub fn scroll(&self, key: &str) -> u16 {
        let offset = self.scroll_offset.get(key).copied().unwrap_or(0);
        u16::try_from(offset).unwrap_or(u16::MAX)
    }

    fn push_notice(&mut self, notice: Notice) {
        self.notices.push(notice);
        if self.notices.len() > MAX_NOTICES {
            let excess = self.notices.len() - MAX_NOTICES;
            self.notices.drain(..excess);
        }
    }
}

// ---------------------------------------------------------------------------
// UiUpdate processing
// ---------------------------------------------------------------------------

/// Apply a single UiUpdate to the ViewState.
pub fn apply_ui_update(state: &mut ViewState, update: UiUpdate) {
    match update {
        UiUpdate::Working(text) => {
            state.working = Some(text);
        }
        UiUpdate::TermSelected(term) => {
            state.active_tab = TabId::India;
            state.selected_term = Some(term);
            state.term_explanation = None;
            state.term_status = LlmStatus::Pending;
            state.country = None;
            state.country_status = LlmStatus::Idle;
            state.notices.clear();
            state.scroll_offset.remove("explanation");
        }
        UiUpdate::TermExplained(explanation) => {
            if state.selected_term != Some(explanation.term) {
                debug!("Dropping explanation for a term that is no longer selected");
                return;
            }
            state.term_status = if explanation.explanation.is_fallback() {
                LlmStatus::Error
            } else {
                LlmStatus::Complete
            };
            state.term_explanation = Some(*explanation);
        }
        UiUpdate::CountryLookupStarted => {
            state.active_tab = TabId::World;
            state.selected_term = None;
            state.term_explanation = None;
            state.term_status = LlmStatus::Idle;
            state.country = None;
            state.country_status = LlmStatus::Pending;
            state.notices.clear();
            state.scroll_offset.remove("country");
        }
        UiUpdate::CountryPreambleReady(payload) => {
            state.country = Some(*payload);
        }
        UiUpdate::CountryAnalysisReady(analysis) => {
            if let Some(country) = state.country.as_mut() {
                if country.analysis.is_none() {
                    state.country_status = if analysis.is_fallback() {
                        LlmStatus::Error
                    } else {
                        LlmStatus::Complete
                    };
                    country.analysis = Some(*analysis);
                }
            }
        }
        UiUpdate::History(entries) => {
            state.history = entries;
        }
        UiUpdate::Notice(notice) => {
            state.push_notice(notice);
        }
        UiUpdate::Idle => {
            state.working = None;
            if state.term_status == LlmStatus::Pending {
                state.term_status = LlmStatus::Idle;
            }
            if state.country_status == LlmStatus::Pending {
                // Nothing came back: empty name or failed fetch.
                state.country_status = if state.country.is_some() {
                    LlmStatus::Complete
                } else {
                    LlmStatus::Error
                };
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Render frame
// ---------------------------------------------------------------------------

/// Render the complete frame.
pub fn render_frame(frame: &mut Frame, state: &ViewState) {
    let layout = build_layout(frame.area(), state.notices.len() as u16);

    widgets::header::render(frame, layout.header);
    widgets::status_bar::render(frame, layout.status_bar, state);
    widgets::notice_bar::render(frame, layout.notices, &state.notices);

    match state.active_tab {
        TabId::India => {
            let india = india_layout(layout.main_panel, state.show_full_preamble);
            widgets::preamble_card::render(frame, india.preamble, state.show_full_preamble);
            widgets::term_grid::render(frame, india.terms, state);
            widgets::explanation::render(frame, india.explanation, state);
        }
        TabId::World => {
            let world = world_layout(layout.main_panel);
            widgets::country_input::render(frame, world.input, state);
            widgets::country_result::render_preamble(frame, world.preamble, state);
            widgets::country_result::render_analysis(frame, world.analysis, state);
        }
    }

    widgets::history::render(frame, layout.history, &state.history);
    widgets::help_bar::render(frame, layout.help_bar, state);
    widgets::header::render_footer(frame, layout.footer);

    if state.confirm_quit {
        widgets::quit_confirm::render(frame, frame.area());
    }
}

// ---------------------------------------------------------------------------
// Main TUI loop
// ---------------------------------------------------------------------------

/// Run the TUI event loop.
///
/// 1. Initializes the terminal (raw mode, alternate screen).
/// 2. Installs a panic hook that restores the terminal.
/// 3. Selects over UI updates, keyboard input and render ticks.
/// 4. Restores the terminal on exit.
pub async fn run(
    mut ui_rx: mpsc::Receiver<UiUpdate>,
    cmd_tx: mpsc::Sender<UserCommand>,
    mut view_state: ViewState,
) -> anyhow::Result<()> {
    let mut terminal = ratatui::init();

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = ratatui::restore();
        original_hook(panic_info);
    }));

    let mut event_stream = EventStream::new();

    let mut render_tick = tokio::time::interval(Duration::from_millis(33));
    render_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    let result = loop {
        tokio::select! {
            update = ui_rx.recv() => {
                match update {
                    Some(ui_update) => apply_ui_update(&mut view_state, ui_update),
                    None => {
                        // App task is gone.
                        break Ok(());
                    }
                }
            }

            maybe_event = event_stream.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key_event))) => {
                        if let Some(cmd) = input::handle_key(key_event, &mut view_state) {
                            let quit = cmd == UserCommand::Quit;
                            if cmd_tx.send(cmd).await.is_err() {
                                warn!("Command channel closed");
                                break Ok(());
                            }
                            if quit {
                                break Ok(());
                            }
                        }
                    }
                    Some(Ok(_)) => {
                        // Mouse, resize, focus: the next tick redraws.
                    }
                    Some(Err(e)) => {
                        break Err(anyhow::Error::new(e).context("terminal input error"));
                    }
                    None => break Ok(()),
                }
            }

            _ = render_tick.tick() => {
                if let Err(e) = terminal.draw(|frame| render_frame(frame, &view_state)) {
                    break Err(anyhow::Error::new(e).context("failed to draw frame"));
                }
            }
        }
    };

    ratatui::restore();
    result
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
