// End-to-end tests: key presses go through `input::handle_key`, the
// resulting commands run through the app task, and the updates it sends are
// applied to a `ViewState` and rendered on a test backend.

use std::sync::Arc;

use async_trait::async_trait;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};
use ratatui::backend::TestBackend;
use ratatui::Terminal;
use tokio::sync::mpsc;

use preamble_app::app::{self, AppState};
use preamble_core::config::{
    Config, CredentialsConfig, ExplainerConfig, HistoryConfig, LlmConfig,
};
use preamble_core::protocol::{LlmStatus, TabId, UiUpdate, UserCommand};
use preamble_llm::client::{GenerationBackend, GenerationError};
use preamble_llm::credentials::{Credential, CredentialPool};
use preamble_llm::dispatcher::Dispatcher;
use preamble_tui::tui::{apply_ui_update, input, render_frame, ViewState};

// ===========================================================================
// Test helpers
// ===========================================================================

/// Answers every prompt unless the credential starts with "bad".
struct CannedBackend;

#[async_trait]
impl GenerationBackend for CannedBackend {
    fn provider_name(&self) -> &str {
        "Gemini"
    }

    async fn generate(
        &self,
        credential: &Credential,
        prompt: &str,
    ) -> Result<String, GenerationError> {
        if credential.expose().starts_with("bad") {
            return Err(GenerationError::InvalidResponse("rejected".into()));
        }
        if prompt.contains("Write the constitutional preamble of") {
            Ok("We, the people of Kenya, acknowledging the supremacy of the Almighty God".into())
        } else if prompt.contains("Analyze the following Constitutional Preamble") {
            Ok("Main Values & Themes: unity and diversity.".into())
        } else {
            Ok("Liberty means freedom of thought and expression.".into())
        }
    }
}

fn config() -> Config {
    Config {
        llm: LlmConfig {
            provider: "Gemini".into(),
            model: "gemini-2.5-flash".into(),
            base_url: "http://127.0.0.1:1".into(),
            timeout_secs: None,
        },
        explainer: ExplainerConfig {
            default_depth: 2,
            explain_in_hindi: false,
            compare_with_india: true,
        },
        history: HistoryConfig { display_limit: 10 },
        credentials: CredentialsConfig::default(),
    }
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent {
        code,
        modifiers: KeyModifiers::NONE,
        kind: KeyEventKind::Press,
        state: KeyEventState::NONE,
    }
}

/// A TUI and an app task connected by channels, driven one key at a time.
struct Harness {
    view: ViewState,
    cmd_tx: mpsc::Sender<UserCommand>,
    ui_rx: mpsc::Receiver<UiUpdate>,
    app: tokio::task::JoinHandle<anyhow::Result<()>>,
}

impl Harness {
    fn start(keys: &[&str]) -> Self {
        let pool = CredentialPool::new(keys.iter().copied());
        let dispatcher = Dispatcher::new(pool, Arc::new(CannedBackend));
        let (cmd_tx, cmd_rx) = mpsc::channel(16);
        let (ui_tx, ui_rx) = mpsc::channel(64);
        let app = tokio::spawn(app::run(cmd_rx, ui_tx, AppState::new(config(), dispatcher)));
        Harness {
            view: ViewState::from_config(&config()),
            cmd_tx,
            ui_rx,
            app,
        }
    }

    /// Press a key; if it produced a command, run it and apply every update
    /// up to the closing `Idle`.
    async fn press(&mut self, code: KeyCode) {
        let Some(cmd) = input::handle_key(key(code), &mut self.view) else {
            return;
        };
        self.cmd_tx.send(cmd).await.unwrap();
        while let Some(update) = self.ui_rx.recv().await {
            let done = update == UiUpdate::Idle;
            apply_ui_update(&mut self.view, update);
            if done {
                break;
            }
        }
    }

    async fn type_text(&mut self, text: &str) {
        for c in text.chars() {
            self.press(KeyCode::Char(c)).await;
        }
    }

    /// Apply whatever the app sent without being asked (the startup notice).
    fn drain(&mut self) {
        while let Ok(update) = self.ui_rx.try_recv() {
            apply_ui_update(&mut self.view, update);
        }
    }

    fn screen(&self) -> String {
        let mut terminal = Terminal::new(TestBackend::new(140, 45)).unwrap();
        terminal.draw(|frame| render_frame(frame, &self.view)).unwrap();
        let buffer = terminal.backend().buffer();
        let width = buffer.area.width as usize;
        buffer
            .content
            .chunks(width)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    async fn quit(self) {
        drop(self.cmd_tx);
        self.app.await.unwrap().unwrap();
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[tokio::test]
async fn explain_term_from_grid() {
    let mut h = Harness::start(&["good"]);
    h.press(KeyCode::Down).await;
    h.press(KeyCode::Down).await;
    h.press(KeyCode::Right).await;
    h.press(KeyCode::Left).await;
    assert_eq!(h.view.term_cursor, 6);

    h.press(KeyCode::Enter).await;

    assert_eq!(h.view.term_status, LlmStatus::Complete);
    assert!(!h.view.is_busy());
    let screen = h.screen();
    assert!(screen.contains("Explanation: Liberty"));
    assert!(screen.contains("Liberty means freedom of thought"));
    assert!(screen.contains("Model: Gemini (Key 1)"));
    assert!(screen.contains("Category: Core Value (English)"));
    h.quit().await;
}

#[tokio::test]
async fn explore_country_then_switch_back() {
    let mut h = Harness::start(&["bad-1", "good"]);
    h.press(KeyCode::Char('2')).await;
    h.press(KeyCode::Enter).await;
    h.type_text("Kenya").await;
    h.press(KeyCode::Enter).await;

    assert_eq!(h.view.active_tab, TabId::World);
    assert_eq!(h.view.country_status, LlmStatus::Complete);
    let screen = h.screen();
    assert!(screen.contains("Preamble of Kenya"));
    assert!(screen.contains("Source: Gemini (Key 2)"));
    assert!(screen.contains("unity and diversity"));
    assert!(screen.contains("with India Comparison"));

    h.press(KeyCode::Char('1')).await;
    h.press(KeyCode::Enter).await;
    assert!(h.view.country.is_none());
    let screen = h.screen();
    // Newest first.
    let term_row = screen.find("Category: Foundational (English)").unwrap();
    let country_row = screen.find("Global Preamble (w/ Compare)").unwrap();
    assert!(term_row < country_row);
    h.quit().await;
}

#[tokio::test]
async fn missing_keys_are_reported_on_screen() {
    let mut h = Harness::start(&["", "YOUR_API_KEY_HERE"]);
    h.press(KeyCode::Enter).await;
    h.drain();

    assert_eq!(h.view.term_status, LlmStatus::Error);
    let screen = h.screen();
    assert!(screen.contains("All Gemini API keys are missing or set to placeholders."));
    assert!(screen.contains("Model: None"));
    h.quit().await;
}

#[tokio::test]
async fn blank_country_shows_error_notice() {
    let mut h = Harness::start(&["good"]);
    h.press(KeyCode::Char('2')).await;
    h.press(KeyCode::Char('i')).await;
    h.type_text("   ").await;
    h.press(KeyCode::Enter).await;

    assert!(h.view.country.is_none());
    assert!(h.screen().contains("Please enter a country name."));
    assert!(h.view.history.is_empty());
    h.quit().await;
}
