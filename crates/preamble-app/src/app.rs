// Application state and orchestration logic.
//
// The app task owns the session and the dispatcher. It takes one
// `UserCommand` at a time from the TUI, runs the flow it asks for, and
// pushes `UiUpdate`s back. Dispatches inside a flow are awaited in order,
// so no two generation calls are ever in flight together.

use anyhow::Context;
use chrono::Local;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use preamble_core::config::Config;
use preamble_core::preamble::PreambleTerm;
use preamble_core::protocol::{
    CountryPreamble, ExplanationDepth, HistoryEntry, LanguageMode, Notice, TermExplanation,
    UiUpdate, UserCommand,
};
use preamble_core::session::SessionState;
use preamble_llm::dispatcher::{DispatchError, Dispatcher};

use crate::lookup::{self, failure_notice};

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

pub struct AppState {
    pub config: Config,
    pub session: SessionState,
    pub dispatcher: Dispatcher,
}

impl AppState {
    pub fn new(config: Config, dispatcher: Dispatcher) -> Self {
        let session = SessionState::new(config.history.display_limit);
        AppState {
            config,
            session,
            dispatcher,
        }
    }

    fn provider(&self) -> &str {
        self.dispatcher.provider_name()
    }
}

// ---------------------------------------------------------------------------
// Main event loop
// ---------------------------------------------------------------------------

/// Run the application loop until `Quit` arrives or the TUI drops its
/// command sender.
pub async fn run(
    mut cmd_rx: mpsc::Receiver<UserCommand>,
    ui_tx: mpsc::Sender<UiUpdate>,
    mut state: AppState,
) -> anyhow::Result<()> {
    info!(
        "Application loop started ({} of {} credentials usable)",
        state.dispatcher.pool().usable_count(),
        state.dispatcher.pool().len()
    );

    if !state.dispatcher.pool().has_usable() {
        warn!("No usable API credentials configured");
        let notice = failure_notice(state.provider(), &DispatchError::NoUsableCredentials);
        send(&ui_tx, UiUpdate::Notice(Notice::error(notice))).await?;
    }

    loop {
        match cmd_rx.recv().await {
            Some(UserCommand::Quit) => {
                info!("Quit command received, shutting down");
                break;
            }
            Some(cmd) => {
                if let Err(e) = handle_user_command(&mut state, cmd, &ui_tx).await {
                    // The TUI quits without waiting for a lookup in flight.
                    if ui_tx.is_closed() {
                        info!("UI closed during a lookup, shutting down");
                        break;
                    }
                    return Err(e);
                }
            }
            None => {
                info!("Command channel closed, shutting down");
                break;
            }
        }
    }

    Ok(())
}

async fn send(ui_tx: &mpsc::Sender<UiUpdate>, update: UiUpdate) -> anyhow::Result<()> {
    ui_tx
        .send(update)
        .await
        .context("UI update channel closed")
}

/// Handle a user command from the TUI.
async fn handle_user_command(
    state: &mut AppState,
    cmd: UserCommand,
    ui_tx: &mpsc::Sender<UiUpdate>,
) -> anyhow::Result<()> {
    match cmd {
        UserCommand::ExplainTerm {
            term,
            explain_in_hindi,
            depth,
        } => {
            let language = LanguageMode::from_hindi_flag(explain_in_hindi);
            explain_term(state, term, language, depth, ui_tx).await
        }
        UserCommand::ExploreCountry { country, compare } => {
            explore_country(state, &country, compare, ui_tx).await
        }
        UserCommand::Quit => {
            // Handled in the main loop
            Ok(())
        }
    }
}

// ---------------------------------------------------------------------------
// Flows
// ---------------------------------------------------------------------------

/// Term flow: select, explain, record.
async fn explain_term(
    state: &mut AppState,
    term: PreambleTerm,
    language: LanguageMode,
    depth: ExplanationDepth,
    ui_tx: &mpsc::Sender<UiUpdate>,
) -> anyhow::Result<()> {
    state.session.select_term(term);
    send(ui_tx, UiUpdate::TermSelected(term)).await?;
    send(
        ui_tx,
        UiUpdate::Working(format!("Explaining {} with AI...", term.label)),
    )
    .await?;

    let outcome = lookup::explain_term(&state.dispatcher, term, language, depth).await;
    if let Some(err) = &outcome.failure {
        let notice = failure_notice(state.provider(), err);
        send(ui_tx, UiUpdate::Notice(Notice::error(notice))).await?;
    }

    let result = TermExplanation {
        term,
        language,
        depth,
        explanation: outcome.value,
    };
    if !state.session.set_term_explanation(result.clone()) {
        debug!(term = term.label, "explanation no longer matches selection, dropped");
    }
    send(ui_tx, UiUpdate::TermExplained(Box::new(result))).await?;

    state.session.record(HistoryEntry::term(
        term.label,
        term.category.label(),
        language,
        Local::now(),
    ));
    send(ui_tx, UiUpdate::History(state.session.recent_history())).await?;
    send(ui_tx, UiUpdate::Idle).await
}

/// Country flow: generate the preamble, then analyze it. The analysis step
/// runs once per generated preamble, and the history entry is written only
/// after it completes.
async fn explore_country(
    state: &mut AppState,
    country: &str,
    compare: bool,
    ui_tx: &mpsc::Sender<UiUpdate>,
) -> anyhow::Result<()> {
    let country = country.trim();
    state.session.begin_country_lookup();
    send(ui_tx, UiUpdate::CountryLookupStarted).await?;

    if country.is_empty() {
        send(
            ui_tx,
            UiUpdate::Notice(Notice::error(lookup::EMPTY_COUNTRY_MESSAGE)),
        )
        .await?;
        return send(ui_tx, UiUpdate::Idle).await;
    }

    // Step 1: generate the preamble.
    send(
        ui_tx,
        UiUpdate::Working(format!("Generating the Preamble of {country} with AI...")),
    )
    .await?;

    let fetched = match lookup::fetch_country_preamble(&state.dispatcher, country).await {
        Ok(fetched) => fetched,
        Err(failure) => {
            let notice = failure_notice(state.provider(), &failure.error);
            send(ui_tx, UiUpdate::Notice(Notice::error(notice))).await?;
            send(
                ui_tx,
                UiUpdate::Notice(Notice::error(format!(
                    "❌ Preamble fetch failed: {}",
                    failure.message
                ))),
            )
            .await?;
            return send(ui_tx, UiUpdate::Idle).await;
        }
    };

    let payload = CountryPreamble {
        country: country.to_string(),
        preamble_text: fetched.text,
        source: fetched.source,
        fetch_message: fetched.message,
        compare,
        analysis: None,
    };
    send(
        ui_tx,
        UiUpdate::Notice(Notice::info(format!(
            "Preamble content: {}",
            payload.fetch_message
        ))),
    )
    .await?;
    state.session.set_country_preamble(payload.clone());
    send(ui_tx, UiUpdate::CountryPreambleReady(Box::new(payload))).await?;

    // Step 2: analyze it.
    if !state.session.needs_analysis() {
        return send(ui_tx, UiUpdate::Idle).await;
    }
    send(
        ui_tx,
        UiUpdate::Working(format!("Analyzing the Preamble of {country} with AI...")),
    )
    .await?;

    let preamble_text = state
        .session
        .country()
        .map(|c| c.preamble_text.clone())
        .unwrap_or_default();
    let outcome =
        lookup::explain_country_preamble(&state.dispatcher, country, &preamble_text, compare).await;
    if let Some(err) = &outcome.failure {
        let notice = failure_notice(state.provider(), err);
        send(ui_tx, UiUpdate::Notice(Notice::error(notice))).await?;
    }

    state.session.set_country_analysis(outcome.value.clone());
    send(ui_tx, UiUpdate::CountryAnalysisReady(Box::new(outcome.value))).await?;

    state.session.record(HistoryEntry::country(
        country,
        compare,
        &preamble_text,
        Local::now(),
    ));
    send(ui_tx, UiUpdate::History(state.session.recent_history())).await?;
    send(ui_tx, UiUpdate::Idle).await
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
