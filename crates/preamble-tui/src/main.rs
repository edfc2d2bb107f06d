// Preamble Explorer entry point.
//
// Startup sequence:
// 1. Initialize tracing (log to file, not terminal)
// 2. Load config
// 3. Build the credential-rotation dispatcher
// 4. Create mpsc channels
// 5. Spawn the app task
// 6. Run the TUI until the user quits
// 7. Wait briefly for the app task to finish

use preamble_app::app;
use preamble_core::config;
use preamble_llm::dispatcher::Dispatcher;
use preamble_tui::tui;

use anyhow::Context;
use tokio::sync::mpsc;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing()?;
    info!("Preamble Explorer starting up");

    let config = config::load_config().context("failed to load configuration")?;
    info!(
        "Config loaded: provider={}, model={}",
        config.llm.provider, config.llm.model
    );

    let dispatcher = Dispatcher::from_config(&config).context("failed to build LLM client")?;
    info!(
        "{} of {} configured credentials are usable",
        dispatcher.pool().usable_count(),
        dispatcher.pool().len()
    );

    let (cmd_tx, cmd_rx) = mpsc::channel(64);
    let (ui_tx, ui_rx) = mpsc::channel(256);

    let view_state = tui::ViewState::from_config(&config);
    let app_state = app::AppState::new(config, dispatcher);

    let app_handle = tokio::spawn(async move {
        if let Err(e) = app::run(cmd_rx, ui_tx, app_state).await {
            error!("Application loop error: {}", e);
        }
    });

    if let Err(e) = tui::run(ui_rx, cmd_tx, view_state).await {
        error!("TUI error: {:#}", e);
    }

    // The TUI dropped cmd_tx, so the app loop ends on its next receive.
    let _ = tokio::time::timeout(std::time::Duration::from_secs(5), async {
        let _ = app_handle.await;
    })
    .await;

    info!("Preamble Explorer shut down cleanly");
    Ok(())
}

const DEFAULT_FILTER: &str =
    "preamble=info,preamble_tui=info,preamble_app=info,preamble_llm=info,preamble_core=info,warn";

/// Initialize tracing to log to a file (the terminal belongs to the TUI).
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = std::env::current_dir()?.join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::File::create(log_dir.join("preamble.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
