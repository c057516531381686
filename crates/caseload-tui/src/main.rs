//! Caseload - a terminal roster for client unit allocations.
//!
//! Lists clients with their authorization status and how much of their
//! allocated units they have used, and lets a clinician search, sort and edit
//! the roster from the keyboard.

mod app;
mod config;
mod store;
mod ui;

use std::io;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use app::{App, AppState};
use config::Config;
use store::RosterStore;
use ui::input::handle_input;
use ui::render::render;

// ============================================================================
// Constants
// ============================================================================

/// Timeout for polling terminal events (in milliseconds)
const EVENT_POLL_TIMEOUT_MS: u64 = 250;

/// Prefix for the daily log files
const LOG_FILE_PREFIX: &str = "caseload.log";

/// Initialize the tracing subscriber for logging.
///
/// Logs go to a daily file under the cache directory; writing to the terminal
/// would corrupt the alternate screen. Use RUST_LOG to control the level.
fn init_tracing() -> Option<WorkerGuard> {
    let log_dir = dirs::cache_dir()?.join("caseload");
    let appender = tracing_appender::rolling::daily(log_dir, LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(writer).with_ansi(false))
        .with(filter)
        .init();

    Some(guard)
}

fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let _log_guard = init_tracing();
    info!("Caseload starting");

    let config_path = Config::path().ok();
    let config = match config_path.as_deref().map(Config::load_from) {
        Some(Ok(config)) => config,
        Some(Err(e)) => {
            warn!(error = %e, "Using default config");
            Config::default()
        }
        None => Config::default(),
    };

    let roster_path = config.resolved_roster_path()?;
    let mut store = RosterStore::new(roster_path);
    let loaded = store
        .load_existing()
        .with_context(|| format!("Failed to load roster {}", store.path().display()))?;
    info!(count = loaded, path = %store.path().display(), "Roster loaded");

    let mut app = App::new(config, config_path, store);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    info!("Caseload shutting down");
    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| render(f, app))?;

        if event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                // Ctrl+C to quit
                if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                    return Ok(());
                }

                handle_input(app, key);
            }
        }

        if matches!(app.state, AppState::Quitting) {
            return Ok(());
        }
    }
}
