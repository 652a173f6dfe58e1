//! Zudio — terminal kanban client for a hosted task backend.
//!
//! Launches the TUI and talks to the backend over its REST surface.
//! Configuration via CLI flags, environment variables, or config file
//! (`~/.config/zudio/config.toml`).
//!
//! ```bash
//! # Offline demo mode (no backend configured)
//! cargo run --bin zudio
//!
//! # Against a hosted project
//! cargo run --bin zudio -- --backend-url https://abc.example.co \
//!     --anon-key "$ANON_KEY" --access-token "$ACCESS_TOKEN"
//!
//! # Or via environment variables
//! ZUDIO_BACKEND_URL=https://abc.example.co ZUDIO_ANON_KEY=... \
//!     ZUDIO_ACCESS_TOKEN=... cargo run
//! ```

use std::io;
use std::path::Path;
use std::sync::Arc;

use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::sync::mpsc;
use tracing_appender::non_blocking::WorkerGuard;

use zudio::app::App;
use zudio::backend::{Backend, HttpBackend, MemoryBackend};
use zudio::config::{CliArgs, ClientConfig};
use zudio::remote::{self, StoreCommand};
use zudio::ui;

#[tokio::main]
async fn main() -> io::Result<()> {
    let cli = CliArgs::parse();

    // Load and resolve configuration (CLI args > config file > defaults).
    let config = match ClientConfig::load(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Warning: failed to load config file: {e}");
            ClientConfig::default()
        }
    };

    // Initialize logging before terminal setup (logs go to file, not stdout).
    let _log_guard = init_logging(&cli.log_level, cli.log_file.as_deref());

    tracing::info!("zudio starting");

    // Set up terminal.
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run against the configured backend, or the in-memory demo when the
    // backend settings are incomplete.
    let result = match config.to_http_config() {
        Some(http) => match HttpBackend::new(&http) {
            Ok(backend) => run_app(&mut terminal, Arc::new(backend), &config).await,
            Err(e) => {
                tracing::error!(error = %e, "invalid backend configuration");
                restore_terminal(&mut terminal)?;
                eprintln!("Invalid backend configuration: {e}");
                return Ok(());
            }
        },
        None => {
            tracing::info!("no backend configured, using offline demo data");
            run_app(&mut terminal, Arc::new(MemoryBackend::demo()), &config).await
        }
    };

    restore_terminal(&mut terminal)?;

    tracing::info!("zudio exiting");
    result
}

/// Restore the terminal to its pre-launch state.
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()
}

/// Initialize file-based logging.
///
/// Logs are written to a file (never stdout, since ratatui owns the terminal).
/// Returns a [`WorkerGuard`] that must be held until shutdown to ensure all
/// buffered log entries are flushed.
fn init_logging(level: &str, file_path: Option<&Path>) -> Option<WorkerGuard> {
    let default_path = std::env::temp_dir().join("zudio.log");
    let log_path = file_path.unwrap_or(&default_path);

    let log_dir = log_path.parent()?;
    let file_name = log_path.file_name()?.to_str()?;

    let file_appender = tracing_appender::rolling::never(log_dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(env_filter)
        .with_ansi(false)
        .init();

    Some(guard)
}

/// Main application loop.
async fn run_app<B: Backend + 'static>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    backend: Arc<B>,
    config: &ClientConfig,
) -> io::Result<()> {
    let mut app = App::new().with_date_format(&config.date_format);
    let (cmd_tx, mut evt_rx) = remote::spawn_stores(backend);

    loop {
        // Step 1: Draw the UI frame.
        terminal.draw(|frame| ui::draw(frame, &app))?;

        // Step 2: Drain all pending store events (non-blocking).
        while let Ok(event) = evt_rx.try_recv() {
            if let Some(follow_up) = app.apply_event(event) {
                dispatch(&mut app, &cmd_tx, follow_up);
            }
        }

        // Step 3: Poll for terminal input events.
        if event::poll(config.poll_timeout)?
            && let Event::Key(key) = event::read()?
        {
            if key.kind != KeyEventKind::Press {
                continue;
            }

            // handle_key_event returns Some(StoreCommand) when the action
            // needs a backend call (fetch, create, patch, sign out).
            if let Some(cmd) = app.handle_key_event(key) {
                dispatch(&mut app, &cmd_tx, cmd);
            }
        }

        if app.should_quit {
            let _ = cmd_tx.try_send(StoreCommand::Shutdown);
            return Ok(());
        }
    }
}

/// Send a command to the store worker, surfacing channel failure as a notice.
fn dispatch(app: &mut App, cmd_tx: &mpsc::Sender<StoreCommand>, cmd: StoreCommand) {
    match cmd_tx.try_send(cmd) {
        Ok(()) => {}
        Err(mpsc::error::TrySendError::Full(_)) => {
            app.notice = Some(zudio::app::Notice {
                text: "Backend busy, action dropped".to_string(),
                is_error: true,
            });
        }
        Err(mpsc::error::TrySendError::Closed(_)) => {
            app.notice = Some(zudio::app::Notice {
                text: "Store worker stopped".to_string(),
                is_error: true,
            });
        }
    }
}
