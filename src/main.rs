//! newsreel — a paged news reader for the terminal.
//!
//! ## Architecture overview
//!
//! ```text
//! ┌───────────┐  snapshot  ┌──────────┐  draw()  ┌──────────┐
//! │ worker    │ ─────────► │  app.rs  │ ───────► │  ui.rs   │
//! │ (task)    │ ◄───────── │ (state)  │          │ (render) │
//! └───────────┘  Command   └──────────┘          └──────────┘
//!                              ▲
//!                              │ handle_key_event()
//!                         ┌──────────┐
//!                         │ input.rs │
//!                         └──────────┘
//! ```
//!
//! * **`newsreel`** (library) — article source, normalizer, store and the
//!   background worker.
//! * **`config`** — command-line flags.
//! * **`app`** — reader state (latest snapshot, selection, detail pane).
//! * **`ui`** — pure rendering: reads `App` state and draws widgets.
//! * **`input`** — maps key events to `App` mutations and store commands.
//! * **`main`** — wires everything together: parse args, set up logging,
//!   the runtime and the terminal, and run the event loop.

mod app;
mod config;
mod input;
mod ui;

use std::fs::File;
use std::io;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use app::App;
use config::Config;
use newsreel::worker::{self, Command, WorkerHandle};
use newsreel::{ArticleStore, HttpSource};

// ---------------------------------------------------------------------------
// RAII terminal guard — idiomatic cleanup even on panic
// ---------------------------------------------------------------------------

/// Manages terminal raw-mode and alternate-screen lifetime via [`Drop`].
///
/// Constructing this struct enters raw mode + alternate screen.  When the
/// value is dropped (normally or during stack unwinding) it restores the
/// terminal.
struct TerminalGuard {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalGuard {
    fn new() -> Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(Self { terminal })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

/// Restore the terminal before printing a panic message.
fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(info);
    }));
}

/// Send logs to `path`; stdout belongs to the UI.
fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "newsreel=info".into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .init();
    Ok(())
}

/// Hand a command to the worker and remember that a snapshot is owed.
fn dispatch(app: &mut App, worker: &WorkerHandle, command: Command) {
    if worker.send(command) {
        app.pending += 1;
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    let config = Config::parse();
    if let Some(path) = &config.log_file {
        init_logging(path)?;
    }
    info!(endpoint = %config.endpoint, page_size = config.page_size, "starting newsreel");

    install_panic_hook();

    // -- runtime, store and worker -------------------------------------------
    let runtime = tokio::runtime::Runtime::new().context("failed to start tokio runtime")?;
    let _enter = runtime.enter();

    let source = HttpSource::new(&config.endpoint, config.timeout())?;
    let store = Arc::new(ArticleStore::new(Arc::new(source), config.store_config()));
    let mut worker = worker::spawn(store);

    // -- terminal setup (RAII — Drop restores on exit or panic) --------------
    let mut guard = TerminalGuard::new()?;
    let mut app = App::new();
    dispatch(&mut app, &worker, Command::LoadPage { reset: true });

    // -- main event loop -----------------------------------------------------
    // Runs at ~10 fps (100 ms tick).  Each iteration:
    //   1. Drain any snapshots from the worker.
    //   2. Render the UI.
    //   3. Poll for keyboard input (non-blocking, up to tick_rate).
    let tick_rate = Duration::from_millis(100);

    loop {
        while let Some(snapshot) = worker.try_recv() {
            app.apply(snapshot);
        }

        guard.terminal.draw(|f| ui::draw(&mut app, f))?;

        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                if let Some(command) = input::handle_key_event(&mut app, key) {
                    dispatch(&mut app, &worker, command);
                }
            }
        }

        if app.quit {
            break;
        }
    }

    info!("newsreel exiting");
    Ok(())
}
