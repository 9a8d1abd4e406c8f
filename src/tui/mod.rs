//! Terminal User Interface for nl-ask.
//!
//! Provides the main TUI application loop using ratatui and crossterm. Each
//! submission runs as a spawned task that POSTs the question and reports back
//! over a channel, tagged with its sequence number; the loop feeds completions
//! into the app, which discards anything stale.

pub mod app;
pub mod clipboard;
mod events;
mod ui;
pub mod widgets;

pub use app::App;
pub use events::{Event, EventHandler};

use crate::api::types::AskResponse;
use crate::api::Backend;
use crate::error::{AskError, Result};
use crate::session::Submission;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::panic;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Messages sent from background tasks to the main loop.
#[derive(Debug)]
pub enum AsyncMessage {
    /// A submission's request resolved.
    Completed {
        seq: u64,
        reply: Result<AskResponse>,
        elapsed: Duration,
    },
    /// The startup health probe answered.
    Health(bool),
}

/// The main TUI application runner.
pub struct Tui {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    event_handler: EventHandler,
}

impl Tui {
    /// Creates a new TUI instance, initializing the terminal.
    pub fn new() -> Result<Self> {
        let terminal = Self::setup_terminal()?;
        let event_handler = EventHandler::new();

        // Initialize clipboard (non-fatal if it fails)
        if let Err(e) = clipboard::init() {
            warn!("Failed to initialize clipboard: {}", e);
        }

        Ok(Self {
            terminal,
            event_handler,
        })
    }

    /// Sets up the terminal for TUI rendering.
    fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
        enable_raw_mode()
            .map_err(|e| AskError::internal(format!("Failed to enable raw mode: {e}")))?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
            .map_err(|e| AskError::internal(format!("Failed to enter alternate screen: {e}")))?;

        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)
            .map_err(|e| AskError::internal(format!("Failed to create terminal: {e}")))?;

        Ok(terminal)
    }

    /// Restores the terminal to its original state.
    fn restore_terminal(&mut self) -> Result<()> {
        disable_raw_mode()
            .map_err(|e| AskError::internal(format!("Failed to disable raw mode: {e}")))?;

        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )
        .map_err(|e| AskError::internal(format!("Failed to leave alternate screen: {e}")))?;

        self.terminal
            .show_cursor()
            .map_err(|e| AskError::internal(format!("Failed to show cursor: {e}")))?;

        Ok(())
    }

    /// Runs the main TUI event loop.
    pub async fn run(
        &mut self,
        backend: Arc<dyn Backend>,
        golden: Vec<String>,
    ) -> Result<()> {
        // Set up panic hook to restore terminal on panic
        let original_hook = panic::take_hook();
        panic::set_hook(Box::new(move |panic_info| {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
            original_hook(panic_info);
        }));

        let mut app = App::new(backend.describe(), golden);

        // Channel for async messages
        let (tx, mut rx) = mpsc::channel::<AsyncMessage>(32);

        // Probe the backend once on startup; the result only drives the
        // header indicator and never blocks a submission.
        spawn_health_probe(Arc::clone(&backend), tx.clone());

        let result = self.run_event_loop(&mut app, backend, tx, &mut rx).await;

        // Restore panic hook
        let _ = panic::take_hook();

        result
    }

    /// The main event loop, separated for cleaner error handling.
    async fn run_event_loop(
        &mut self,
        app: &mut App,
        backend: Arc<dyn Backend>,
        tx: mpsc::Sender<AsyncMessage>,
        rx: &mut mpsc::Receiver<AsyncMessage>,
    ) -> Result<()> {
        loop {
            app.clear_expired_toast();

            self.terminal
                .draw(|frame| ui::render(frame, app))
                .map_err(|e| AskError::internal(format!("Failed to draw: {e}")))?;

            if !app.running {
                break;
            }

            let handler = self.event_handler;
            tokio::select! {
                // Terminal events, polled off the runtime thread
                event_result = tokio::task::spawn_blocking(move || handler.next()) => {
                    let event = event_result
                        .map_err(|e| AskError::internal(format!("Event task failed: {e}")))??;
                    if let Some(event) = event {
                        if let Some(submission) = app.handle_event(event) {
                            spawn_ask(Arc::clone(&backend), submission, tx.clone());
                        }
                    }
                }

                // Completions from background ask tasks
                Some(msg) = rx.recv() => {
                    self.handle_async_message(msg, app);
                }
            }
        }

        Ok(())
    }

    /// Handles an async message from a background task.
    fn handle_async_message(&mut self, msg: AsyncMessage, app: &mut App) {
        match msg {
            AsyncMessage::Completed {
                seq,
                reply,
                elapsed,
            } => {
                if !app.apply_completion(seq, reply, elapsed) {
                    debug!("Discarded stale completion for submission {}", seq);
                }
            }
            AsyncMessage::Health(ok) => {
                app.set_health(ok);
            }
        }
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        let _ = self.restore_terminal();
    }
}

/// Spawns the background task asking one question.
///
/// The completion carries the submission's sequence number so the app can
/// discard it if a newer submission has superseded it by the time it lands.
fn spawn_ask(backend: Arc<dyn Backend>, submission: Submission, tx: mpsc::Sender<AsyncMessage>) {
    tokio::spawn(async move {
        let started = Instant::now();
        let reply = backend.ask(&submission.question).await;
        let message = AsyncMessage::Completed {
            seq: submission.seq,
            reply,
            elapsed: started.elapsed(),
        };
        if tx.send(message).await.is_err() {
            debug!("TUI loop gone before submission {} resolved", submission.seq);
        }
    });
}

/// Spawns the startup health probe.
fn spawn_health_probe(backend: Arc<dyn Backend>, tx: mpsc::Sender<AsyncMessage>) {
    tokio::spawn(async move {
        let ok = backend.health().await.unwrap_or(false);
        let _ = tx.send(AsyncMessage::Health(ok)).await;
    });
}

/// Runs the TUI application against the given backend.
pub async fn run(backend: Arc<dyn Backend>, golden: Vec<String>) -> Result<()> {
    info!("Starting TUI against {}", backend.describe());
    let mut tui = Tui::new()?;
    tui.run(backend, golden).await
}
