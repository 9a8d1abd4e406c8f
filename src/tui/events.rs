//! Event handling for the TUI.
//!
//! Processes keyboard and terminal events using crossterm.

use crate::error::{AskError, Result};
use crossterm::event::{self, Event as CrosstermEvent, KeyEvent};
use std::time::Duration;

/// Application events.
#[derive(Debug)]
pub enum Event {
    /// A key was pressed.
    Key(KeyEvent),
    /// The terminal was resized.
    Resize(u16, u16),
    /// A periodic tick (for spinner animation).
    Tick,
}

/// Handles terminal events.
#[derive(Debug, Clone, Copy)]
pub struct EventHandler {
    /// Timeout for polling events.
    tick_rate: Duration,
}

impl EventHandler {
    /// Creates a new event handler with default tick rate.
    pub fn new() -> Self {
        Self {
            tick_rate: Duration::from_millis(100),
        }
    }

    /// Polls for the next event.
    ///
    /// Returns a `Tick` if no terminal event arrives within the tick rate,
    /// so the caller redraws at a steady pace while a request is pending.
    pub fn next(&self) -> Result<Option<Event>> {
        if event::poll(self.tick_rate)
            .map_err(|e| AskError::internal(format!("Failed to poll events: {e}")))?
        {
            let event = event::read()
                .map_err(|e| AskError::internal(format!("Failed to read event: {e}")))?;

            match event {
                CrosstermEvent::Key(key) => Ok(Some(Event::Key(key))),
                CrosstermEvent::Resize(width, height) => Ok(Some(Event::Resize(width, height))),
                _ => Ok(Some(Event::Tick)),
            }
        } else {
            Ok(Some(Event::Tick))
        }
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}
