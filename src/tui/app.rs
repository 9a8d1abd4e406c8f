//! Application state for the TUI.
//!
//! Contains the main App struct: focus, input editing, the transcript, the
//! golden-question sidebar, and the query session driving it all. Key events
//! come in through `handle_event`; when one produces a question to ask, the
//! accepted submission is handed back to the caller to run against the
//! backend.

use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::clipboard;
use super::widgets::spinner::Spinner;
use super::Event;
use crate::api::types::{AskResponse, ResultSet};
use crate::error::AskError;
use crate::session::{Outcome, QuerySession, Submission};

/// How long a toast notification stays on screen.
const TOAST_DURATION: Duration = Duration::from_secs(2);

/// Which panel currently has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Input,
    Transcript,
    Sidebar,
}

impl Focus {
    /// Cycles to the next focus panel.
    pub fn next(self) -> Self {
        match self {
            Self::Input => Self::Transcript,
            Self::Transcript => Self::Sidebar,
            Self::Sidebar => Self::Input,
        }
    }
}

/// One entry in the conversation transcript.
#[derive(Debug, Clone, PartialEq)]
pub enum TranscriptEntry {
    /// A question the user asked.
    Question(String),
    /// SQL generated by the backend.
    Sql(String),
    /// A result table.
    Table(ResultSet),
    /// An informational line (latency, help text, welcome).
    Info(String),
    /// An error line.
    Error(String),
}

/// Input state for text editing.
#[derive(Debug, Default)]
pub struct InputState {
    /// Current input text.
    pub text: String,
    /// Cursor position (character index).
    pub cursor: usize,
}

impl InputState {
    /// Creates a new empty input state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a character at the cursor position.
    pub fn insert(&mut self, c: char) {
        self.text.insert(self.byte_cursor(), c);
        self.cursor += 1;
    }

    /// Deletes the character before the cursor (backspace).
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            self.text.remove(self.byte_cursor());
        }
    }

    /// Deletes the character at the cursor (delete key).
    pub fn delete(&mut self) {
        if self.cursor < self.char_count() {
            self.text.remove(self.byte_cursor());
        }
    }

    /// Moves the cursor left.
    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Moves the cursor right.
    pub fn move_right(&mut self) {
        if self.cursor < self.char_count() {
            self.cursor += 1;
        }
    }

    /// Moves the cursor to the start of the input.
    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    /// Moves the cursor to the end of the input.
    pub fn move_end(&mut self) {
        self.cursor = self.char_count();
    }

    /// Clears the input and returns the previous text.
    pub fn take(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.text)
    }

    /// Clears the input without returning it.
    pub fn clear(&mut self) {
        self.cursor = 0;
        self.text.clear();
    }

    /// Returns true if the input is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    /// Byte offset of the cursor, for String::insert/remove.
    fn byte_cursor(&self) -> usize {
        self.text
            .char_indices()
            .nth(self.cursor)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len())
    }
}

/// A transient toast notification.
#[derive(Debug)]
pub struct ToastState {
    pub message: String,
    shown_at: Instant,
}

/// Main application state.
pub struct App {
    /// Whether the application is still running.
    pub running: bool,
    /// Current focus panel.
    pub focus: Focus,
    /// Input field state.
    pub input: InputState,
    /// The query session owning the latest outcome.
    pub session: QuerySession,
    /// Conversation transcript.
    pub transcript: Vec<TranscriptEntry>,
    /// Transcript scroll offset (lines from bottom).
    pub chat_scroll: usize,
    /// Golden questions shown in the sidebar.
    pub golden: Vec<String>,
    /// Selected sidebar entry.
    pub sidebar_selected: usize,
    /// Spinner shown while a request is in flight.
    pub spinner: Option<Spinner>,
    /// Active toast notification.
    pub toast: Option<ToastState>,
    /// Health probe result; None until the probe answers.
    pub connected: Option<bool>,
    /// Backend identity for the header.
    pub backend_info: String,
}

impl App {
    /// Creates a new App instance.
    pub fn new(backend_info: impl Into<String>, golden: Vec<String>) -> Self {
        let transcript = vec![TranscriptEntry::Info(
            "Ask a question about your database in plain language. Type /help for keys."
                .to_string(),
        )];

        Self {
            running: true,
            focus: Focus::default(),
            input: InputState::new(),
            session: QuerySession::new(),
            transcript,
            chat_scroll: 0,
            golden,
            sidebar_selected: 0,
            spinner: None,
            toast: None,
            connected: None,
            backend_info: backend_info.into(),
        }
    }

    /// Adds an entry to the transcript and scrolls to the bottom.
    pub fn add_entry(&mut self, entry: TranscriptEntry) {
        self.transcript.push(entry);
        self.chat_scroll = 0;
    }

    /// Clears the transcript and resets the session.
    pub fn clear_transcript(&mut self) {
        self.transcript.clear();
        self.chat_scroll = 0;
        self.session.reset();
        self.spinner = None;
    }

    /// Records the health probe result.
    pub fn set_health(&mut self, ok: bool) {
        self.connected = Some(ok);
    }

    /// Shows a toast notification.
    pub fn show_toast(&mut self, message: impl Into<String>) {
        self.toast = Some(ToastState {
            message: message.into(),
            shown_at: Instant::now(),
        });
    }

    /// Drops the toast once it has been on screen long enough.
    pub fn clear_expired_toast(&mut self) {
        if let Some(toast) = &self.toast {
            if toast.shown_at.elapsed() >= TOAST_DURATION {
                self.toast = None;
            }
        }
    }

    /// Handles an event. Returns a submission when the event produced a
    /// question to ask; the caller runs it against the backend and reports
    /// back through [`App::apply_completion`].
    pub fn handle_event(&mut self, event: Event) -> Option<Submission> {
        match event {
            Event::Key(key) => self.handle_key(key),
            // Resize is handled by ratatui on the next draw; ticks only
            // trigger a redraw for the spinner.
            Event::Resize(_, _) | Event::Tick => None,
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Option<Submission> {
        // Global shortcuts first
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('c') | KeyCode::Char('q') => {
                    self.running = false;
                    return None;
                }
                KeyCode::Char('l') => {
                    self.clear_transcript();
                    return None;
                }
                KeyCode::Char('y') => {
                    self.copy_latest_sql();
                    return None;
                }
                _ => {}
            }
        }

        if key.code == KeyCode::Tab {
            self.focus = self.focus.next();
            return None;
        }

        match self.focus {
            Focus::Input => self.handle_input_key(key),
            Focus::Transcript => {
                self.handle_transcript_key(key);
                None
            }
            Focus::Sidebar => self.handle_sidebar_key(key),
        }
    }

    /// Handles key events when the input line is focused.
    fn handle_input_key(&mut self, key: KeyEvent) -> Option<Submission> {
        match key.code {
            KeyCode::Char(c) => self.input.insert(c),
            KeyCode::Backspace => self.input.backspace(),
            KeyCode::Delete => self.input.delete(),
            KeyCode::Left => self.input.move_left(),
            KeyCode::Right => self.input.move_right(),
            KeyCode::Home => self.input.move_home(),
            KeyCode::End => self.input.move_end(),
            KeyCode::Esc => self.input.clear(),
            KeyCode::Enter => {
                let text = self.input.take();
                if let Some(command) = text.trim().strip_prefix('/') {
                    self.handle_command(command);
                    return None;
                }
                return self.submit_question(&text);
            }
            _ => {}
        }
        None
    }

    /// Handles key events when the transcript is focused.
    fn handle_transcript_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up => self.chat_scroll = self.chat_scroll.saturating_add(1),
            KeyCode::Down => self.chat_scroll = self.chat_scroll.saturating_sub(1),
            KeyCode::PageUp => self.chat_scroll = self.chat_scroll.saturating_add(10),
            KeyCode::PageDown => self.chat_scroll = self.chat_scroll.saturating_sub(10),
            KeyCode::Home => self.chat_scroll = usize::MAX, // Clamped during render
            KeyCode::End => self.chat_scroll = 0,
            _ => {}
        }
    }

    /// Handles key events when the sidebar is focused.
    fn handle_sidebar_key(&mut self, key: KeyEvent) -> Option<Submission> {
        match key.code {
            KeyCode::Up => {
                self.sidebar_selected = self.sidebar_selected.saturating_sub(1);
            }
            KeyCode::Down => {
                if self.sidebar_selected + 1 < self.golden.len() {
                    self.sidebar_selected += 1;
                }
            }
            KeyCode::Enter => {
                // A golden question goes through the same path as typed input
                if let Some(question) = self.golden.get(self.sidebar_selected).cloned() {
                    return self.submit_question(&question);
                }
            }
            _ => {}
        }
        None
    }

    /// Submits a question to the session. Whitespace-only input is a no-op.
    fn submit_question(&mut self, text: &str) -> Option<Submission> {
        let submission = self.session.submit(text)?;
        self.add_entry(TranscriptEntry::Question(submission.question.clone()));
        self.spinner = Some(Spinner::asking());
        Some(submission)
    }

    /// Handles a slash command typed into the input line.
    fn handle_command(&mut self, command: &str) {
        match command.trim() {
            "help" => {
                for line in [
                    "Enter submits, Tab cycles focus, arrows scroll and select.",
                    "Enter on a sidebar entry asks that golden question.",
                    "Ctrl+Y copies the latest SQL, Ctrl+L clears the transcript.",
                    "Commands: /help /clear /quit. Ctrl+C or Ctrl+Q quits.",
                ] {
                    self.transcript.push(TranscriptEntry::Info(line.to_string()));
                }
                self.chat_scroll = 0;
            }
            "clear" => self.clear_transcript(),
            "quit" => self.running = false,
            other => {
                self.add_entry(TranscriptEntry::Error(format!(
                    "Unknown command: /{}. Try /help.",
                    other
                )));
            }
        }
    }

    /// Applies a completed submission to the session and the transcript.
    ///
    /// Returns false when the completion was stale (superseded or after a
    /// reset); nothing is appended to the transcript in that case.
    pub fn apply_completion(
        &mut self,
        seq: u64,
        reply: Result<AskResponse, AskError>,
        elapsed: Duration,
    ) -> bool {
        if !self.session.complete(seq, reply, elapsed) {
            return false;
        }
        self.spinner = None;

        match self.session.outcome() {
            Outcome::Success(answer) => {
                let sql = answer.sql.clone();
                let result = answer.result.clone();
                let millis = answer.elapsed.as_millis();
                if !sql.is_empty() {
                    self.add_entry(TranscriptEntry::Sql(sql));
                }
                if let Some(result) = result {
                    self.add_entry(TranscriptEntry::Table(result));
                }
                self.add_entry(TranscriptEntry::Info(format!("Response time: {} ms", millis)));
            }
            Outcome::Failure(failure) => {
                let message = failure.message.clone();
                let millis = failure.elapsed.as_millis();
                self.add_entry(TranscriptEntry::Error(message));
                self.add_entry(TranscriptEntry::Info(format!("Response time: {} ms", millis)));
            }
            // complete() only transitions to Success or Failure
            Outcome::Idle | Outcome::Pending { .. } => {}
        }
        true
    }

    /// Copies the latest generated SQL to the clipboard.
    fn copy_latest_sql(&mut self) {
        let Some(sql) = self.session.latest_sql().map(str::to_string) else {
            self.show_toast("No SQL to copy");
            return;
        };
        match clipboard::copy(&sql) {
            Ok(()) => self.show_toast("SQL copied to clipboard"),
            Err(e) => self.show_toast(format!("Copy failed: {}", e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::Cell;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn ctrl(c: char) -> Event {
        Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_event(key(KeyCode::Char(c)));
        }
    }

    fn app() -> App {
        App::new(
            "http://localhost:8000",
            vec!["List customers".to_string(), "Show recent transactions".to_string()],
        )
    }

    fn response(sql: &str) -> AskResponse {
        AskResponse {
            sql: sql.to_string(),
            result: Some(ResultSet::with_data(
                vec!["n".to_string()],
                vec![vec![Cell::Int(1)]],
            )),
        }
    }

    #[test]
    fn test_input_insert_and_backspace() {
        let mut input = InputState::new();
        input.insert('h');
        input.insert('i');
        assert_eq!(input.text, "hi");
        assert_eq!(input.cursor, 2);

        input.backspace();
        assert_eq!(input.text, "h");
        assert_eq!(input.cursor, 1);
    }

    #[test]
    fn test_input_handles_multibyte_chars() {
        let mut input = InputState::new();
        for c in "İst".chars() {
            input.insert(c);
        }
        assert_eq!(input.text, "İst");
        assert_eq!(input.cursor, 3);

        input.move_left();
        input.delete();
        assert_eq!(input.text, "İs");
    }

    #[test]
    fn test_focus_cycle() {
        let focus = Focus::Input;
        assert_eq!(focus.next(), Focus::Transcript);
        assert_eq!(focus.next().next(), Focus::Sidebar);
        assert_eq!(focus.next().next().next(), Focus::Input);
    }

    #[test]
    fn test_enter_submits_typed_question() {
        let mut app = app();
        type_text(&mut app, "list customers");

        let submission = app.handle_event(key(KeyCode::Enter)).unwrap();
        assert_eq!(submission.question, "list customers");
        assert!(app.input.is_empty());
        assert!(app.session.is_pending());
        assert!(app.spinner.is_some());
        assert!(app
            .transcript
            .contains(&TranscriptEntry::Question("list customers".to_string())));
    }

    #[test]
    fn test_enter_on_whitespace_is_noop() {
        let mut app = app();
        type_text(&mut app, "   ");

        assert!(app.handle_event(key(KeyCode::Enter)).is_none());
        assert!(!app.session.is_pending());
        assert!(app.spinner.is_none());
    }

    #[test]
    fn test_sidebar_enter_submits_golden_question() {
        let mut app = app();
        app.handle_event(key(KeyCode::Tab)); // Transcript
        app.handle_event(key(KeyCode::Tab)); // Sidebar
        assert_eq!(app.focus, Focus::Sidebar);

        app.handle_event(key(KeyCode::Down));
        let submission = app.handle_event(key(KeyCode::Enter)).unwrap();
        assert_eq!(submission.question, "Show recent transactions");
    }

    #[test]
    fn test_sidebar_selection_stays_in_bounds() {
        let mut app = app();
        app.focus = Focus::Sidebar;

        app.handle_event(key(KeyCode::Up));
        assert_eq!(app.sidebar_selected, 0);

        for _ in 0..10 {
            app.handle_event(key(KeyCode::Down));
        }
        assert_eq!(app.sidebar_selected, app.golden.len() - 1);
    }

    #[test]
    fn test_completion_appends_sql_table_and_latency() {
        let mut app = app();
        type_text(&mut app, "list customers");
        let submission = app.handle_event(key(KeyCode::Enter)).unwrap();

        let applied = app.apply_completion(
            submission.seq,
            Ok(response("SELECT 1")),
            Duration::from_millis(42),
        );

        assert!(applied);
        assert!(app.spinner.is_none());
        assert!(app.transcript.contains(&TranscriptEntry::Sql("SELECT 1".to_string())));
        assert!(app
            .transcript
            .contains(&TranscriptEntry::Info("Response time: 42 ms".to_string())));
    }

    #[test]
    fn test_null_result_renders_no_table_and_no_error() {
        let mut app = app();
        type_text(&mut app, "q");
        let submission = app.handle_event(key(KeyCode::Enter)).unwrap();

        app.apply_completion(
            submission.seq,
            Ok(AskResponse {
                sql: "SELECT 1".to_string(),
                result: None,
            }),
            Duration::ZERO,
        );

        assert!(!app
            .transcript
            .iter()
            .any(|e| matches!(e, TranscriptEntry::Table(_))));
        assert!(!app
            .transcript
            .iter()
            .any(|e| matches!(e, TranscriptEntry::Error(_))));
    }

    #[test]
    fn test_failure_appends_error_line() {
        let mut app = app();
        type_text(&mut app, "bad");
        let submission = app.handle_event(key(KeyCode::Enter)).unwrap();

        app.apply_completion(
            submission.seq,
            Err(AskError::backend("syntax error")),
            Duration::from_millis(7),
        );

        assert!(app
            .transcript
            .contains(&TranscriptEntry::Error("syntax error".to_string())));
    }

    #[test]
    fn test_stale_completion_leaves_transcript_untouched() {
        let mut app = app();
        type_text(&mut app, "first");
        let first = app.handle_event(key(KeyCode::Enter)).unwrap();
        type_text(&mut app, "second");
        let second = app.handle_event(key(KeyCode::Enter)).unwrap();

        let before = app.transcript.len();
        assert!(!app.apply_completion(first.seq, Ok(response("SELECT 1")), Duration::ZERO));
        assert_eq!(app.transcript.len(), before);
        assert!(app.spinner.is_some());

        assert!(app.apply_completion(second.seq, Ok(response("SELECT 2")), Duration::ZERO));
        assert!(app.transcript.contains(&TranscriptEntry::Sql("SELECT 2".to_string())));
        assert!(!app.transcript.contains(&TranscriptEntry::Sql("SELECT 1".to_string())));
    }

    #[test]
    fn test_ctrl_l_clears_transcript_and_session() {
        let mut app = app();
        type_text(&mut app, "q");
        let submission = app.handle_event(key(KeyCode::Enter)).unwrap();
        app.apply_completion(submission.seq, Ok(response("SELECT 1")), Duration::ZERO);

        app.handle_event(ctrl('l'));
        assert!(app.transcript.is_empty());
        assert_eq!(app.session.outcome(), &Outcome::Idle);
    }

    #[test]
    fn test_ctrl_c_quits() {
        let mut app = app();
        app.handle_event(ctrl('c'));
        assert!(!app.running);
    }

    #[test]
    fn test_esc_clears_input() {
        let mut app = app();
        type_text(&mut app, "half a question");
        app.handle_event(key(KeyCode::Esc));
        assert!(app.input.is_empty());
    }

    #[test]
    fn test_quit_command() {
        let mut app = app();
        type_text(&mut app, "/quit");
        app.handle_event(key(KeyCode::Enter));
        assert!(!app.running);
    }

    #[test]
    fn test_unknown_command_reports_error() {
        let mut app = app();
        type_text(&mut app, "/frobnicate");
        assert!(app.handle_event(key(KeyCode::Enter)).is_none());
        assert!(app
            .transcript
            .iter()
            .any(|e| matches!(e, TranscriptEntry::Error(msg) if msg.contains("/frobnicate"))));
    }

    #[test]
    fn test_help_command_adds_info_lines() {
        let mut app = app();
        let before = app.transcript.len();
        type_text(&mut app, "/help");
        app.handle_event(key(KeyCode::Enter));
        assert!(app.transcript.len() > before);
        assert!(!app.session.is_pending());
    }

    #[test]
    fn test_toast_expires() {
        let mut app = app();
        app.show_toast("done");
        assert!(app.toast.is_some());

        app.toast.as_mut().unwrap().shown_at = Instant::now() - TOAST_DURATION;
        app.clear_expired_toast();
        assert!(app.toast.is_none());
    }

    #[test]
    fn test_health_updates_connection_state() {
        let mut app = app();
        assert_eq!(app.connected, None);
        app.set_health(true);
        assert_eq!(app.connected, Some(true));
    }
}
