//! UI rendering for the TUI.
//!
//! Defines the layout and renders all UI components.

use super::app::{App, Focus};
use super::widgets::{chat, header, input, sidebar, toast};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};

/// Renders the entire UI.
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Main layout: header, content, input
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(3),    // Content (transcript + sidebar)
            Constraint::Length(3), // Input
        ])
        .split(area);

    let header_area = main_layout[0];
    let content_area = main_layout[1];
    let input_area = main_layout[2];

    // Content layout: transcript (70%) and sidebar (30%)
    let content_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(70), // Transcript
            Constraint::Percentage(30), // Golden questions
        ])
        .split(content_area);

    let chat_area = content_layout[0];
    let sidebar_area = content_layout[1];

    render_header(frame, header_area, app);
    render_transcript(frame, chat_area, app);
    render_sidebar(frame, sidebar_area, app);
    render_input(frame, input_area, app);
    render_toast(frame, area, app);
}

/// Renders the header bar.
fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let widget = header::Header::new(&app.backend_info, app.spinner.as_ref(), app.connected);
    frame.render_widget(widget, area);
}

/// Renders the conversation transcript.
fn render_transcript(frame: &mut Frame, area: Rect, app: &App) {
    let focused = app.focus == Focus::Transcript;
    let widget = chat::TranscriptPanel::new(&app.transcript, app.chat_scroll, focused);
    frame.render_widget(widget, area);
}

/// Renders the golden-question sidebar.
fn render_sidebar(frame: &mut Frame, area: Rect, app: &App) {
    let focused = app.focus == Focus::Sidebar;
    let widget = sidebar::Sidebar::new(&app.golden, app.sidebar_selected, focused);
    frame.render_widget(widget, area);
}

/// Renders the input bar.
fn render_input(frame: &mut Frame, area: Rect, app: &App) {
    let focused = app.focus == Focus::Input;
    let widget = input::InputBar::new(&app.input.text, app.input.cursor, focused);
    frame.render_widget(widget, area);

    // Position cursor in input field when focused
    if focused {
        let available_width = area.width.saturating_sub(5) as usize;
        let scroll = input::calculate_scroll_offset(app.input.cursor, available_width);
        // Account for border (1) and prompt "> " (2)
        let cursor_x = area.x + 1 + 2 + (app.input.cursor - scroll) as u16;
        let cursor_y = area.y + 1;
        frame.set_cursor_position((cursor_x, cursor_y));
    }
}

/// Renders the toast notification, if one is active.
fn render_toast(frame: &mut Frame, area: Rect, app: &App) {
    if let Some(state) = &app.toast {
        let toast_area = toast::Toast::area(area);
        frame.render_widget(toast::Toast::new(&state.message), toast_area);
    }
}
