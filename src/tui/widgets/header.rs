//! Header widget for the TUI.
//!
//! Displays the application name, version, pending-request spinner, and the
//! backend connection indicator.

use super::spinner::Spinner;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Span,
    widgets::Widget,
};

/// Header bar widget.
pub struct Header<'a> {
    backend_info: &'a str,
    spinner: Option<&'a Spinner>,
    connected: Option<bool>,
}

impl<'a> Header<'a> {
    /// Creates a new header widget.
    pub fn new(backend_info: &'a str, spinner: Option<&'a Spinner>, connected: Option<bool>) -> Self {
        Self {
            backend_info,
            spinner,
            connected,
        }
    }
}

impl Widget for Header<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Fill background
        let style = Style::default()
            .bg(Color::Blue)
            .fg(Color::White)
            .add_modifier(Modifier::BOLD);

        for x in area.left()..area.right() {
            buf[(x, area.y)].set_style(style);
        }

        // Left side: app name and version
        let left_text = format!(" nl-ask v{}", env!("CARGO_PKG_VERSION"));
        let left_span = Span::styled(left_text, style);
        buf.set_span(area.x, area.y, &left_span, area.width);

        // Center: spinner while a request is in flight
        if let Some(spinner) = self.spinner {
            let spinner_text = spinner.display();
            let spinner_style = Style::default()
                .bg(Color::Blue)
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD);
            let spinner_width = spinner_text.chars().count() as u16;
            let spinner_x = area.x + (area.width.saturating_sub(spinner_width)) / 2;
            buf.set_string(spinner_x, area.y, &spinner_text, spinner_style);
        }

        // Right side: connection dot and backend info
        let (status_dot, status_color) = match self.connected {
            Some(true) => ("●", Color::Green),
            Some(false) => ("●", Color::Red),
            None => ("○", Color::Gray),
        };
        let status_style = Style::default().bg(Color::Blue).fg(status_color);

        let backend_text = format!(" [backend: {}] ", self.backend_info);
        let right_width = (backend_text.chars().count() + 2) as u16;
        if right_width < area.width {
            let right_x = area.right().saturating_sub(right_width);
            buf.set_string(right_x, area.y, " ", style);
            buf.set_string(right_x + 1, area.y, status_dot, status_style);
            buf.set_string(right_x + 2, area.y, &backend_text, style);
        }
    }
}
