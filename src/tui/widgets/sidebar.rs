//! Sidebar widget for the TUI.
//!
//! Displays the golden questions as a selectable list.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Sidebar widget for golden questions.
pub struct Sidebar<'a> {
    questions: &'a [String],
    selected: usize,
    focused: bool,
}

impl<'a> Sidebar<'a> {
    /// Creates a new sidebar widget.
    pub fn new(questions: &'a [String], selected: usize, focused: bool) -> Self {
        Self {
            questions,
            selected,
            focused,
        }
    }
}

impl Widget for Sidebar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(" Golden Questions ");

        let mut lines = Vec::new();
        if self.questions.is_empty() {
            lines.push(Line::from(Span::styled(
                "No golden questions configured",
                Style::default().fg(Color::DarkGray),
            )));
        }
        for (i, question) in self.questions.iter().enumerate() {
            let style = if self.focused && i == self.selected {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            lines.push(Line::from(Span::styled(
                format!("{}. {}", i + 1, question),
                style,
            )));
        }

        let paragraph = Paragraph::new(lines).block(block);
        paragraph.render(area, buf);
    }
}
