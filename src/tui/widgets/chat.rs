//! Transcript panel widget for the TUI.
//!
//! Displays the conversation: questions, generated SQL, result tables,
//! latency lines, and errors.

use super::table::ResultTable;
use crate::tui::app::TranscriptEntry;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Transcript panel widget.
pub struct TranscriptPanel<'a> {
    entries: &'a [TranscriptEntry],
    /// Scroll offset in lines from the bottom.
    scroll: usize,
    focused: bool,
}

impl<'a> TranscriptPanel<'a> {
    /// Creates a new transcript panel widget.
    pub fn new(entries: &'a [TranscriptEntry], scroll: usize, focused: bool) -> Self {
        Self {
            entries,
            scroll,
            focused,
        }
    }

    /// Builds the display lines for all entries.
    fn build_lines(&self, width: usize) -> Vec<Line<'a>> {
        let mut lines = Vec::new();

        for entry in self.entries {
            match entry {
                TranscriptEntry::Question(text) => {
                    lines.push(Line::from(vec![
                        Span::styled(
                            "You ",
                            Style::default()
                                .fg(Color::Green)
                                .add_modifier(Modifier::BOLD),
                        ),
                        Span::styled("❯ ", Style::default().fg(Color::Green)),
                    ]));
                    for wrapped in wrap(text, width) {
                        lines.push(Line::from(Span::raw(wrapped)));
                    }
                    lines.push(Line::from(""));
                }
                TranscriptEntry::Sql(sql) => {
                    lines.push(Line::from(Span::styled(
                        "SQL",
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    )));
                    for sql_line in sql.lines() {
                        for wrapped in wrap(sql_line, width) {
                            lines.push(Line::from(Span::styled(
                                wrapped,
                                Style::default().fg(Color::Yellow),
                            )));
                        }
                    }
                    lines.push(Line::from(""));
                }
                TranscriptEntry::Table(result) => {
                    lines.extend(ResultTable::new(result).render_to_lines());
                    lines.push(Line::from(""));
                }
                TranscriptEntry::Info(text) => {
                    for wrapped in wrap(text, width) {
                        lines.push(Line::from(Span::styled(
                            wrapped,
                            Style::default().fg(Color::DarkGray),
                        )));
                    }
                }
                TranscriptEntry::Error(text) => {
                    for wrapped in wrap(&format!("Error: {}", text), width) {
                        lines.push(Line::from(Span::styled(
                            wrapped,
                            Style::default().fg(Color::Red),
                        )));
                    }
                    lines.push(Line::from(""));
                }
            }
        }

        lines
    }
}

impl Widget for TranscriptPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(" Conversation ");

        let inner_width = area.width.saturating_sub(2) as usize;
        let inner_height = area.height.saturating_sub(2) as usize;
        let lines = self.build_lines(inner_width.max(1));

        // Scroll offset is measured from the bottom; translate to a top
        // offset for the paragraph, keeping the latest lines in view.
        let total = lines.len();
        let max_scroll = total.saturating_sub(inner_height);
        let from_bottom = self.scroll.min(max_scroll);
        let top_offset = max_scroll - from_bottom;

        let paragraph = Paragraph::new(lines)
            .block(block)
            .scroll((top_offset as u16, 0));
        paragraph.render(area, buf);
    }
}

/// Wraps text to the given width on character boundaries.
fn wrap(text: &str, width: usize) -> Vec<String> {
    if text.is_empty() {
        return vec![String::new()];
    }
    let chars: Vec<char> = text.chars().collect();
    chars
        .chunks(width.max(1))
        .map(|chunk| chunk.iter().collect())
        .collect()
}
