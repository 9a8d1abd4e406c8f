//! Result table widget for the TUI.
//!
//! Renders a backend result set as a bordered table with column headers.
//! Follows the same rendering rules as the plain-text renderer: no columns
//! means nothing is drawn, null cells are empty, and a column set with no
//! rows shows a single placeholder row spanning the table.

use crate::api::types::{Cell, ResultSet};
use crate::render::NO_ROWS_PLACEHOLDER;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

/// Maximum width for any column.
const MAX_COLUMN_WIDTH: usize = 40;

/// Minimum width for any column.
const MIN_COLUMN_WIDTH: usize = 4;

/// Widget for rendering a result set as a table.
pub struct ResultTable<'a> {
    result: &'a ResultSet,
}

impl<'a> ResultTable<'a> {
    /// Creates a new result table widget.
    pub fn new(result: &'a ResultSet) -> Self {
        Self { result }
    }

    /// Calculates the optimal width for each column.
    fn calculate_column_widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self
            .result
            .columns
            .iter()
            .map(|col| col.chars().count().max(MIN_COLUMN_WIDTH))
            .collect();

        for row in &self.result.rows {
            for (i, cell) in row.iter().enumerate() {
                if i < widths.len() {
                    widths[i] = widths[i].max(cell.to_display_string().chars().count());
                }
            }
        }

        widths.iter().map(|&w| w.min(MAX_COLUMN_WIDTH)).collect()
    }

    /// Truncates a string to fit within the given width, with an ellipsis.
    fn truncate(s: &str, max_width: usize) -> String {
        if s.chars().count() <= max_width {
            s.to_string()
        } else {
            let cut: String = s.chars().take(max_width.saturating_sub(1)).collect();
            format!("{}…", cut)
        }
    }

    /// Inner width of the table: cell areas plus interior dividers.
    fn span_width(widths: &[usize]) -> usize {
        widths.iter().map(|w| w + 2).sum::<usize>() + widths.len().saturating_sub(1)
    }

    /// Renders the table to a vector of Lines for embedding in the transcript.
    pub fn render_to_lines(&self) -> Vec<Line<'a>> {
        // No columns: nothing to draw, not even a border
        if self.result.columns.is_empty() {
            return Vec::new();
        }

        let mut widths = self.calculate_column_widths();
        if self.result.rows.is_empty() {
            Self::widen_for_placeholder(&mut widths);
        }

        let mut lines = Vec::new();
        lines.push(self.render_border(&widths, '┌', '┬', '┐'));
        lines.push(self.render_header_row(&widths));

        if self.result.rows.is_empty() {
            lines.push(self.render_border(&widths, '├', '┴', '┤'));
            lines.push(self.render_placeholder_row(&widths));
            lines.push(self.render_spanning_border(&widths));
        } else {
            lines.push(self.render_border(&widths, '├', '┼', '┤'));
            for row in &self.result.rows {
                lines.push(self.render_data_row(row, &widths));
            }
            lines.push(self.render_border(&widths, '└', '┴', '┘'));

            let footer = format!(
                "{} row{}",
                self.result.row_count(),
                if self.result.row_count() == 1 { "" } else { "s" },
            );
            lines.push(Line::from(Span::styled(
                footer,
                Style::default().fg(Color::DarkGray),
            )));
        }

        lines
    }

    /// Grows columns until the placeholder row fits in the table span.
    fn widen_for_placeholder(widths: &mut [usize]) {
        let needed = NO_ROWS_PLACEHOLDER.chars().count() + 2;
        let mut i = 0;
        while Self::span_width(widths) < needed {
            widths[i % widths.len()] += 1;
            i += 1;
        }
    }

    /// Renders a horizontal border line.
    fn render_border(&self, widths: &[usize], left: char, mid: char, right: char) -> Line<'a> {
        let mut border = String::new();
        border.push(left);
        for (i, &width) in widths.iter().enumerate() {
            border.push_str(&"─".repeat(width + 2));
            if i < widths.len() - 1 {
                border.push(mid);
            }
        }
        border.push(right);

        Line::from(Span::styled(border, Style::default().fg(Color::DarkGray)))
    }

    /// Renders the bottom border under the placeholder row.
    fn render_spanning_border(&self, widths: &[usize]) -> Line<'a> {
        let border = format!("└{}┘", "─".repeat(Self::span_width(widths)));
        Line::from(Span::styled(border, Style::default().fg(Color::DarkGray)))
    }

    /// Renders the header row with column names.
    fn render_header_row(&self, widths: &[usize]) -> Line<'a> {
        let mut spans = Vec::new();
        spans.push(Span::styled("│", Style::default().fg(Color::DarkGray)));

        for (i, col) in self.result.columns.iter().enumerate() {
            let width = widths.get(i).copied().unwrap_or(MIN_COLUMN_WIDTH);
            let name = Self::truncate(col, width);
            let padded = format!(" {:width$} ", name, width = width);

            spans.push(Span::styled(
                padded,
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::styled("│", Style::default().fg(Color::DarkGray)));
        }

        Line::from(spans)
    }

    /// Renders a data row. Missing cells render as empty, like nulls.
    fn render_data_row(&self, row: &[Cell], widths: &[usize]) -> Line<'a> {
        let mut spans = Vec::new();
        spans.push(Span::styled("│", Style::default().fg(Color::DarkGray)));

        for (i, width) in widths.iter().copied().enumerate() {
            let cell = row.get(i);
            let display = cell.map(Cell::to_display_string).unwrap_or_default();
            let truncated = Self::truncate(&display, width);
            let padded = format!(" {:width$} ", truncated, width = width);

            spans.push(Span::raw(padded));
            spans.push(Span::styled("│", Style::default().fg(Color::DarkGray)));
        }

        Line::from(spans)
    }

    /// Renders the placeholder row for a result set with no rows.
    fn render_placeholder_row(&self, widths: &[usize]) -> Line<'a> {
        let width = Self::span_width(widths) - 2;
        let mut spans = Vec::new();
        spans.push(Span::styled("│", Style::default().fg(Color::DarkGray)));
        spans.push(Span::styled(
            format!(" {:width$} ", NO_ROWS_PLACEHOLDER, width = width),
            Style::default().fg(Color::DarkGray),
        ));
        spans.push(Span::styled("│", Style::default().fg(Color::DarkGray)));
        Line::from(spans)
    }
}

impl Widget for ResultTable<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let lines = self.render_to_lines();

        for (i, line) in lines.iter().enumerate() {
            if i >= area.height as usize {
                break;
            }
            let y = area.y + i as u16;
            buf.set_line(area.x, y, line, area.width);
        }
    }
}
