//! Plain-text result table rendering.
//!
//! Used by the one-shot runner to print result sets to stdout. The TUI has
//! its own widget with the same cell rules (see `tui::widgets::table`).

use crate::api::types::ResultSet;

/// Maximum width for a single column before truncation.
const MAX_COLUMN_WIDTH: usize = 40;

/// Minimum width for a column.
const MIN_COLUMN_WIDTH: usize = 4;

/// Body text when the result set has columns but no rows.
pub const NO_ROWS_PLACEHOLDER: &str = "No rows returned.";

/// Renders a result set as a bordered text table.
///
/// A result set without columns renders as nothing at all. A result set with
/// columns but no rows renders a single placeholder row spanning the full
/// table width.
pub fn render_result(result: &ResultSet) -> String {
    render_lines(result).join("\n")
}

/// Renders a result set as individual lines.
pub fn render_lines(result: &ResultSet) -> Vec<String> {
    if result.columns.is_empty() {
        return Vec::new();
    }

    let mut widths = calculate_column_widths(result);
    if result.rows.is_empty() {
        widen_for_placeholder(&mut widths);
    }

    let mut lines = Vec::new();
    lines.push(border(&widths, '┌', '┬', '┐'));
    lines.push(text_row(
        &widths,
        &result.columns.iter().map(String::as_str).collect::<Vec<_>>(),
    ));

    if result.rows.is_empty() {
        // Close the column dividers and span the placeholder across the table
        lines.push(border(&widths, '├', '┴', '┤'));
        lines.push(placeholder_row(&widths));
        lines.push(spanning_border(&widths, '└', '┘'));
    } else {
        lines.push(border(&widths, '├', '┼', '┤'));
        for row in &result.rows {
            let cells: Vec<String> = (0..result.columns.len())
                .map(|i| row.get(i).map(|c| c.to_display_string()).unwrap_or_default())
                .collect();
            lines.push(text_row(
                &widths,
                &cells.iter().map(String::as_str).collect::<Vec<_>>(),
            ));
        }
        lines.push(border(&widths, '└', '┴', '┘'));
    }

    lines
}

/// Computes per-column widths from header and cell content.
fn calculate_column_widths(result: &ResultSet) -> Vec<usize> {
    result
        .columns
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let mut width = name.chars().count();
            for row in &result.rows {
                if let Some(cell) = row.get(i) {
                    width = width.max(cell.to_display_string().chars().count());
                }
            }
            width.clamp(MIN_COLUMN_WIDTH, MAX_COLUMN_WIDTH)
        })
        .collect()
}

/// Inner width of the table: cell areas plus interior dividers.
fn span_width(widths: &[usize]) -> usize {
    widths.iter().map(|w| w + 2).sum::<usize>() + widths.len().saturating_sub(1)
}

/// Grows columns until the placeholder row fits in the table span.
fn widen_for_placeholder(widths: &mut [usize]) {
    let needed = NO_ROWS_PLACEHOLDER.chars().count() + 2;
    let mut i = 0;
    while span_width(widths) < needed {
        widths[i % widths.len()] += 1;
        i += 1;
    }
}

/// Builds a horizontal border line with per-column joints.
fn border(widths: &[usize], left: char, joint: char, right: char) -> String {
    let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
    format!("{}{}{}", left, segments.join(&joint.to_string()), right)
}

/// Builds a horizontal border line spanning the full table width.
fn spanning_border(widths: &[usize], left: char, right: char) -> String {
    format!("{}{}{}", left, "─".repeat(span_width(widths)), right)
}

/// Builds one table row from cell texts, truncating to column widths.
fn text_row(widths: &[usize], cells: &[&str]) -> String {
    let padded: Vec<String> = widths
        .iter()
        .zip(cells.iter())
        .map(|(w, cell)| format!(" {:<width$} ", truncate(cell, *w), width = w))
        .collect();
    format!("│{}│", padded.join("│"))
}

/// Builds the placeholder row spanning the full table width.
fn placeholder_row(widths: &[usize]) -> String {
    let width = span_width(widths) - 2;
    format!("│ {:<width$} │", NO_ROWS_PLACEHOLDER, width = width)
}

/// Truncates text to the given width, appending an ellipsis when cut.
fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let cut: String = text.chars().take(width.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}
