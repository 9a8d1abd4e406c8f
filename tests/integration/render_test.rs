//! Rendering contract tests for the plain-text table renderer.

use nl_ask::api::types::{Cell, ResultSet};
use nl_ask::render::{render_lines, render_result, NO_ROWS_PLACEHOLDER};
use pretty_assertions::assert_eq;

fn result(columns: &[&str], rows: Vec<Vec<Cell>>) -> ResultSet {
    ResultSet::with_data(columns.iter().map(|c| c.to_string()).collect(), rows)
}

#[test]
fn test_no_columns_renders_nothing() {
    assert_eq!(render_result(&result(&[], vec![])), "");
}

#[test]
fn test_empty_rows_renders_spanning_placeholder() {
    let table = result(&["a", "b"], vec![]);
    let lines = render_lines(&table);

    // Header row, then a single placeholder row; no data rows
    assert_eq!(lines.len(), 5);
    assert!(lines[1].contains('a') && lines[1].contains('b'));

    let placeholder = &lines[3];
    assert!(placeholder.contains(NO_ROWS_PLACEHOLDER));
    let inner: String = placeholder
        .chars()
        .skip(1)
        .take(placeholder.chars().count() - 2)
        .collect();
    assert!(!inner.contains('│'), "placeholder must span both columns");
}

#[test]
fn test_cell_stringification_rules() {
    let table = result(
        &["a", "b", "c"],
        vec![vec![Cell::Int(1), Cell::Null, Cell::from("x")]],
    );
    let lines = render_lines(&table);

    assert_eq!(lines[3], "│ 1    │      │ x    │");
}

#[test]
fn test_primitive_forms() {
    assert_eq!(Cell::Int(1).to_display_string(), "1");
    assert_eq!(Cell::Null.to_display_string(), "");
    assert_eq!(Cell::from("x").to_display_string(), "x");
    assert_eq!(Cell::Bool(true).to_display_string(), "true");
    assert_eq!(Cell::Float(3.5).to_display_string(), "3.5");
}

#[test]
fn test_one_row_per_entry() {
    let table = result(
        &["n"],
        vec![
            vec![Cell::Int(1)],
            vec![Cell::Int(2)],
            vec![Cell::Int(3)],
        ],
    );
    let lines = render_lines(&table);

    // top border, header, separator, 3 rows, bottom border
    assert_eq!(lines.len(), 7);
}

#[test]
fn test_header_order_matches_columns() {
    let table = result(&["first", "second", "third"], vec![]);
    let lines = render_lines(&table);
    let header = &lines[1];

    let first = header.find("first").unwrap();
    let second = header.find("second").unwrap();
    let third = header.find("third").unwrap();
    assert!(first < second && second < third);
}
