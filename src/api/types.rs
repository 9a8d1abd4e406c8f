//! Wire types for the ask backend API.
//!
//! Defines the request and response bodies exchanged with the `/ask` endpoint.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Request body for `POST /ask`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AskRequest {
    /// The natural-language question, already trimmed.
    pub question: String,
}

impl AskRequest {
    /// Creates a request with the given question text.
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
        }
    }
}

/// Success response body from `POST /ask`.
///
/// The backend also echoes the question back; the client has no use for it,
/// so the field is not modeled and serde skips it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AskResponse {
    /// The SQL the backend generated for the question.
    #[serde(default)]
    pub sql: String,

    /// Rows produced by running the SQL, or `null` when the backend
    /// generated SQL without executing it.
    #[serde(default)]
    pub result: Option<ResultSet>,
}

/// A tabular result set: column names plus rows of primitive cells.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ResultSet {
    #[serde(default)]
    pub columns: Vec<String>,

    #[serde(default)]
    pub rows: Vec<Row>,
}

impl ResultSet {
    /// Creates a result set with the given columns and rows.
    pub fn with_data(columns: Vec<String>, rows: Vec<Row>) -> Self {
        Self { columns, rows }
    }

    /// Returns true if the result set has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of rows in the result set.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// A row of cells from a result set.
pub type Row = Vec<Cell>;

/// A single cell value: one of the JSON primitives, or null.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Cell {
    /// JSON null. Rendered as an empty string.
    #[default]
    Null,

    /// Boolean value.
    Bool(bool),

    /// Signed integer (up to i64).
    Int(i64),

    /// Floating point number.
    Float(f64),

    /// Text value.
    Text(String),
}

impl Cell {
    /// Returns true if this cell is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Cell::Null)
    }

    /// String form used for display. Null cells render as an empty string,
    /// everything else in its natural form.
    pub fn to_display_string(&self) -> String {
        match self {
            Cell::Null => String::new(),
            Cell::Bool(b) => b.to_string(),
            Cell::Int(i) => i.to_string(),
            Cell::Float(f) => f.to_string(),
            Cell::Text(s) => s.clone(),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_display_string())
    }
}

// Conversion implementations for common types
impl From<bool> for Cell {
    fn from(v: bool) -> Self {
        Cell::Bool(v)
    }
}

impl From<i32> for Cell {
    fn from(v: i32) -> Self {
        Cell::Int(v as i64)
    }
}

impl From<i64> for Cell {
    fn from(v: i64) -> Self {
        Cell::Int(v)
    }
}

impl From<f64> for Cell {
    fn from(v: f64) -> Self {
        Cell::Float(v)
    }
}

impl From<String> for Cell {
    fn from(v: String) -> Self {
        Cell::Text(v)
    }
}

impl From<&str> for Cell {
    fn from(v: &str) -> Self {
        Cell::Text(v.to_string())
    }
}

impl<T> From<Option<T>> for Cell
where
    T: Into<Cell>,
{
    fn from(v: Option<T>) -> Self {
        match v {
            Some(val) => val.into(),
            None => Cell::Null,
        }
    }
}

/// Failure response body (non-2xx), FastAPI style.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    /// Human-readable error message from the backend.
    pub detail: Option<String>,
}
