//! In-memory tabular model shared by every pipeline stage.
//!
//! A [`Table`] is a header list plus positional rows; a [`Cell`] is the
//! scalar payload of one row/column intersection. Stages mutate tables in
//! place between Load and Aggregation, so the representation stays plain.

use chrono::NaiveDateTime;

/// One scalar spreadsheet value.
///
/// Mirrors the cell kinds that actually occur in vendor RFQ sheets. Anything
/// unreadable collapses to `Empty` rather than erroring; malformed cells are
/// never surfaced to the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
    DateTime(NaiveDateTime),
}

impl Cell {
    /// True when the cell carries no usable value.
    ///
    /// Whitespace-only text and NaN numbers count as empty, matching how
    /// blank-looking cells behave in the sheets this tool ingests.
    pub fn is_empty(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.trim().is_empty(),
            Cell::Number(n) => n.is_nan(),
            Cell::Bool(_) | Cell::DateTime(_) => false,
        }
    }

    /// Coerce the cell to a number, or `None` if it has no numeric reading.
    ///
    /// Text parses after trimming; booleans coerce to 1.0 / 0.0; datetimes
    /// and NaN results do not coerce.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(n) if !n.is_nan() => Some(*n),
            Cell::Text(s) => s.trim().parse::<f64>().ok().filter(|n| !n.is_nan()),
            Cell::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            _ => None,
        }
    }

    /// Text rendering used when a cell value feeds a string field.
    pub fn as_text(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Text(s) => s.clone(),
            Cell::Number(n) => n.to_string(),
            Cell::Bool(b) => b.to_string(),
            Cell::DateTime(dt) => dt.to_string(),
        }
    }
}

/// An ordered header list plus rows of cells.
///
/// Column order matters only for output presentation. Rows are positional:
/// `rows[r][c]` belongs to `columns[c]`. The struct keeps its fields public
/// the way the rest of the data model does; the pipeline stages are the only
/// writers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn new(columns: Vec<String>) -> Self {
        Table {
            columns,
            rows: Vec::new(),
        }
    }

    /// Append a row, padding or truncating it to the current column count.
    pub fn push_row(&mut self, mut row: Vec<Cell>) {
        row.resize(self.columns.len(), Cell::Empty);
        self.rows.push(row);
    }

    /// Index of the first column with the given name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Append a column of empty cells if no column with this name exists.
    pub fn ensure_column(&mut self, name: &str) {
        if self.column_index(name).is_none() {
            self.columns.push(name.to_string());
            for row in &mut self.rows {
                row.push(Cell::Empty);
            }
        }
    }

    /// Remove the column at `index` from the header and every row.
    pub fn remove_column(&mut self, index: usize) {
        self.columns.remove(index);
        for row in &mut self.rows {
            row.remove(index);
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
