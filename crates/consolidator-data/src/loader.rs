//! Per-file workbook loading.
//!
//! One vendor workbook becomes one [`Table`]: the row carrying the header
//! marker supplies the column names and everything beneath it becomes data.

use std::path::Path;

use calamine::{open_workbook, Data, Range, Reader, Xlsx};
use tracing::debug;

use consolidator_core::table::{Cell, Table};
use consolidator_core::{ConsolidateError, Result};

use crate::header::{locate_header, rows_scanned};

// ── Public API ──────────────────────────────────────────────────────────

/// Read `sheet` of the workbook at `path` into a [`Table`], using the row
/// containing `marker` (within the first `scan_rows` rows) as the header.
pub fn load_table(path: &Path, sheet: &str, marker: &str, scan_rows: usize) -> Result<Table> {
    let mut workbook =
        open_workbook::<Xlsx<_>, _>(path).map_err(|e| ConsolidateError::WorkbookOpen {
            path: path.to_path_buf(),
            source: anyhow::Error::new(e),
        })?;

    let range = workbook
        .worksheet_range(sheet)
        .map_err(|e| ConsolidateError::SheetRead {
            path: path.to_path_buf(),
            sheet: sheet.to_string(),
            source: anyhow::Error::new(e),
        })?;

    let header_row = locate_header(&range, marker, scan_rows).ok_or_else(|| {
        ConsolidateError::HeaderNotFound {
            path: path.to_path_buf(),
            marker: marker.to_string(),
            scanned: rows_scanned(&range, scan_rows),
        }
    })?;

    let table = table_below_header(&range, header_row);
    debug!(
        "Loaded {} row(s) x {} column(s) from {} (header at sheet row {})",
        table.row_count(),
        table.column_count(),
        path.display(),
        header_row
    );
    Ok(table)
}

// ── Internal helpers ────────────────────────────────────────────────────

/// Build a table from the header row and everything beneath it. Header
/// names are taken raw; the normalizer cleans them later.
fn table_below_header(range: &Range<Data>, header_row: usize) -> Table {
    let (height, width) = range.get_size();

    let columns = (0..width)
        .map(|col| {
            range
                .get((header_row, col))
                .map(header_text)
                .unwrap_or_default()
        })
        .collect();

    let mut table = Table::new(columns);
    for row in (header_row + 1)..height {
        let cells = (0..width)
            .map(|col| {
                range
                    .get((row, col))
                    .map(data_to_cell)
                    .unwrap_or(Cell::Empty)
            })
            .collect();
        table.push_row(cells);
    }
    table
}

fn header_text(value: &Data) -> String {
    match value {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Convert a spreadsheet cell into the pipeline's cell model. Values that
/// cannot be represented collapse to `Empty`.
fn data_to_cell(value: &Data) -> Cell {
    match value {
        Data::Empty => Cell::Empty,
        Data::String(s) => Cell::Text(s.clone()),
        Data::Float(f) => Cell::Number(*f),
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Bool(b) => Cell::Bool(*b),
        Data::DateTime(dt) => dt.as_datetime().map(Cell::DateTime).unwrap_or(Cell::Empty),
        Data::DateTimeIso(s) => Cell::Text(s.clone()),
        Data::DurationIso(s) => Cell::Text(s.clone()),
        Data::Error(_) => Cell::Empty,
    }
}

// ── Tests ───────────────────────────────────────────────────────────────
