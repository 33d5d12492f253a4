//! Manufacturer label derivation and stamping.
//!
//! Every output row carries the manufacturer it came from. The label comes
//! either from the file name (vendors prefix their exports) or from a fixed
//! cell on the workbook's `Index` sheet. The lookup is best-effort: a file
//! that yields no label is tagged with the sentinel, never skipped.

use std::path::Path;

use calamine::{open_workbook, Data, Reader, Xlsx};
use tracing::debug;

use consolidator_core::schema;
use consolidator_core::settings::ManufacturerSource;
use consolidator_core::table::{Cell, Table};

// ── Public API ──────────────────────────────────────────────────────────

/// Derive the manufacturer label for one input file.
pub fn label_for(path: &Path, source: ManufacturerSource) -> String {
    match source {
        ManufacturerSource::Filename => from_filename(path),
        ManufacturerSource::IndexSheet => from_index_sheet(path),
    }
}

/// Filename variant: the first `-`-separated segment of the file stem,
/// trimmed. `Acme-RFQ-2024.xlsx` yields `Acme`; a stem without `-` is used
/// whole.
pub fn from_filename(path: &Path) -> String {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .and_then(|stem| stem.split('-').next())
        .map(|segment| segment.trim().to_string())
        .unwrap_or_else(|| schema::UNKNOWN_MANUFACTURER.to_string())
}

/// Index-sheet variant: a fixed cell on the `Index` sheet. Any failure to
/// read it falls back to the sentinel.
pub fn from_index_sheet(path: &Path) -> String {
    let Ok(mut workbook) = open_workbook::<Xlsx<_>, _>(path) else {
        debug!("Cannot open {} for its Index sheet", path.display());
        return schema::UNKNOWN_MANUFACTURER.to_string();
    };
    let Ok(range) = workbook.worksheet_range(schema::INDEX_SHEET) else {
        debug!("No readable Index sheet in {}", path.display());
        return schema::UNKNOWN_MANUFACTURER.to_string();
    };

    let label = match range.get_value(schema::INDEX_MANUFACTURER_CELL) {
        None | Some(Data::Empty) => String::new(),
        Some(Data::String(s)) => s.trim().to_string(),
        Some(other) => other.to_string().trim().to_string(),
    };
    if label.is_empty() {
        schema::UNKNOWN_MANUFACTURER.to_string()
    } else {
        label
    }
}

/// Stamp `label` onto every row's manufacturer cell, creating the column
/// when absent. Whatever the vendor put there is overwritten.
pub fn apply_label(table: &mut Table, label: &str) {
    table.ensure_column(schema::MANUFACTURER);
    if let Some(idx) = table.column_index(schema::MANUFACTURER) {
        for row in &mut table.rows {
            row[idx] = Cell::Text(label.to_string());
        }
    }
}

// ── Tests ───────────────────────────────────────────────────────────────
