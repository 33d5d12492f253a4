//! Serialization of the aggregated table into the output workbook.
//!
//! One sheet, headers in row 0, data rows below. Cells are written with
//! their native type; empty cells stay blank. Formatting is not applied
//! here; the post-format pass in [`crate::paint`] owns that.

use std::path::Path;

use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};

use consolidator_core::table::{Cell, Table};
use consolidator_core::{ConsolidateError, Result};

/// Number format applied to datetime cells so they render as dates.
pub(crate) const DATETIME_NUM_FORMAT: &str = "yyyy-mm-dd hh:mm:ss";

/// Write `table` to a fresh workbook at `path`, on a single sheet named
/// `sheet_name`.
pub fn write_workbook(table: &Table, path: &Path, sheet_name: &str) -> Result<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name(sheet_name)
        .map_err(|e| write_error(path, e))?;

    let datetime_format = Format::new().set_num_format(DATETIME_NUM_FORMAT);

    for (col_offset, name) in table.columns.iter().enumerate() {
        let col = col_index(path, col_offset)?;
        worksheet
            .write(0, col, name.as_str())
            .map_err(|e| write_error(path, e))?;
    }

    for (row_offset, row) in table.rows.iter().enumerate() {
        let row_idx = row_index(path, row_offset + 1)?;
        for (col_offset, cell) in row.iter().enumerate() {
            let col = col_index(path, col_offset)?;
            write_cell(worksheet, row_idx, col, cell, &datetime_format)
                .map_err(|e| write_error(path, e))?;
        }
    }

    workbook.save(path).map_err(|e| write_error(path, e))?;
    Ok(())
}

fn write_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    cell: &Cell,
    datetime_format: &Format,
) -> std::result::Result<(), XlsxError> {
    match cell {
        Cell::Empty => {}
        Cell::Text(s) => {
            worksheet.write(row, col, s.as_str())?;
        }
        Cell::Number(n) => {
            worksheet.write(row, col, *n)?;
        }
        Cell::Bool(b) => {
            worksheet.write(row, col, *b)?;
        }
        Cell::DateTime(dt) => {
            worksheet.write_datetime_with_format(row, col, dt, datetime_format)?;
        }
    }
    Ok(())
}

pub(crate) fn write_error(path: &Path, source: XlsxError) -> ConsolidateError {
    ConsolidateError::WorkbookWrite {
        path: path.to_path_buf(),
        source: anyhow::Error::new(source),
    }
}

pub(crate) fn row_index(path: &Path, row: usize) -> Result<u32> {
    u32::try_from(row).map_err(|_| ConsolidateError::WorkbookWrite {
        path: path.to_path_buf(),
        source: anyhow::anyhow!("row index {row} exceeds the xlsx row limit"),
    })
}

pub(crate) fn col_index(path: &Path, col: usize) -> Result<u16> {
    u16::try_from(col).map_err(|_| ConsolidateError::WorkbookWrite {
        path: path.to_path_buf(),
        source: anyhow::anyhow!("column index {col} exceeds the xlsx column limit"),
    })
}
