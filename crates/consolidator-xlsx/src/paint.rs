//! Post-format pass over the already-written output workbook.
//!
//! Reopens the saved file, rewrites the sheet cell-for-cell, and applies the
//! category fill to each header: derived columns get the highlight color,
//! columns at or before `Volume` the lead color, columns after it the trail
//! color. Data cells keep their values. Failures here propagate; by this
//! point the data file already exists on disk.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use calamine::{open_workbook, Data, Reader, Xlsx};
use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};

use consolidator_core::schema;
use consolidator_core::{ConsolidateError, Result};

use crate::writer::{col_index, row_index, write_error, DATETIME_NUM_FORMAT};

/// Fill for derived/introduced columns.
const DERIVED_FILL: u32 = 0xFFFF00;
/// Fill for columns at or before the `Volume` column.
const LEAD_FILL: u32 = 0xFFD580;
/// Fill for columns after the `Volume` column.
const TRAIL_FILL: u32 = 0xC6EFCE;

/// Reopen the workbook at `path` and color the header row of `sheet_name`
/// by column category, saving in place.
pub fn paint_headers(path: &Path, sheet_name: &str) -> Result<()> {
    let mut workbook: Xlsx<BufReader<File>> =
        open_workbook(path).map_err(|e| ConsolidateError::WorkbookOpen {
            path: path.to_path_buf(),
            source: anyhow::Error::new(e),
        })?;
    let range = workbook
        .worksheet_range(sheet_name)
        .map_err(|e| ConsolidateError::SheetRead {
            path: path.to_path_buf(),
            sheet: sheet_name.to_string(),
            source: anyhow::Error::new(e),
        })?;

    let headers: Vec<String> = range
        .rows()
        .next()
        .map(|row| row.iter().map(header_text).collect())
        .unwrap_or_default();
    let volume_idx = headers.iter().position(|h| h == schema::VOLUME);

    let derived = Format::new().set_background_color(DERIVED_FILL);
    let lead = Format::new().set_background_color(LEAD_FILL);
    let trail = Format::new().set_background_color(TRAIL_FILL);
    let datetime_format = Format::new().set_num_format(DATETIME_NUM_FORMAT);

    let mut out = Workbook::new();
    let worksheet = out.add_worksheet();
    worksheet
        .set_name(sheet_name)
        .map_err(|e| write_error(path, e))?;

    for (col_offset, header) in headers.iter().enumerate() {
        let col = col_index(path, col_offset)?;
        let format = if schema::is_derived(header) {
            &derived
        } else {
            match volume_idx {
                Some(v) if col_offset <= v => &lead,
                Some(_) => &trail,
                None => &lead,
            }
        };
        worksheet
            .write_string_with_format(0, col, header, format)
            .map_err(|e| write_error(path, e))?;
    }

    for (row_offset, row) in range.rows().enumerate().skip(1) {
        let row_idx = row_index(path, row_offset)?;
        for (col_offset, value) in row.iter().enumerate() {
            let col = col_index(path, col_offset)?;
            rewrite_cell(worksheet, row_idx, col, value, &datetime_format)
                .map_err(|e| write_error(path, e))?;
        }
    }

    out.save(path).map_err(|e| write_error(path, e))?;
    Ok(())
}

fn header_text(value: &Data) -> String {
    match value {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn rewrite_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    value: &Data,
    datetime_format: &Format,
) -> std::result::Result<(), XlsxError> {
    match value {
        Data::Empty => {}
        Data::String(s) => {
            worksheet.write(row, col, s.as_str())?;
        }
        Data::Float(f) => {
            worksheet.write(row, col, *f)?;
        }
        Data::Int(i) => {
            worksheet.write(row, col, *i as f64)?;
        }
        Data::Bool(b) => {
            worksheet.write(row, col, *b)?;
        }
        Data::DateTime(dt) => {
            if let Some(ndt) = dt.as_datetime() {
                worksheet.write_datetime_with_format(row, col, &ndt, datetime_format)?;
            }
        }
        Data::DateTimeIso(s) | Data::DurationIso(s) => {
            worksheet.write(row, col, s.as_str())?;
        }
        Data::Error(_) => {}
    }
    Ok(())
}
