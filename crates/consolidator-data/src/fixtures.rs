//! Workbook fixtures shared by this crate's tests.

use std::path::Path;

use rust_xlsxwriter::Workbook;

use consolidator_core::schema;

/// One seeded cell: text, number, or blank.
pub enum Seed {
    T(&'static str),
    N(f64),
    B,
}

/// Write a workbook with the given sheets. `Seed::B` leaves the cell unset,
/// which readers later see as empty.
pub fn seed_workbook(path: &Path, sheets: Vec<(&str, Vec<Vec<Seed>>)>) {
    let mut workbook = Workbook::new();
    for (name, rows) in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(name).unwrap();
        for (r, row) in rows.iter().enumerate() {
            for (c, seed) in row.iter().enumerate() {
                match seed {
                    Seed::T(s) => {
                        worksheet.write(r as u32, c as u16, *s).unwrap();
                    }
                    Seed::N(n) => {
                        worksheet.write(r as u32, c as u16, *n).unwrap();
                    }
                    Seed::B => {}
                }
            }
        }
    }
    workbook.save(path).unwrap();
}

/// Convenience wrapper for the common single mapped-sheet case.
pub fn seed_mapped_sheet(path: &Path, rows: Vec<Vec<Seed>>) {
    seed_workbook(path, vec![(schema::MAPPED_SHEET, rows)]);
}
