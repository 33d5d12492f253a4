//! Column normalization and row filtering policy.
//!
//! The rules here reproduce, exactly, the header unification the RFQ intake
//! process has always applied: trim, rename known legacy spellings, merge
//! volume-style synonym columns left to right, collapse headers that collide
//! after renaming, scale the share column to percent, and guarantee the
//! canonical output schema. Matching is kept byte-for-byte compatible with
//! the historical rules; loosening a substring or trim step silently changes
//! which vendor columns merge.

use regex::Regex;

use crate::schema;
use crate::table::{Cell, Table};

/// Round with half-up semantics: a fractional part of exactly one half
/// rounds upward, never to the nearest even value.
///
/// ```
/// use consolidator_core::normalize::round_half_up;
///
/// assert_eq!(round_half_up(12.5), 13.0);
/// assert_eq!(round_half_up(12.4), 12.0);
/// ```
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Header unification over a freshly loaded table.
///
/// Stateless; every method takes the table it rewrites. [`Self::normalize`]
/// applies the rename/merge/scale policy, [`Self::backfill_canonical`] and
/// [`Self::fill_therapy_from_mfg`] finish the canonical schema once the
/// caller has confirmed the identifying column survived.
pub struct ColumnNormalizer;

impl ColumnNormalizer {
    /// Apply the full header policy: trim, drop artifact columns, rename
    /// legacy spellings, merge synonym groups, collapse duplicate headers,
    /// scale the share column.
    pub fn normalize(mut table: Table) -> Table {
        Self::clean_headers(&mut table);
        Self::apply_legacy_renames(&mut table);
        Self::merge_synonym_groups(&mut table);
        Self::collapse_duplicate_columns(&mut table);
        Self::scale_volume_share(&mut table);
        table
    }

    /// Trim every header, then drop columns whose header is blank or an
    /// `Unnamed: N` export artifact.
    fn clean_headers(table: &mut Table) {
        for name in &mut table.columns {
            let trimmed = name.trim().to_string();
            *name = trimmed;
        }

        let unnamed = Regex::new(r"^Unnamed: \d+$").expect("regex is valid");
        let drop: Vec<usize> = table
            .columns
            .iter()
            .enumerate()
            .filter(|(_, name)| name.is_empty() || unnamed.is_match(name))
            .map(|(idx, _)| idx)
            .collect();
        for idx in drop.into_iter().rev() {
            table.remove_column(idx);
        }
    }

    fn apply_legacy_renames(table: &mut Table) {
        for name in &mut table.columns {
            if let Some(canonical) = schema::legacy_rename(name) {
                *name = canonical.to_string();
            }
        }
    }

    fn merge_synonym_groups(table: &mut Table) {
        for target in schema::NUMERIC_COLUMNS {
            Self::merge_into(table, target);
        }
    }

    /// Merge every column classified into `target` down to one canonical
    /// column: per row, the leftmost numeric value wins; non-numeric cells
    /// are passed over, never errors. Merged source columns are dropped, the
    /// canonical target never is.
    fn merge_into(table: &mut Table, target: &'static str) {
        let pool: Vec<usize> = table
            .columns
            .iter()
            .enumerate()
            .filter(|(_, name)| schema::classify_synonym(name) == Some(target))
            .map(|(idx, _)| idx)
            .collect();
        if pool.is_empty() {
            return;
        }

        let target_idx = pool
            .iter()
            .copied()
            .find(|&idx| table.columns[idx] == target)
            .unwrap_or(pool[0]);

        for row in &mut table.rows {
            let merged = pool.iter().find_map(|&idx| row[idx].as_number());
            row[target_idx] = match merged {
                Some(value) => Cell::Number(value),
                None => Cell::Empty,
            };
        }
        table.columns[target_idx] = target.to_string();

        for idx in pool.into_iter().rev() {
            if idx != target_idx {
                table.remove_column(idx);
            }
        }
    }

    /// Collapse columns that share one name down to the leftmost occurrence,
    /// merging values first-non-empty per row in pure column order. Legacy
    /// renames can map two headers onto the same canonical name, or onto a
    /// name the sheet already carries; the numeric groups are unified by
    /// [`Self::merge_synonym_groups`] before this runs, so any collision left
    /// here keeps its cells verbatim, without numeric coercion.
    fn collapse_duplicate_columns(table: &mut Table) {
        let mut col = 0;
        while col < table.columns.len() {
            let name = table.columns[col].clone();
            let pool: Vec<usize> = table
                .columns
                .iter()
                .enumerate()
                .filter(|(_, n)| **n == name)
                .map(|(idx, _)| idx)
                .collect();
            if pool.len() > 1 {
                for row in &mut table.rows {
                    let merged = pool
                        .iter()
                        .map(|&idx| &row[idx])
                        .find(|cell| !cell.is_empty())
                        .cloned();
                    row[col] = merged.unwrap_or(Cell::Empty);
                }
                for idx in pool.into_iter().rev() {
                    if idx != col {
                        table.remove_column(idx);
                    }
                }
            }
            col += 1;
        }
    }

    /// Convert the share column from a fraction to a whole percentage,
    /// rounding half-up. Runs once; the value written here is final.
    fn scale_volume_share(table: &mut Table) {
        let Some(idx) = table.column_index(schema::VOLUME_SHARE) else {
            return;
        };
        for row in &mut table.rows {
            if let Cell::Number(value) = row[idx] {
                row[idx] = Cell::Number(round_half_up(value * 100.0));
            }
        }
    }

    /// Append any canonical column the table does not already have.
    pub fn backfill_canonical(table: &mut Table) {
        for name in schema::CANONICAL_COLUMNS {
            table.ensure_column(name);
        }
    }

    /// Fill empty `Therapy` cells from `MFG Therapy Name` on the same row.
    pub fn fill_therapy_from_mfg(table: &mut Table) {
        let (Some(therapy), Some(mfg)) = (
            table.column_index(schema::THERAPY),
            table.column_index(schema::MFG_THERAPY_NAME),
        ) else {
            return;
        };
        for row in &mut table.rows {
            if row[therapy].is_empty() && !row[mfg].is_empty() {
                row[therapy] = row[mfg].clone();
            }
        }
    }
}

/// Row-level filtering on the identifying column.
pub struct RowFilter;

impl RowFilter {
    /// Keep only rows whose cell in `column` is non-empty after trimming.
    /// A table without that column is returned unchanged; the caller decides
    /// whether that is an error.
    pub fn retain_identified(mut table: Table, column: &str) -> Table {
        let Some(idx) = table.column_index(column) else {
            return table;
        };
        table.rows.retain(|row| !row[idx].is_empty());
        table
    }
}
