//! The end-to-end consolidation run.
//!
//! Discovery, per-file processing, aggregation, and output writing in one
//! place. Per-file failures turn into skips so one bad vendor workbook
//! never sinks the batch; folder-level problems and output failures are
//! real errors.

use std::borrow::Cow;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use tracing::{info, warn};

use consolidator_core::normalize::{ColumnNormalizer, RowFilter};
use consolidator_core::settings::{ManufacturerSource, Settings};
use consolidator_core::table::Table;
use consolidator_core::{schema, ConsolidateError, Result};
use consolidator_xlsx::{paint_headers, write_workbook};

use crate::aggregate::TableAggregator;
use crate::{discovery, loader, manufacturer};

// ── Public API ──────────────────────────────────────────────────────────

/// What happened to one input file.
#[derive(Debug)]
pub enum FileOutcome {
    /// The file produced a normalized, tagged table.
    Processed { path: PathBuf, table: Table },
    /// The file was left out of the run, with the reason shown to the user.
    Skipped { path: PathBuf, reason: String },
}

/// What a finished run did, for reporting.
#[derive(Debug)]
pub struct RunSummary {
    pub processed_files: usize,
    pub skipped: Vec<(PathBuf, String)>,
    pub total_rows: usize,
    pub output_path: PathBuf,
    pub duration: Duration,
}

/// Run the whole pipeline: discover inputs, process each file, aggregate,
/// write the output workbook, and color its header row.
///
/// Progress is printed per file as it happens, so long batches stay
/// observable even without logging enabled.
pub fn run(settings: &Settings) -> Result<RunSummary> {
    let started = Instant::now();
    let source = settings.manufacturer_source()?;
    let files = discovery::find_rfq_files(&settings.input_dir)?;
    info!(
        "Consolidating {} file(s) from {}",
        files.len(),
        settings.input_dir.display()
    );

    let mut outcomes: Vec<FileOutcome> = Vec::new();
    for path in &files {
        let outcome = match process_file(path, settings, source) {
            Ok(table) => FileOutcome::Processed {
                path: path.clone(),
                table,
            },
            Err(err) => FileOutcome::Skipped {
                path: path.clone(),
                reason: err.to_string(),
            },
        };
        match &outcome {
            FileOutcome::Processed { path, table } => {
                println!("Processed {}: {} row(s)", file_label(path), table.row_count());
            }
            FileOutcome::Skipped { path, reason } => {
                println!("Skipped {}: {}", file_label(path), reason);
                warn!("Skipping {}: {}", path.display(), reason);
            }
        }
        outcomes.push(outcome);
    }

    let mut tables: Vec<Table> = Vec::new();
    let mut skipped: Vec<(PathBuf, String)> = Vec::new();
    for outcome in outcomes {
        match outcome {
            FileOutcome::Processed { table, .. } => tables.push(table),
            FileOutcome::Skipped { path, reason } => skipped.push((path, reason)),
        }
    }

    if tables.is_empty() {
        return Err(ConsolidateError::NoValidData);
    }

    let processed_files = tables.len();
    let combined = TableAggregator::aggregate(tables);
    let total_rows = combined.row_count();

    write_workbook(&combined, &settings.output, schema::OUTPUT_SHEET)?;
    paint_headers(&settings.output, schema::OUTPUT_SHEET)?;
    info!("Wrote {} row(s) to {}", total_rows, settings.output.display());

    Ok(RunSummary {
        processed_files,
        skipped,
        total_rows,
        output_path: settings.output.clone(),
        duration: started.elapsed(),
    })
}

/// Load, normalize, filter, and tag one input file.
///
/// The identifying column must survive normalization; a file that loses it
/// cannot contribute rows and is rejected here, before the filter silently
/// keeps everything.
pub fn process_file(
    path: &Path,
    settings: &Settings,
    source: ManufacturerSource,
) -> Result<Table> {
    let raw = loader::load_table(path, &settings.sheet, &settings.marker, settings.scan_rows)?;
    let mut table = ColumnNormalizer::normalize(raw);

    if table.column_index(schema::ITEM_NAME).is_none() {
        return Err(ConsolidateError::ItemColumnMissing {
            path: path.to_path_buf(),
            column: schema::ITEM_NAME.to_string(),
        });
    }

    ColumnNormalizer::backfill_canonical(&mut table);
    ColumnNormalizer::fill_therapy_from_mfg(&mut table);
    let mut table = RowFilter::retain_identified(table, schema::ITEM_NAME);

    let label = manufacturer::label_for(path, source);
    manufacturer::apply_label(&mut table, &label);
    Ok(table)
}

// ── Internal helpers ────────────────────────────────────────────────────

fn file_label(path: &Path) -> Cow<'_, str> {
    path.file_name()
        .map(|name| name.to_string_lossy())
        .unwrap_or_else(|| path.to_string_lossy())
}

// ── Tests ───────────────────────────────────────────────────────────────
