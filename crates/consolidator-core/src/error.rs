use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the RFQ consolidator.
#[derive(Error, Debug)]
pub enum ConsolidateError {
    /// A workbook could not be opened at all.
    #[error("Failed to open workbook {path}: {source}")]
    WorkbookOpen {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    /// A workbook opened but the requested sheet could not be read.
    #[error("Failed to read sheet '{sheet}' from {path}: {source}")]
    SheetRead {
        path: PathBuf,
        sheet: String,
        #[source]
        source: anyhow::Error,
    },

    /// The header marker was not found within the scan window.
    #[error("Header marker '{marker}' not found in the first {scanned} rows of {path}")]
    HeaderNotFound {
        path: PathBuf,
        marker: String,
        scanned: usize,
    },

    /// The identifying item column vanished during normalization.
    #[error("Identifying column '{column}' missing after normalization in {path}")]
    ItemColumnMissing { path: PathBuf, column: String },

    /// The configured input folder does not exist.
    #[error("Input folder does not exist: {0}")]
    InputDirMissing(PathBuf),

    /// No spreadsheet files were found under the input folder.
    #[error("No .xlsx files found in {0}")]
    NoInputFiles(PathBuf),

    /// Every input file was skipped; there is nothing to write.
    #[error("No valid data found in any input file")]
    NoValidData,

    /// The output workbook could not be written or re-saved.
    #[error("Failed to write workbook {path}: {source}")]
    WorkbookWrite {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    /// A manufacturer-source name is not one of the recognised modes.
    #[error("Invalid manufacturer source: {0}")]
    InvalidManufacturerSource(String),

    /// A JSON document could not be parsed.
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ConsolidateError {
    /// True for the run-level failures that end a run early with a message
    /// instead of a nonzero exit (missing folder, nothing to process).
    pub fn is_global(&self) -> bool {
        matches!(
            self,
            ConsolidateError::InputDirMissing(_)
                | ConsolidateError::NoInputFiles(_)
                | ConsolidateError::NoValidData
        )
    }
}

/// Convenience alias used throughout the consolidator crates.
pub type Result<T> = std::result::Result<T, ConsolidateError>;
