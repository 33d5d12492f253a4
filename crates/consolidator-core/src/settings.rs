use clap::{CommandFactory, Parser};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{ConsolidateError, Result};
use crate::schema;

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Consolidate vendor RFQ spreadsheets into one master workbook
#[derive(Parser, Debug, Clone)]
#[command(
    name = "rfq-consolidator",
    about = "Consolidate vendor RFQ spreadsheets into one master workbook",
    version
)]
pub struct Settings {
    /// Folder scanned for vendor .xlsx submissions
    #[arg(long, default_value = ".")]
    pub input_dir: PathBuf,

    /// Output workbook path
    #[arg(long, default_value = schema::DEFAULT_OUTPUT_FILE)]
    pub output: PathBuf,

    /// Sheet read from each workbook
    #[arg(long, default_value = schema::MAPPED_SHEET)]
    pub sheet: String,

    /// Cell value that marks the true header row
    #[arg(long, default_value = schema::HEADER_MARKER)]
    pub marker: String,

    /// Number of leading rows scanned for the header marker
    #[arg(long, default_value_t = schema::DEFAULT_SCAN_ROWS)]
    pub scan_rows: usize,

    /// Where the manufacturer label is derived from
    #[arg(long, default_value = "filename", value_parser = ["filename", "index-sheet"])]
    pub manufacturer_from: String,

    /// Logging level
    #[arg(long, default_value = "info", value_parser = ["debug", "info", "warning", "error"])]
    pub log_level: String,

    /// Optional JSON config file; explicit CLI flags always win
    #[arg(long)]
    pub config: Option<PathBuf>,
}

// ── ManufacturerSource ─────────────────────────────────────────────────────────

/// Which of the two tagging variants a run uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManufacturerSource {
    /// First `-`-separated segment of the filename.
    Filename,
    /// Fixed cell on the auxiliary `Index` sheet.
    IndexSheet,
}

impl ManufacturerSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ManufacturerSource::Filename => "filename",
            ManufacturerSource::IndexSheet => "index-sheet",
        }
    }
}

impl FromStr for ManufacturerSource {
    type Err = ConsolidateError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "filename" => Ok(ManufacturerSource::Filename),
            "index-sheet" => Ok(ManufacturerSource::IndexSheet),
            _ => Err(ConsolidateError::InvalidManufacturerSource(s.to_string())),
        }
    }
}

// ── FileConfig ─────────────────────────────────────────────────────────────────

/// Optional JSON config file mirroring the CLI flags in snake_case.
///
/// Read from `~/.rfq-consolidator/config.json` by default, or from an
/// explicit `--config` path. Every field is optional; absent fields keep
/// their CLI/default values.
#[derive(Debug, Deserialize, Default, Clone)]
pub struct FileConfig {
    pub input_dir: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub sheet: Option<String>,
    pub marker: Option<String>,
    pub scan_rows: Option<usize>,
    pub manufacturer_from: Option<String>,
    pub log_level: Option<String>,
}

impl FileConfig {
    /// Default config path under the user's home directory.
    pub fn default_path() -> PathBuf {
        Self::default_path_in(&dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
    }

    /// Return the config path rooted at `base_dir` (used for testing).
    pub fn default_path_in(base_dir: &Path) -> PathBuf {
        base_dir.join(".rfq-consolidator").join("config.json")
    }

    /// Strict load for an explicitly supplied `--config` path: a missing or
    /// malformed file is an error.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Lenient load for the default path: an absent or malformed file is
    /// ignored and yields defaults.
    pub fn load_or_default(path: &Path) -> Self {
        let Ok(content) = std::fs::read_to_string(path) else {
            return Self::default();
        };
        serde_json::from_str(&content).unwrap_or_else(|err| {
            // Settings load precedes tracing setup, so this goes straight
            // to stderr.
            eprintln!("Ignoring malformed config at {}: {err}", path.display());
            Self::default()
        })
    }
}

// ── Settings impl ──────────────────────────────────────────────────────────────

impl Settings {
    /// Parse CLI arguments, merge config-file values where no explicit CLI
    /// value was provided, and validate the result.
    pub fn load() -> Result<Self> {
        Self::load_impl(std::env::args_os().collect(), &FileConfig::default_path())
    }

    /// Same as [`Settings::load`] but accepts an explicit argument list,
    /// enabling unit-testing without spawning subprocesses.
    pub fn load_from_args(args: Vec<std::ffi::OsString>) -> Result<Self> {
        Self::load_impl(args, &FileConfig::default_path())
    }

    /// Full implementation – accepts args and the default config path so
    /// that tests can redirect to a temporary directory.
    pub fn load_impl(
        args: Vec<std::ffi::OsString>,
        default_config_path: &Path,
    ) -> Result<Self> {
        // Build raw ArgMatches so we can query ValueSource.
        let matches = Settings::command().get_matches_from(args.clone());

        // Parse into the typed struct using the same args.
        let mut settings = Settings::parse_from(args);

        let file = match &settings.config {
            Some(path) => FileConfig::load_from(path)?,
            None => FileConfig::load_or_default(default_config_path),
        };

        // Merge config values for fields that were NOT explicitly set on the
        // command line (CLI always wins).
        // NOTE: clap stores the arg id using the *field name* (underscores),
        // not the long-flag spelling (hyphens).
        if !is_arg_explicitly_set(&matches, "input_dir") {
            if let Some(v) = file.input_dir {
                settings.input_dir = v;
            }
        }
        if !is_arg_explicitly_set(&matches, "output") {
            if let Some(v) = file.output {
                settings.output = v;
            }
        }
        if !is_arg_explicitly_set(&matches, "sheet") {
            if let Some(v) = file.sheet {
                settings.sheet = v;
            }
        }
        if !is_arg_explicitly_set(&matches, "marker") {
            if let Some(v) = file.marker {
                settings.marker = v;
            }
        }
        if !is_arg_explicitly_set(&matches, "scan_rows") {
            if let Some(v) = file.scan_rows {
                settings.scan_rows = v;
            }
        }
        if !is_arg_explicitly_set(&matches, "manufacturer_from") {
            if let Some(v) = file.manufacturer_from {
                settings.manufacturer_from = v;
            }
        }
        if !is_arg_explicitly_set(&matches, "log_level") {
            if let Some(v) = file.log_level {
                settings.log_level = v;
            }
        }

        settings.validate()?;
        Ok(settings)
    }

    /// Reject values the CLI parser cannot vouch for (config files bypass
    /// clap's value parsers).
    pub fn validate(&self) -> Result<()> {
        if self.scan_rows == 0 {
            return Err(ConsolidateError::Config(
                "scan-rows must be at least 1".to_string(),
            ));
        }
        ManufacturerSource::from_str(&self.manufacturer_from)?;
        if !matches!(
            self.log_level.as_str(),
            "debug" | "info" | "warning" | "error"
        ) {
            return Err(ConsolidateError::Config(format!(
                "invalid log level: {}",
                self.log_level
            )));
        }
        Ok(())
    }

    /// Typed view of the `--manufacturer-from` flag.
    pub fn manufacturer_source(&self) -> Result<ManufacturerSource> {
        ManufacturerSource::from_str(&self.manufacturer_from)
    }
}

// ── Helper: check if an arg was explicitly set on the command line ─────────────

/// Returns `true` when `name` was supplied explicitly on the command line
/// (not via default value or environment variable).
fn is_arg_explicitly_set(matches: &clap::ArgMatches, name: &str) -> bool {
    matches.value_source(name) == Some(clap::parser::ValueSource::CommandLine)
}

// ── Tests ──────────────────────────────────────────────────────────────────────
