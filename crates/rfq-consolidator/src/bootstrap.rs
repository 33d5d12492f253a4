use std::path::Path;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

// ── Logging bootstrap ──────────────────────────────────────────────────────────

/// Initialise the global `tracing` subscriber.
///
/// `log_level` is mapped to a [`tracing_subscriber::EnvFilter`] directive.
/// Falls back to `"info"` if the level string is not recognised.
pub fn setup_logging(log_level: &str) -> anyhow::Result<()> {
    // Accept the historical level names (tracing uses lowercase "warn").
    let upper = log_level.to_uppercase();
    let normalised = match upper.as_str() {
        "DEBUG" => "debug",
        "INFO" => "info",
        "WARNING" => "warn",
        "ERROR" => "error",
        other => other,
    };

    let filter = EnvFilter::try_new(normalised).unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = fmt::layer().with_target(false).with_thread_ids(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(subscriber)
        .init();

    Ok(())
}

// ── Output directory bootstrap ─────────────────────────────────────────────────

/// Ensure the output workbook's parent directory exists, creating any
/// missing levels. A bare filename writes to the working directory and
/// needs nothing created.
pub fn ensure_output_dir(output: &Path) -> anyhow::Result<()> {
    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    // ── test_ensure_output_dir ────────────────────────────────────────────────

    #[test]
    fn test_ensure_output_dir_creates_missing_parents() {
        let tmp = TempDir::new().expect("tempdir");
        let output = tmp.path().join("reports").join("q3").join("out.xlsx");

        ensure_output_dir(&output).expect("ensure_output_dir should succeed");

        assert!(output.parent().expect("parent").is_dir());
    }

    #[test]
    fn test_ensure_output_dir_accepts_bare_filename() {
        let output = PathBuf::from("out.xlsx");

        ensure_output_dir(&output).expect("bare filename needs no directories");
    }

    #[test]
    fn test_ensure_output_dir_accepts_existing_parent() {
        let tmp = TempDir::new().expect("tempdir");
        let output = tmp.path().join("out.xlsx");

        ensure_output_dir(&output).expect("existing parent is fine");

        assert!(tmp.path().is_dir());
    }
}
