//! Input discovery: which workbooks a run will consolidate.

use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use consolidator_core::{ConsolidateError, Result};

// ── Public API ──────────────────────────────────────────────────────────

/// Find `.xlsx` files directly inside `input_dir`, sorted by path.
///
/// Subfolders are not searched, and spreadsheet lock files (`~$` prefix)
/// are never candidates. A missing folder and a folder with no usable
/// files are distinct errors so callers can report them separately.
pub fn find_rfq_files(input_dir: &Path) -> Result<Vec<PathBuf>> {
    if !input_dir.is_dir() {
        return Err(ConsolidateError::InputDirMissing(input_dir.to_path_buf()));
    }

    let mut files: Vec<PathBuf> = WalkDir::new(input_dir)
        .max_depth(1)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            entry.file_type().is_file()
                && entry
                    .path()
                    .extension()
                    .map(|ext| ext == "xlsx")
                    .unwrap_or(false)
                && !entry.file_name().to_string_lossy().starts_with("~$")
        })
        .map(|entry| entry.into_path())
        .collect();

    files.sort();

    if files.is_empty() {
        return Err(ConsolidateError::NoInputFiles(input_dir.to_path_buf()));
    }

    debug!(
        "Found {} workbook(s) in {}",
        files.len(),
        input_dir.display()
    );
    Ok(files)
}

// ── Tests ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    use std::fs;

    use tempfile::TempDir;

    // Discovery never opens the files, so empty stand-ins are enough.
    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), b"").unwrap();
    }

    #[test]
    fn test_finds_xlsx_files_sorted() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "beta.xlsx");
        touch(dir.path(), "alpha.xlsx");
        touch(dir.path(), "gamma.xlsx");

        let files = find_rfq_files(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["alpha.xlsx", "beta.xlsx", "gamma.xlsx"]);
    }

    #[test]
    fn test_ignores_other_extensions() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "quotes.xlsx");
        touch(dir.path(), "notes.txt");
        touch(dir.path(), "legacy.xls");
        touch(dir.path(), "macro.xlsm");

        let files = find_rfq_files(dir.path()).unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("quotes.xlsx"));
    }

    #[test]
    fn test_skips_lock_files() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "vendor.xlsx");
        touch(dir.path(), "~$vendor.xlsx");

        let files = find_rfq_files(dir.path()).unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("vendor.xlsx"));
    }

    #[test]
    fn test_does_not_recurse_into_subfolders() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "top.xlsx");
        let nested = dir.path().join("archive");
        fs::create_dir(&nested).unwrap();
        touch(&nested, "old.xlsx");

        let files = find_rfq_files(dir.path()).unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("top.xlsx"));
    }

    #[test]
    fn test_missing_folder_is_an_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");

        let err = find_rfq_files(&missing).unwrap_err();
        assert!(matches!(err, ConsolidateError::InputDirMissing(_)));
    }

    #[test]
    fn test_folder_without_workbooks_is_an_error() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "readme.md");

        let err = find_rfq_files(dir.path()).unwrap_err();
        assert!(matches!(err, ConsolidateError::NoInputFiles(_)));
    }
}
