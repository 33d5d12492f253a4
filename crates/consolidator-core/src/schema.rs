//! Fixed schema knowledge for vendor RFQ sheets.
//!
//! Everything here is mined from the RFQ submissions this tool consolidates:
//! the literal sheet and marker names, the canonical output column order, the
//! legacy header spellings vendors still ship, and the substring rules that
//! classify volume-style headers. The matching rules are deliberately exact
//! reproductions; loosening them changes which columns merge.

/// Sheet that carries the quoted items in every vendor workbook.
pub const MAPPED_SHEET: &str = "Mapped Sheet";

/// Optional auxiliary sheet naming the manufacturer.
pub const INDEX_SHEET: &str = "Index";

/// Cell (row, column) of the manufacturer name on [`INDEX_SHEET`], zero-based.
pub const INDEX_MANUFACTURER_CELL: (u32, u32) = (8, 0);

/// Literal cell value that identifies the true header row.
pub const HEADER_MARKER: &str = "M.Item Name";

/// Identifying column; rows without it are dropped.
pub const ITEM_NAME: &str = "M.Item Name";

/// Sheet name in the consolidated output workbook.
pub const OUTPUT_SHEET: &str = "Consolidated";

/// Default output workbook filename.
pub const DEFAULT_OUTPUT_FILE: &str = "consolidated_output.xlsx";

/// Default number of leading rows scanned for the header marker.
pub const DEFAULT_SCAN_ROWS: usize = 50;

/// Sentinel manufacturer label when the Index sheet yields nothing.
pub const UNKNOWN_MANUFACTURER: &str = "Unknown";

pub const MANUFACTURER: &str = "Manufacturer";
pub const THERAPY: &str = "Therapy";
pub const MFG_THERAPY_NAME: &str = "MFG Therapy Name";
pub const VOLUME: &str = "Volume";
pub const VOLUME_SHARE: &str = "Volume Share";

/// Output column order. Columns outside this list survive consolidation but
/// are appended after it.
pub const CANONICAL_COLUMNS: [&str; 24] = [
    "Manufacturer",
    "Hospital Name",
    "MFS",
    "Therapy",
    "Projected MFS Annual Qty Unit Level",
    "Form or Unit Type",
    "Volume Share",
    "Volume",
    "M.Item Name",
    "MFG Therapy Name",
    "Potential at Pack Level",
    "FORM OR UNIT TYPE BY AP",
    "UPP",
    "UPP BY AP",
    "MRP / Pack level",
    "Cost / Pack level",
    "MRP / Unit level",
    "Cost / Unit level",
    "GST%",
    "Quote Validity till date",
    "Scheme",
    "Scheme Validity till date",
    "Turn Over Discount",
    "TOD Validity till date",
];

/// Columns introduced by normalization rather than present verbatim in most
/// inputs; highlighted separately in the output header.
pub const DERIVED_COLUMNS: [&str; 4] = [
    "Projected MFS Annual Qty Unit Level",
    "Form or Unit Type",
    "Potential at Pack Level",
    "MFG Therapy Name",
];

/// Canonical columns whose merged values are coerced to numbers.
pub const NUMERIC_COLUMNS: [&str; 2] = [VOLUME, VOLUME_SHARE];

/// Exact-match renames for legacy header spellings, applied after trimming
/// and before synonym classification.
pub const LEGACY_RENAMES: [(&str, &str); 6] = [
    ("Amanta (Volume Share %)", VOLUME_SHARE),
    ("Amanta (Volume )", VOLUME),
    ("Projected MFS Annual Qty", "Projected MFS Annual Qty Unit Level"),
    (
        "Projected MFS Annual Qty at Unit level",
        "Projected MFS Annual Qty Unit Level",
    ),
    ("FORM OR UNIT TYPE", "Form or Unit Type"),
    ("Potential at pack", "Potential at Pack Level"),
];

/// Canonical target for a legacy header spelling, if one is registered.
pub fn legacy_rename(header: &str) -> Option<&'static str> {
    LEGACY_RENAMES
        .iter()
        .find(|(raw, _)| *raw == header)
        .map(|(_, canonical)| *canonical)
}

/// Classify a header into a volume synonym group by case-insensitive
/// substring match. "volume share" is checked first because every share
/// header also contains "volume".
pub fn classify_synonym(header: &str) -> Option<&'static str> {
    let lower = header.to_lowercase();
    if lower.contains("volume share") {
        Some(VOLUME_SHARE)
    } else if lower.contains("volume") {
        Some(VOLUME)
    } else {
        None
    }
}

pub fn is_canonical(name: &str) -> bool {
    CANONICAL_COLUMNS.contains(&name)
}

pub fn is_derived(name: &str) -> bool {
    DERIVED_COLUMNS.contains(&name)
}

pub fn is_numeric_canonical(name: &str) -> bool {
    NUMERIC_COLUMNS.contains(&name)
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── canonical layout ─────────────────────────────────────────────

    #[test]
    fn test_canonical_columns_shape() {
        assert_eq!(CANONICAL_COLUMNS.len(), 24);
        assert_eq!(CANONICAL_COLUMNS[0], MANUFACTURER);
        assert!(CANONICAL_COLUMNS.contains(&ITEM_NAME));
        assert!(CANONICAL_COLUMNS.contains(&VOLUME));
        assert!(CANONICAL_COLUMNS.contains(&VOLUME_SHARE));
    }

    #[test]
    fn test_volume_share_precedes_volume_in_output() {
        let share = CANONICAL_COLUMNS
            .iter()
            .position(|c| *c == VOLUME_SHARE)
            .expect("share column");
        let volume = CANONICAL_COLUMNS
            .iter()
            .position(|c| *c == VOLUME)
            .expect("volume column");
        assert!(share < volume);
    }

    #[test]
    fn test_derived_columns_are_canonical() {
        for name in DERIVED_COLUMNS {
            assert!(is_canonical(name), "{name} must be canonical");
        }
    }

    // ── legacy renames ───────────────────────────────────────────────

    #[test]
    fn test_legacy_rename_hits() {
        assert_eq!(legacy_rename("Amanta (Volume Share %)"), Some(VOLUME_SHARE));
        assert_eq!(legacy_rename("Amanta (Volume )"), Some(VOLUME));
        assert_eq!(
            legacy_rename("FORM OR UNIT TYPE"),
            Some("Form or Unit Type")
        );
        assert_eq!(
            legacy_rename("Projected MFS Annual Qty"),
            Some("Projected MFS Annual Qty Unit Level")
        );
    }

    #[test]
    fn test_legacy_rename_is_exact_match() {
        assert_eq!(legacy_rename("amanta (volume )"), None);
        assert_eq!(legacy_rename("Amanta (Volume)"), None);
        assert_eq!(legacy_rename("Volume"), None);
    }

    // ── synonym classification ───────────────────────────────────────

    #[test]
    fn test_classify_share_before_volume() {
        assert_eq!(classify_synonym("Volume Share"), Some(VOLUME_SHARE));
        assert_eq!(classify_synonym("Acme (VOLUME SHARE %)"), Some(VOLUME_SHARE));
        assert_eq!(classify_synonym("volume share 2024"), Some(VOLUME_SHARE));
    }

    #[test]
    fn test_classify_volume() {
        assert_eq!(classify_synonym("Volume"), Some(VOLUME));
        assert_eq!(classify_synonym("Total VOLUME (units)"), Some(VOLUME));
    }

    #[test]
    fn test_classify_unrelated_header() {
        assert_eq!(classify_synonym("Therapy"), None);
        assert_eq!(classify_synonym("GST%"), None);
        assert_eq!(classify_synonym(""), None);
    }
}
