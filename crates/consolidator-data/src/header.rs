//! Header-row location inside a mapped sheet.
//!
//! Vendor workbooks put titles, logos, and notes above the real header, so
//! the header is found by content, not by position: the first row whose
//! cells contain the marker text wins.

use calamine::{Data, Range};

// ── Public API ──────────────────────────────────────────────────────────

/// Find the first row (relative to the range) containing `marker`, comparing
/// trimmed string cells for exact equality. Scans at most `scan_rows` rows.
///
/// Only string cells can match; the marker is literal text in every vendor
/// template seen so far.
pub fn locate_header(range: &Range<Data>, marker: &str, scan_rows: usize) -> Option<usize> {
    for (idx, row) in range.rows().take(scan_rows).enumerate() {
        let hit = row.iter().any(|cell| match cell {
            Data::String(s) => s.trim() == marker,
            _ => false,
        });
        if hit {
            return Some(idx);
        }
    }
    None
}

/// How many rows a scan actually covered, for error reporting on short
/// sheets.
pub fn rows_scanned(range: &Range<Data>, scan_rows: usize) -> usize {
    scan_rows.min(range.height())
}

// ── Tests ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet(rows: Vec<Vec<&str>>) -> Range<Data> {
        let height = rows.len().max(1) as u32;
        let width = rows.iter().map(|r| r.len()).max().unwrap_or(1).max(1) as u32;
        let mut range = Range::new((0, 0), (height - 1, width - 1));
        for (r, row) in rows.iter().enumerate() {
            for (c, text) in row.iter().enumerate() {
                if !text.is_empty() {
                    range.set_value((r as u32, c as u32), Data::String(text.to_string()));
                }
            }
        }
        range
    }

    #[test]
    fn test_marker_on_first_row() {
        let range = sheet(vec![vec!["M.Item Name", "Volume"], vec!["Paracetamol", "5"]]);
        assert_eq!(locate_header(&range, "M.Item Name", 50), Some(0));
    }

    #[test]
    fn test_marker_below_preamble() {
        let range = sheet(vec![
            vec!["Quarterly RFQ"],
            vec![""],
            vec!["Vendor: Acme"],
            vec!["Therapy", "M.Item Name", "Volume"],
        ]);
        assert_eq!(locate_header(&range, "M.Item Name", 50), Some(3));
    }

    #[test]
    fn test_marker_cell_is_trimmed() {
        let range = sheet(vec![vec!["  M.Item Name  "]]);
        assert_eq!(locate_header(&range, "M.Item Name", 50), Some(0));
    }

    #[test]
    fn test_partial_match_does_not_count() {
        let range = sheet(vec![vec!["M.Item Name (old)"], vec!["M.Item Name"]]);
        assert_eq!(locate_header(&range, "M.Item Name", 50), Some(1));
    }

    #[test]
    fn test_missing_marker() {
        let range = sheet(vec![vec!["Item"], vec!["Product"]]);
        assert_eq!(locate_header(&range, "M.Item Name", 50), None);
    }

    #[test]
    fn test_scan_window_is_respected() {
        let range = sheet(vec![
            vec!["one"],
            vec!["two"],
            vec!["three"],
            vec!["M.Item Name"],
        ]);
        assert_eq!(locate_header(&range, "M.Item Name", 3), None);
        assert_eq!(locate_header(&range, "M.Item Name", 4), Some(3));
    }

    #[test]
    fn test_rows_scanned_caps_at_sheet_height() {
        let range = sheet(vec![vec!["a"], vec!["b"]]);
        assert_eq!(rows_scanned(&range, 50), 2);
        assert_eq!(rows_scanned(&range, 1), 1);
    }
}
