//! Cross-file aggregation and canonical column ordering.

use tracing::debug;

use consolidator_core::schema;
use consolidator_core::table::{Cell, Table};

/// Combines per-file tables into the single output table.
pub struct TableAggregator;

impl TableAggregator {
    // ── Public API ──────────────────────────────────────────────────────

    /// Concatenate all tables, then put columns in canonical order.
    pub fn aggregate(tables: Vec<Table>) -> Table {
        let combined = Self::concatenate(tables);
        Self::reorder_canonical(combined)
    }

    /// Schema-union concatenation. The union header holds every column name
    /// in first-seen order; rows from files that lack a column get empty
    /// cells there. Duplicate-named columns within one table share a single
    /// union slot, and the leftmost non-empty value wins.
    pub fn concatenate(tables: Vec<Table>) -> Table {
        let mut columns: Vec<String> = Vec::new();
        for table in &tables {
            for name in &table.columns {
                if !columns.iter().any(|existing| existing == name) {
                    columns.push(name.clone());
                }
            }
        }

        let mut combined = Table::new(columns);
        for table in tables {
            let slots: Vec<Option<usize>> = table
                .columns
                .iter()
                .map(|name| combined.column_index(name))
                .collect();
            for row in table.rows {
                let mut cells = vec![Cell::Empty; combined.column_count()];
                for (idx, cell) in row.into_iter().enumerate() {
                    if let Some(slot) = slots[idx] {
                        // Duplicate-named columns share a slot; keep the
                        // leftmost non-empty value.
                        if cells[slot].is_empty() {
                            cells[slot] = cell;
                        }
                    }
                }
                combined.rows.push(cells);
            }
        }

        debug!(
            "Concatenated into {} row(s) x {} column(s)",
            combined.row_count(),
            combined.column_count()
        );
        combined
    }

    /// Reorder columns to the canonical sequence. Canonical columns missing
    /// from the data are created empty so the output shape is stable;
    /// anything non-canonical is appended after the canonical block in
    /// first-seen order.
    pub fn reorder_canonical(table: Table) -> Table {
        let mut layout: Vec<(String, Option<usize>)> = schema::CANONICAL_COLUMNS
            .iter()
            .map(|name| (name.to_string(), table.column_index(name)))
            .collect();
        for (idx, name) in table.columns.iter().enumerate() {
            if !schema::is_canonical(name) {
                layout.push((name.clone(), Some(idx)));
            }
        }

        let mut out = Table::new(layout.iter().map(|(name, _)| name.clone()).collect());
        for row in &table.rows {
            let cells = layout
                .iter()
                .map(|(_, idx)| idx.map(|i| row[i].clone()).unwrap_or(Cell::Empty))
                .collect();
            out.rows.push(cells);
        }
        out
    }
}

// ── Tests ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn table(columns: &[&str], rows: Vec<Vec<Cell>>) -> Table {
        let mut t = Table::new(columns.iter().map(|c| c.to_string()).collect());
        for row in rows {
            t.push_row(row);
        }
        t
    }

    fn text(s: &str) -> Cell {
        Cell::Text(s.to_string())
    }

    // ── concatenation ──

    #[test]
    fn test_concatenate_unions_columns() {
        let a = table(
            &["M.Item Name", "Volume"],
            vec![vec![text("Aspirin"), Cell::Number(5.0)]],
        );
        let b = table(
            &["M.Item Name", "GST%"],
            vec![vec![text("Ibuprofen"), Cell::Number(18.0)]],
        );

        let combined = TableAggregator::concatenate(vec![a, b]);
        assert_eq!(combined.columns, vec!["M.Item Name", "Volume", "GST%"]);
        assert_eq!(combined.row_count(), 2);
        // Row from `a` has no GST% value, row from `b` no Volume.
        assert_eq!(combined.rows[0][2], Cell::Empty);
        assert_eq!(combined.rows[1][1], Cell::Empty);
        assert_eq!(combined.rows[1][2], Cell::Number(18.0));
    }

    #[test]
    fn test_concatenate_aligns_differing_column_orders() {
        let a = table(
            &["Volume", "M.Item Name"],
            vec![vec![Cell::Number(5.0), text("Aspirin")]],
        );
        let b = table(
            &["M.Item Name", "Volume"],
            vec![vec![text("Ibuprofen"), Cell::Number(7.0)]],
        );

        let combined = TableAggregator::concatenate(vec![a, b]);
        let vol = combined.column_index("Volume").unwrap();
        assert_eq!(combined.rows[0][vol], Cell::Number(5.0));
        assert_eq!(combined.rows[1][vol], Cell::Number(7.0));
    }

    #[test]
    fn test_concatenate_of_nothing_is_empty() {
        let combined = TableAggregator::concatenate(Vec::new());
        assert!(combined.is_empty());
        assert_eq!(combined.column_count(), 0);
    }

    #[test]
    fn test_concatenate_duplicate_columns_keep_leftmost_value() {
        // A table can still carry duplicate-named columns; they map to one
        // union slot and a trailing empty must not erase an earlier value.
        let t = table(
            &["M.Item Name", "UPP", "UPP"],
            vec![
                vec![text("Aspirin"), Cell::Number(500.0), Cell::Empty],
                vec![text("Ibuprofen"), Cell::Empty, Cell::Number(7.0)],
            ],
        );

        let combined = TableAggregator::concatenate(vec![t]);
        assert_eq!(combined.columns.iter().filter(|c| *c == "UPP").count(), 1);
        let upp = combined.column_index("UPP").unwrap();
        assert_eq!(combined.rows[0][upp], Cell::Number(500.0));
        assert_eq!(combined.rows[1][upp], Cell::Number(7.0));
    }

    // ── canonical ordering ──

    #[test]
    fn test_canonical_columns_come_first_in_order() {
        let t = table(
            &["GST%", "M.Item Name", "Manufacturer"],
            vec![vec![Cell::Number(18.0), text("Aspirin"), text("Acme")]],
        );

        let out = TableAggregator::reorder_canonical(t);
        assert_eq!(out.columns.len(), schema::CANONICAL_COLUMNS.len());
        assert_eq!(out.columns[0], schema::MANUFACTURER);
        let gst = out.column_index("GST%").unwrap();
        let item = out.column_index(schema::ITEM_NAME).unwrap();
        assert!(item < gst);
        assert_eq!(out.rows[0][item], text("Aspirin"));
    }

    #[test]
    fn test_missing_canonical_columns_are_created_empty() {
        let t = table(&["M.Item Name"], vec![vec![text("Aspirin")]]);

        let out = TableAggregator::reorder_canonical(t);
        assert_eq!(out.columns.len(), schema::CANONICAL_COLUMNS.len());
        let therapy = out.column_index(schema::THERAPY).unwrap();
        assert_eq!(out.rows[0][therapy], Cell::Empty);
    }

    #[test]
    fn test_extra_columns_follow_the_canonical_block() {
        let t = table(
            &["Vendor Notes", "M.Item Name", "Internal Ref"],
            vec![vec![text("call back"), text("Aspirin"), text("X-9")]],
        );

        let out = TableAggregator::reorder_canonical(t);
        let n = schema::CANONICAL_COLUMNS.len();
        assert_eq!(out.columns[n], "Vendor Notes");
        assert_eq!(out.columns[n + 1], "Internal Ref");
        assert_eq!(out.rows[0][n], text("call back"));
        assert_eq!(out.rows[0][n + 1], text("X-9"));
    }

    #[test]
    fn test_aggregate_keeps_every_identified_row() {
        let a = table(
            &["M.Item Name", "Volume"],
            vec![
                vec![text("Aspirin"), Cell::Number(5.0)],
                vec![text("Ibuprofen"), Cell::Number(7.0)],
            ],
        );
        let b = table(&["M.Item Name"], vec![vec![text("Paracetamol")]]);

        let out = TableAggregator::aggregate(vec![a, b]);
        assert_eq!(out.row_count(), 3);
        let item = out.column_index(schema::ITEM_NAME).unwrap();
        assert!(out.rows.iter().all(|row| !row[item].is_empty()));
    }
}
