//! Height-to-row location with clamping

use crate::table::BuildTableRow;

/// Find the table row that governs a height.
///
/// Exact matches win. A height below the table's shortest row clamps to that
/// row, above the tallest clamps to the tallest. Between rows the nearest
/// height wins; on a tie the shorter row is kept. Returns None only for an
/// empty table. Caller row order never matters.
pub fn find_row_for_height(height_inches: u32, table: &[BuildTableRow]) -> Option<&BuildTableRow> {
    if table.is_empty() {
        return None;
    }

    let mut sorted: Vec<&BuildTableRow> = table.iter().collect();
    sorted.sort_by_key(|row| row.height_inches);

    if let Some(&row) = sorted.iter().find(|row| row.height_inches == height_inches) {
        return Some(row);
    }

    let first = sorted[0];
    let last = sorted[sorted.len() - 1];
    if height_inches < first.height_inches {
        return Some(first);
    }
    if height_inches > last.height_inches {
        return Some(last);
    }

    let mut nearest = first;
    let mut best_diff = first.height_inches.abs_diff(height_inches);
    for &row in &sorted {
        let diff = row.height_inches.abs_diff(height_inches);
        // Strict comparison keeps the shorter row on equidistant heights
        if diff < best_diff {
            best_diff = diff;
            nearest = row;
        }
    }
    Some(nearest)
}
