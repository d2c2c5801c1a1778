//! Table reconstruction: merging assembled rows into logical records.
//!
//! Register PDFs present one logical record as a "key row" (the row whose
//! designated column holds an application number) followed by zero or
//! more wrapped continuation lines. The source renderer uses a fixed
//! column grid, so a continuation fragment's X reliably lines up with
//! the column it continues even though row heights vary. This module
//! scans rows in reading order, anchors a column grid at each key row,
//! and absorbs continuation rows into the nearest preceding key row by
//! X-position alignment.

use lazy_static::lazy_static;
use regex::Regex;

use crate::config::TableConfig;
use crate::fragment::Page;
use crate::layout::rows::{assemble_rows, Row};

lazy_static! {
    // Application numbers look like "17/67" or "17/1231": exactly two
    // digits, a slash, one to four digits. Anything looser starts
    // swallowing dates and lot numbers.
    static ref KEY_PATTERN: Regex = Regex::new(r"^\d{2}/\d{1,4}$").unwrap();
}

/// True when `value` (already trimmed by the caller) has the
/// application-number format that marks a key row.
pub fn is_key(value: &str) -> bool {
    KEY_PATTERN.is_match(value)
}

/// A flattened record: the cell texts of one key row in column order,
/// continuations already absorbed, coordinates discarded.
pub type Record = Vec<String>;

/// A continuation cell that lined up with no column of its key row.
///
/// Soft diagnostic: the cell's text is dropped from the output but the
/// record is otherwise unaffected.
#[derive(Debug, Clone, PartialEq)]
pub struct UnmatchedCell {
    /// Key-column value of the record that was being extended.
    pub record_key: String,
    /// Horizontal anchor of the orphaned cell.
    pub x: f64,
    /// The text that was dropped.
    pub text: String,
}

/// Result of reconstructing a document's table.
#[derive(Debug, Clone, Default)]
pub struct TableOutput {
    /// Records in the order their key rows were first encountered.
    pub records: Vec<Record>,
    /// Continuation cells dropped for want of a matching column.
    pub unmatched: Vec<UnmatchedCell>,
}

/// Reconstructs the logical table from a decoded document.
///
/// Pages are processed in order, rows within a page in ascending `y`.
/// Heading rows are skipped outright; key rows open a new record and fix
/// its column grid; every other row is treated as a continuation of the
/// current record (or silently ignored before the first key row). A
/// record may span a page break: page boundaries do not reset the
/// current key row.
pub fn reconstruct_table(pages: &[Page], config: &TableConfig) -> TableOutput {
    let mut key_rows: Vec<Row> = Vec::new();
    // Index into key_rows of the record currently absorbing
    // continuations, carried across page boundaries.
    let mut current: Option<usize> = None;
    let mut unmatched = Vec::new();

    for page in pages {
        for row in assemble_rows(&page.fragments) {
            if is_heading(&row, config) {
                continue;
            }

            if is_key_row(&row, config) {
                key_rows.push(row);
                current = Some(key_rows.len() - 1);
                continue;
            }

            let Some(owner_idx) = current else {
                // Preamble rows before the first key row carry no record.
                continue;
            };
            let owner = &mut key_rows[owner_idx];

            for cell in &row.cells {
                let target = owner
                    .cells
                    .iter_mut()
                    .find(|c| (c.x - cell.x).abs() < config.column_tolerance);
                match target {
                    Some(column) => column.append_line(&cell.text),
                    None => unmatched.push(UnmatchedCell {
                        record_key: owner.cells[config.key_column].text.clone(),
                        x: cell.x,
                        text: cell.text.clone(),
                    }),
                }
            }
        }
    }

    TableOutput {
        records: key_rows.iter().map(Row::texts).collect(),
        unmatched,
    }
}

/// Heading/noise rows (document titles, page footers, column headers)
/// never become key rows and never get absorbed.
fn is_heading(row: &Row, config: &TableConfig) -> bool {
    let Some(first) = row.cells.first() else {
        return false;
    };
    let text = first.text.trim();
    config
        .heading_prefixes
        .iter()
        .any(|prefix| text.starts_with(prefix.as_str()))
}

fn is_key_row(row: &Row, config: &TableConfig) -> bool {
    row.cells.len() >= config.min_cells
        && row
            .cells
            .get(config.key_column)
            .is_some_and(|cell| is_key(cell.text.trim()))
}
