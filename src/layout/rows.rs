//! Row assembly: grouping loose text fragments into visual rows.
//!
//! PDF renderers emit table text as unordered positioned fragments whose
//! baselines jitter by fractions of a point within one visual line. This
//! module derives a per-page vertical tolerance from the fragments
//! themselves and bins fragments into rows with it, then orders rows by
//! vertical position and cells within a row by horizontal position.

use std::collections::HashMap;

use crate::fragment::TextFragment;

/// One cell of a reconstructed row.
///
/// `x` is fixed when the cell is created and anchors all later column
/// matching; `text` may grow by line-appending as continuation rows are
/// merged in.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    /// Cell text. Multi-line once continuations have been absorbed.
    pub text: String,
    /// Horizontal anchor, never updated after creation.
    pub x: f64,
}

impl Cell {
    /// Creates a cell at a fixed horizontal anchor.
    pub fn new(text: impl Into<String>, x: f64) -> Self {
        Self {
            text: text.into(),
            x,
        }
    }

    /// Appends another line of text to this cell.
    pub fn append_line(&mut self, text: &str) {
        self.text.push('\n');
        self.text.push_str(text);
    }
}

/// Fragments judged to lie on the same visual line of one page.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    /// Vertical anchor: the `y` of the fragment that opened the row.
    /// Not recomputed as more fragments join.
    pub y: f64,
    /// Cells in ascending `x` order once assembly has finished.
    pub cells: Vec<Cell>,
}

impl Row {
    /// Cell texts in column order, coordinates discarded.
    pub fn texts(&self) -> Vec<String> {
        self.cells.iter().map(|c| c.text.clone()).collect()
    }
}

/// Computes the adaptive row tolerance for one page of fragments.
///
/// Fragments sharing an exact X position belong to the same column, so
/// the smallest vertical gap between any two of them approximates one
/// line height. The page tolerance is the minimum such gap across all X
/// groups; it absorbs baseline jitter within a line while still
/// separating adjacent lines. Pages where no X value repeats get a
/// tolerance of zero.
pub fn page_tolerance(fragments: &[TextFragment]) -> f64 {
    let mut by_x: HashMap<u64, Vec<f64>> = HashMap::new();
    for frag in fragments {
        // Fold -0.0 into 0.0 so bit-keying agrees with `==` on X values.
        let x = if frag.x == 0.0 { 0.0 } else { frag.x };
        by_x.entry(x.to_bits()).or_default().push(frag.y);
    }

    let mut tolerance: Option<f64> = None;
    for ys in by_x.values() {
        for (i, a) in ys.iter().enumerate() {
            for b in &ys[i + 1..] {
                let gap = (a - b).abs();
                if tolerance.map_or(true, |t| gap < t) {
                    tolerance = Some(gap);
                }
            }
        }
    }
    tolerance.unwrap_or(0.0)
}

/// Assembles one page's fragments into ordered rows.
///
/// Fragments are processed in input order. Each fragment attaches to the
/// first existing row whose anchor lies strictly within the page
/// tolerance of the fragment's `y`, scanning the most recently created
/// row first; otherwise it opens a new row. The newest-first scan is a
/// deliberate tie-break that favors recently opened rows when tolerance
/// windows overlap, and it affects merge results on dense pages.
///
/// Every run of a fragment becomes its own cell at the fragment's `x`,
/// so internally multi-segment fragments survive as separate cells.
pub fn assemble_rows(fragments: &[TextFragment]) -> Vec<Row> {
    let tolerance = page_tolerance(fragments);
    let mut rows: Vec<Row> = Vec::new();

    for frag in fragments {
        let found = rows
            .iter()
            .rposition(|row| frag.y > row.y - tolerance && frag.y < row.y + tolerance);
        let idx = match found {
            Some(idx) => idx,
            None => {
                rows.push(Row {
                    y: frag.y,
                    cells: Vec::new(),
                });
                rows.len() - 1
            }
        };

        for run in &frag.runs {
            rows[idx].cells.push(Cell::new(run.clone(), frag.x));
        }
    }

    for row in &mut rows {
        // Stable: same-x cells keep encounter order.
        row.cells.sort_by(|a, b| a.x.total_cmp(&b.x));
    }
    rows.sort_by(|a, b| a.y.total_cmp(&b.y));

    rows
}
