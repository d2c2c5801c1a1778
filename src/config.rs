//! Configuration for table reconstruction.

/// Layout parameters tying the reconstruction algorithm to one document
/// family.
///
/// The algorithm itself is layout-agnostic; which column holds the key,
/// how many cells a genuine record row carries, and which strings mark
/// heading noise are properties of the register being scraped, so they
/// live here rather than in the layout code. Defaults match the
/// development application register this crate targets.
#[derive(Debug, Clone)]
pub struct TableConfig {
    /// Index of the column whose cell must match the key format for a
    /// row to open a record.
    pub key_column: usize,
    /// Minimum number of cells a row needs to be considered a key row.
    pub min_cells: usize,
    /// Absolute X distance within which a continuation cell matches a
    /// key-row column.
    pub column_tolerance: f64,
    /// Rows whose first cell (trimmed) starts with any of these strings
    /// are skipped entirely.
    pub heading_prefixes: Vec<String>,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            key_column: 2,
            min_cells: 6,
            column_tolerance: 0.1,
            heading_prefixes: vec![
                "Development Application Register".to_string(),
                "Address".to_string(),
            ],
        }
    }
}

impl TableConfig {
    /// Sets the key column index.
    pub fn with_key_column(mut self, index: usize) -> Self {
        self.key_column = index;
        self
    }

    /// Sets the minimum cell count for key rows.
    pub fn with_min_cells(mut self, count: usize) -> Self {
        self.min_cells = count;
        self
    }

    /// Sets the column-matching tolerance.
    pub fn with_column_tolerance(mut self, tolerance: f64) -> Self {
        self.column_tolerance = tolerance;
        self
    }

    /// Replaces the heading prefix list.
    pub fn with_heading_prefixes(mut self, prefixes: Vec<String>) -> Self {
        self.heading_prefixes = prefixes;
        self
    }
}
