//! Layout reconstruction: from loose positioned fragments to records.
//!
//! Two pure stages, run in order:
//! - row assembly groups a page's fragments into visual rows with an
//!   adaptive vertical tolerance;
//! - table reconstruction identifies key rows, anchors a column grid at
//!   each, and absorbs continuation rows by X alignment.

pub mod rows;
pub mod table;

// Re-export main types
pub use rows::{assemble_rows, page_tolerance, Cell, Row};
pub use table::{is_key, reconstruct_table, Record, TableOutput, UnmatchedCell};
