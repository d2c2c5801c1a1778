//! # da_register
//!
//! Extracts development application records from a council register
//! published as a PDF, and persists them idempotently into SQLite.
//!
//! The register lays each application out as one table row keyed by an
//! application number, with long cells wrapped onto continuation lines.
//! PDF text extraction flattens all of that into loose positioned
//! fragments; the heart of this crate rebuilds the logical table:
//!
//! - [`layout::rows`] bins fragments into visual rows using an adaptive
//!   per-page vertical tolerance;
//! - [`layout::table`] finds key rows, fixes a column grid at each, and
//!   merges continuation rows into their owning record by X alignment;
//! - [`record`] maps finished rows to typed [`record::Application`]s.
//!
//! The layout core is pure and synchronous: no I/O, no shared state,
//! deterministic for a given fragment sequence. Fetching ([`fetch`]),
//! PDF decoding ([`decode`]), and persistence ([`store`]) are boundary
//! modules wired together by [`scrape`].
//!
//! ## Quick start
//!
//! ```no_run
//! use std::path::Path;
//!
//! # #[tokio::main]
//! # async fn main() -> da_register::Result<()> {
//! let summary = da_register::scrape::run(Path::new("data.sqlite")).await?;
//! println!("{} new records", summary.records_inserted);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

// Error handling
pub mod error;

// Core layout reconstruction
pub mod config;
pub mod fragment;
pub mod layout;
pub mod record;

// Boundary collaborators
pub mod decode;
pub mod fetch;
pub mod scrape;
pub mod store;

pub use config::TableConfig;
pub use error::{Error, Result};
pub use fragment::{Page, TextFragment};
pub use layout::{assemble_rows, reconstruct_table, Cell, Record, Row, TableOutput};
pub use record::Application;
pub use store::RecordStore;
