//! Mapping reconstructed table rows to typed application records.

use chrono::NaiveDate;
use serde::Serialize;

use crate::layout::table::Record;

/// Column positions in a reconstructed register row.
///
/// The register lays records out as at least six columns; only four
/// carry data we keep. See [`crate::config::TableConfig`] for why these
/// indices are layout facts rather than algorithm facts.
const MIN_COLUMNS: usize = 6;
const COL_ADDRESS: usize = 1;
const COL_REFERENCE: usize = 2;
const COL_RECEIVED: usize = 3;
const COL_REASON: usize = 5;

/// One development application extracted from the register.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Application {
    /// Application number, e.g. "17/67". Natural key for persistence.
    pub council_reference: String,
    /// Site address, possibly multi-line after continuation merging.
    pub address: String,
    /// Date the application was received, ISO-8601, or empty when the
    /// register's date cell did not parse.
    pub date_received: String,
    /// Stated reason / description of the application.
    pub reason: String,
    /// Date this record was scraped, supplied by the caller.
    pub date_scraped: NaiveDate,
}

impl Application {
    /// Maps a reconstructed row to an application.
    ///
    /// Returns `None` for rows below the minimum column count; rows
    /// emitted by the reconstructor with the default register
    /// configuration always qualify, since its key predicate requires
    /// the same minimum. The scrape timestamp is taken as an argument
    /// so the mapping stays a pure function.
    pub fn from_record(record: &Record, date_scraped: NaiveDate) -> Option<Self> {
        if record.len() < MIN_COLUMNS {
            return None;
        }
        Some(Self {
            council_reference: record[COL_REFERENCE].trim().to_string(),
            address: record[COL_ADDRESS].trim().to_string(),
            date_received: parse_received_date(&record[COL_RECEIVED]),
            reason: record[COL_REASON].trim().to_string(),
            date_scraped,
        })
    }
}

/// Parses a register date cell (`day/month/year`, single-digit day
/// allowed) into ISO-8601, or the empty string when it does not parse.
pub fn parse_received_date(value: &str) -> String {
    NaiveDate::parse_from_str(value.trim(), "%d/%m/%Y")
        .map(|date| date.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}
