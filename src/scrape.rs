//! End-to-end scrape orchestration.
//!
//! Glue only: fetch the register page, follow the PDF link, decode,
//! reconstruct, map, persist. All layout intelligence lives in
//! [`crate::layout`]; everything here is I/O sequencing and logging.

use std::path::Path;

use chrono::Local;
use reqwest::{Client, Url};

use crate::config::TableConfig;
use crate::decode::decode;
use crate::error::{Error, Result};
use crate::fetch::{fetch_bytes, fetch_text, find_link_by_text};
use crate::layout::table::reconstruct_table;
use crate::record::Application;
use crate::store::RecordStore;

/// Page listing Walcha Shire Council's registers. This crate scrapes
/// that one council: the council publishes applications only as a PDF
/// register, and the [`TableConfig`] defaults (key column, minimum
/// cells, heading prefixes) encode that document's layout. Pointing the
/// scraper elsewhere means revisiting those defaults too.
const REGISTER_PAGE: &str =
    "https://www.walcha.nsw.gov.au/development/development-application-register";
/// Visible label of the link to the current register PDF.
const REGISTER_LINK_TEXT: &str = "Development Application Register";

/// Counters describing one scrape run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrapeSummary {
    /// Records reconstructed from the document.
    pub records_found: usize,
    /// Records newly written to the store.
    pub records_inserted: usize,
    /// Continuation cells dropped for want of a matching column.
    pub unmatched_cells: usize,
}

/// Runs a full scrape against the live register, persisting into the
/// database at `db_path`.
pub async fn run(db_path: &Path) -> Result<ScrapeSummary> {
    let client = Client::new();

    log::info!("Fetching register page {REGISTER_PAGE}");
    let html = fetch_text(&client, REGISTER_PAGE).await?;
    let href = find_link_by_text(&html, REGISTER_LINK_TEXT)
        .ok_or_else(|| Error::LinkNotFound(REGISTER_LINK_TEXT.to_string()))?;

    let pdf_url = resolve(REGISTER_PAGE, &href)?;
    log::info!("Downloading register PDF {pdf_url}");
    let bytes = fetch_bytes(&client, pdf_url.as_str()).await?;

    let store = RecordStore::open(db_path)?;
    scrape_document(&bytes, &store)
}

/// Decodes one register document and persists its records.
///
/// Split from [`run`] so the whole pipeline below the network boundary
/// can be exercised against fixture bytes. Decode failures abort before
/// anything is written, so a malformed document never persists partial
/// results.
pub fn scrape_document(bytes: &[u8], store: &RecordStore) -> Result<ScrapeSummary> {
    let pages = decode(bytes)?;
    log::info!(
        "Decoded {} pages, {} fragments",
        pages.len(),
        pages.iter().map(|p| p.fragments.len()).sum::<usize>()
    );

    let config = TableConfig::default();
    let output = reconstruct_table(&pages, &config);
    for cell in &output.unmatched {
        log::warn!(
            "Record {}: dropped continuation cell at x={} with no matching column: {:?}",
            cell.record_key,
            cell.x,
            cell.text
        );
    }

    let date_scraped = Local::now().date_naive();
    let mut inserted = 0;
    for record in &output.records {
        let Some(app) = Application::from_record(record, date_scraped) else {
            log::warn!("Skipping record with too few columns: {record:?}");
            continue;
        };
        if store.insert_if_absent(&app)? {
            inserted += 1;
            log::debug!("Inserted {}", serde_json::json!(&app));
        }
    }

    let summary = ScrapeSummary {
        records_found: output.records.len(),
        records_inserted: inserted,
        unmatched_cells: output.unmatched.len(),
    };
    log::info!(
        "Scrape complete: {} records found, {} inserted, {} unmatched cells",
        summary.records_found,
        summary.records_inserted,
        summary.unmatched_cells
    );
    Ok(summary)
}

/// Resolves a possibly-relative `href` against the page it was found on.
fn resolve(base: &str, href: &str) -> Result<Url> {
    let base = Url::parse(base).map_err(|e| Error::Url(format!("bad base URL: {e}")))?;
    base.join(href)
        .map_err(|e| Error::Url(format!("bad link '{href}': {e}")))
}
