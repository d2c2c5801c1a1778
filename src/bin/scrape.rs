//! Scraper entry point.
//!
//! Takes no arguments: fetches the live register, extracts its records,
//! and persists them into `data.sqlite` in the working directory. A
//! failed run logs the error and exits nonzero so the next scheduled
//! run simply retries.

use std::path::Path;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();

    match da_register::scrape::run(Path::new("data.sqlite")).await {
        Ok(summary) => {
            log::info!(
                "Done: {} records ({} new)",
                summary.records_found,
                summary.records_inserted
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Scrape failed: {e}");
            ExitCode::FAILURE
        }
    }
}
