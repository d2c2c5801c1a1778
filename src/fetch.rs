//! HTTP fetching and register-page link discovery.

use reqwest::Client;
use scraper::{Html, Selector};

use crate::error::Result;

/// Fetches a URL and returns the response body as text.
pub async fn fetch_text(client: &Client, url: &str) -> Result<String> {
    let response = client.get(url).send().await?.error_for_status()?;
    let body = response.text().await?;
    log::debug!("Fetched {} characters from {url}", body.len());
    Ok(body)
}

/// Fetches a URL and returns the raw response bytes.
pub async fn fetch_bytes(client: &Client, url: &str) -> Result<Vec<u8>> {
    let response = client.get(url).send().await?.error_for_status()?;
    let bytes = response.bytes().await?;
    log::debug!("Downloaded {} bytes from {url}", bytes.len());
    Ok(bytes.to_vec())
}

/// Finds the `href` of the first anchor whose visible text trims to
/// exactly `label`.
///
/// Parses the document on every call; register pages are small and this
/// keeps the function pure and the parsed DOM out of the async surface.
pub fn find_link_by_text(html: &str, label: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let anchors = Selector::parse("a").ok()?;

    document.select(&anchors).find_map(|element| {
        let text: String = element.text().collect();
        if text.trim() == label {
            element.value().attr("href").map(str::to_string)
        } else {
            None
        }
    })
}
