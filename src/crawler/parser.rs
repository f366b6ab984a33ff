//! Anchor extraction from fetched markup
//!
//! The extract half of the page port: pull raw href attribute values out of a
//! document, in the order they appear. Whether a href is worth following is
//! decided later by the canonicalizer, not here.

use scraper::{Html, Selector};

/// Extracts raw `a[href]` attribute values from a document, in document order
///
/// html5ever parses leniently, so malformed markup never fails — it simply
/// yields whatever anchors survive. A body that is not HTML at all produces
/// an empty list.
///
/// # Arguments
///
/// * `html` - The page body to scan
///
/// # Returns
///
/// The href values exactly as written in the markup, unresolved and
/// unfiltered, duplicates included.
pub fn extract_hrefs(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let mut hrefs = Vec::new();

    if let Ok(selector) = Selector::parse("a[href]") {
        for element in document.select(&selector) {
            if let Some(href) = element.value().attr("href") {
                hrefs.push(href.to_string());
            }
        }
    }

    hrefs
}
