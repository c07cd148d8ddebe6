//! HTML parsing into content blocks and outbound links
//!
//! Content blocks are the texts of `<p>` elements in document order; links
//! are every `a[href]` with its anchor text, in order of appearance.
//! Resolution of hrefs to absolute URLs is not done here; the crawler decides
//! which links are internal and resolves those.

use crate::crawler::fetcher::{FetchedPage, PageLink};
use scraper::{Html, Selector};

/// Parses an HTML document into text blocks and outbound links
pub fn parse_page(html: &str) -> FetchedPage {
    let document = Html::parse_document(html);

    FetchedPage {
        blocks: extract_blocks(&document),
        links: extract_links(&document),
    }
}

/// Extracts paragraph texts, skipping blank ones
fn extract_blocks(document: &Html) -> Vec<String> {
    let mut blocks = Vec::new();

    if let Ok(selector) = Selector::parse("p") {
        for element in document.select(&selector) {
            let text = element.text().collect::<String>().trim().to_string();
            if !text.is_empty() {
                blocks.push(text);
            }
        }
    }

    blocks
}

/// Extracts anchors with their raw hrefs, preserving document order
fn extract_links(document: &Html) -> Vec<PageLink> {
    let mut links = Vec::new();

    if let Ok(selector) = Selector::parse("a[href]") {
        for element in document.select(&selector) {
            if let Some(href) = element.value().attr("href") {
                let anchor = element.text().collect::<String>().trim().to_string();
                links.push(PageLink {
                    anchor,
                    href: href.trim().to_string(),
                });
            }
        }
    }

    links
}
