//! Crawler module for breadth-first page processing
//!
//! This module contains the crawl machinery:
//! - the [`PageFetcher`] contract and its HTTP implementation
//! - HTML parsing into text blocks and outbound links
//! - internal-link resolution
//! - the [`Crawler`] coordinator that owns the work queue

mod coordinator;
mod fetcher;
mod links;
mod parser;

pub use coordinator::{CrawlOutcome, Crawler};
pub use fetcher::{
    build_http_client, FetchError, FetchedPage, HttpFetcher, PageFetcher, PageLink,
};
pub use links::SiteScope;
pub use parser::parse_page;
