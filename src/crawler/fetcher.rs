//! Page fetching contract and HTTP implementation
//!
//! The crawler only needs a collaborator that, given a URL, returns the
//! page's textual content blocks and its outbound links, and fails cleanly
//! on unreachable pages. [`HttpFetcher`] implements that contract over
//! reqwest; tests substitute canned fetchers.

use crate::config::UserAgentConfig;
use crate::crawler::parser::parse_page;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

/// Errors raised by a fetch collaborator
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error for {url}: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Unexpected status {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Page not available: {url}")]
    NotAvailable { url: String },
}

/// One outbound hyperlink as it appeared on the page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLink {
    /// Anchor text
    pub anchor: String,
    /// Raw href attribute, possibly relative
    pub href: String,
}

/// The fetched content of one page
#[derive(Debug, Clone, Default)]
pub struct FetchedPage {
    /// Ordered textual content blocks (paragraphs)
    pub blocks: Vec<String>,
    /// Outbound links in order of appearance
    pub links: Vec<PageLink>,
}

/// Contract for the page-fetching collaborator
pub trait PageFetcher {
    /// Fetches and parses one page
    ///
    /// Fails with a [`FetchError`] on network or parse failure; the crawler
    /// propagates that unchanged.
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError>;
}

/// Builds an HTTP client with the configured user agent and timeouts
///
/// User agent format: `Name/Version (+ContactURL)`.
pub fn build_http_client(config: &UserAgentConfig) -> Result<Client, reqwest::Error> {
    let user_agent = format!(
        "{}/{} (+{})",
        config.crawler_name, config.crawler_version, config.contact_url
    );

    Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// HTTP-backed page fetcher
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Builds a fetcher from the user-agent configuration
    pub fn new(config: &UserAgentConfig) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(config)?,
        })
    }

    /// Wraps an existing client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| FetchError::Http {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|source| FetchError::Http {
            url: url.to_string(),
            source,
        })?;

        Ok(parse_page(&body))
    }
}
