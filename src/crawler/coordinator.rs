//! Crawl coordination
//!
//! The [`Crawler`] owns a FIFO queue of discovered URLs and processes one URL
//! per [`Crawler::crawl`] call: pop, fetch, index, enqueue the page's
//! internal links. Termination is caller-owned; drivers loop while
//! [`Crawler::queue_size`] is non-zero or until a page budget is spent.

use crate::crawler::fetcher::{PageFetcher, PageLink};
use crate::crawler::links::SiteScope;
use crate::index::Index;
use std::collections::VecDeque;

/// The result of one crawl step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrawlOutcome {
    /// The URL was fetched and indexed
    Indexed(String),
    /// The URL was already indexed and discarded without fetching
    Skipped(String),
    /// The queue was empty; nothing to do
    Exhausted,
}

impl CrawlOutcome {
    /// The URL this outcome refers to, if any
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Indexed(url) | Self::Skipped(url) => Some(url),
            Self::Exhausted => None,
        }
    }
}

/// Breadth-first crawler over an internal-link graph
///
/// Duplicates may be enqueued; already-indexed URLs are discarded at
/// processing time instead. The queue is in-process only and is lost on
/// restart.
pub struct Crawler<F, I> {
    fetcher: F,
    index: I,
    scope: SiteScope,
    queue: VecDeque<String>,
}

impl<F: PageFetcher, I: Index> Crawler<F, I> {
    /// Creates a crawler with its queue seeded with the source URL
    pub fn new(source: impl Into<String>, fetcher: F, index: I, scope: SiteScope) -> Self {
        let mut queue = VecDeque::new();
        queue.push_back(source.into());
        Self {
            fetcher,
            index,
            scope,
            queue,
        }
    }

    /// Number of discovered URLs not yet popped
    pub fn queue_size(&self) -> usize {
        self.queue.len()
    }

    /// Read access to the index (for queries after crawling)
    pub fn index(&self) -> &I {
        &self.index
    }

    /// Consumes the crawler, returning the index
    pub fn into_index(self) -> I {
        self.index
    }

    /// Processes one URL from the head of the queue
    ///
    /// In test mode the page is fetched and indexed regardless of prior
    /// indexing, so repeated runs are deterministic. Otherwise an
    /// already-indexed URL is discarded without consulting the fetcher.
    ///
    /// Fetch and store failures propagate unchanged; the popped URL is not
    /// re-enqueued, so callers wanting a retry must re-seed the queue.
    pub async fn crawl(&mut self, test_mode: bool) -> crate::Result<CrawlOutcome> {
        let Some(url) = self.queue.pop_front() else {
            return Ok(CrawlOutcome::Exhausted);
        };

        if !test_mode && self.index.is_indexed(&url)? {
            tracing::debug!(%url, "already indexed, skipping");
            return Ok(CrawlOutcome::Skipped(url));
        }

        tracing::debug!(%url, "fetching");
        let page = self.fetcher.fetch(&url).await?;

        self.queue_internal_links(&page.links);
        self.index.index_page(&url, &page.blocks)?;

        tracing::info!(
            %url,
            blocks = page.blocks.len(),
            queued = self.queue.len(),
            "indexed page"
        );
        Ok(CrawlOutcome::Indexed(url))
    }

    /// Appends the page's internal links to the queue in source order
    fn queue_internal_links(&mut self, links: &[PageLink]) {
        for link in links {
            if let Some(absolute) = self.scope.resolve_internal(&link.href) {
                self.queue.push_back(absolute);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crawler::fetcher::{FetchError, FetchedPage};
    use crate::index::MemoryIndex;
    use std::collections::HashMap;
    use url::Url;

    /// Canned fetcher serving pages from a map
    struct StubFetcher {
        pages: HashMap<String, FetchedPage>,
    }

    impl StubFetcher {
        fn new() -> Self {
            Self {
                pages: HashMap::new(),
            }
        }

        fn page(mut self, url: &str, text: &str, hrefs: &[&str]) -> Self {
            self.pages.insert(
                url.to_string(),
                FetchedPage {
                    blocks: vec![text.to_string()],
                    links: hrefs
                        .iter()
                        .map(|href| PageLink {
                            anchor: String::new(),
                            href: href.to_string(),
                        })
                        .collect(),
                },
            );
            self
        }
    }

    impl PageFetcher for StubFetcher {
        async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
            self.pages
                .get(url)
                .cloned()
                .ok_or_else(|| FetchError::NotAvailable {
                    url: url.to_string(),
                })
        }
    }

    fn scope() -> SiteScope {
        SiteScope::new(Url::parse("https://site.test/").unwrap(), "/wiki/")
    }

    fn url(path: &str) -> String {
        format!("https://site.test{path}")
    }

    #[test]
    fn test_queue_seeded_with_source() {
        let crawler = Crawler::new(
            url("/wiki/Start"),
            StubFetcher::new(),
            MemoryIndex::new(),
            scope(),
        );
        assert_eq!(crawler.queue_size(), 1);
    }

    #[tokio::test]
    async fn test_crawl_indexes_and_enqueues_internal_links() {
        let fetcher = StubFetcher::new().page(
            &url("/wiki/Start"),
            "start page text",
            &["/wiki/A", "https://external.example/x", "/wiki/B"],
        );
        let mut crawler = Crawler::new(url("/wiki/Start"), fetcher, MemoryIndex::new(), scope());

        let outcome = crawler.crawl(false).await.unwrap();
        assert_eq!(outcome, CrawlOutcome::Indexed(url("/wiki/Start")));

        // only the two internal links were enqueued, in source order
        assert_eq!(crawler.queue_size(), 2);
        assert!(crawler.index().is_indexed(&url("/wiki/Start")).unwrap());
        assert!(crawler
            .index()
            .urls_for_term("start")
            .unwrap()
            .contains(&url("/wiki/Start")));
    }

    #[tokio::test]
    async fn test_empty_queue_reports_exhausted() {
        let fetcher = StubFetcher::new().page(&url("/wiki/Start"), "text", &[]);
        let mut crawler = Crawler::new(url("/wiki/Start"), fetcher, MemoryIndex::new(), scope());

        crawler.crawl(false).await.unwrap();
        let outcome = crawler.crawl(false).await.unwrap();
        assert_eq!(outcome, CrawlOutcome::Exhausted);
    }

    #[tokio::test]
    async fn test_already_indexed_url_is_skipped() {
        // queue [A, A, B] with A already indexed: skip, skip, index
        let fetcher = StubFetcher::new().page(&url("/wiki/B"), "b text", &[]);
        let mut index = MemoryIndex::new();
        index
            .index_page(&url("/wiki/A"), &["a text".to_string()])
            .unwrap();

        let mut crawler = Crawler::new(url("/wiki/A"), fetcher, index, scope());
        crawler.queue.push_back(url("/wiki/A"));
        crawler.queue.push_back(url("/wiki/B"));

        assert_eq!(
            crawler.crawl(false).await.unwrap(),
            CrawlOutcome::Skipped(url("/wiki/A"))
        );
        assert_eq!(crawler.queue_size(), 2);

        assert_eq!(
            crawler.crawl(false).await.unwrap(),
            CrawlOutcome::Skipped(url("/wiki/A"))
        );

        assert_eq!(
            crawler.crawl(false).await.unwrap(),
            CrawlOutcome::Indexed(url("/wiki/B"))
        );
        assert_eq!(crawler.queue_size(), 0);
    }

    #[tokio::test]
    async fn test_skip_does_not_consult_fetcher() {
        // the fetcher has no page for A, so a fetch attempt would error
        let fetcher = StubFetcher::new();
        let mut index = MemoryIndex::new();
        index
            .index_page(&url("/wiki/A"), &["a text".to_string()])
            .unwrap();

        let mut crawler = Crawler::new(url("/wiki/A"), fetcher, index, scope());
        assert_eq!(
            crawler.crawl(false).await.unwrap(),
            CrawlOutcome::Skipped(url("/wiki/A"))
        );
    }

    #[tokio::test]
    async fn test_test_mode_reindexes_unconditionally() {
        let fetcher = StubFetcher::new().page(&url("/wiki/A"), "fresh text", &[]);
        let mut index = MemoryIndex::new();
        index
            .index_page(&url("/wiki/A"), &["stale text".to_string()])
            .unwrap();

        let mut crawler = Crawler::new(url("/wiki/A"), fetcher, index, scope());
        assert_eq!(
            crawler.crawl(true).await.unwrap(),
            CrawlOutcome::Indexed(url("/wiki/A"))
        );

        assert!(crawler
            .index()
            .urls_for_term("fresh")
            .unwrap()
            .contains(&url("/wiki/A")));
        assert!(crawler.index().urls_for_term("stale").unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_fetch_failure_propagates_and_drops_url() {
        let fetcher = StubFetcher::new();
        let mut crawler = Crawler::new(url("/wiki/Gone"), fetcher, MemoryIndex::new(), scope());

        let err = crawler.crawl(false).await.unwrap_err();
        assert!(matches!(
            err,
            crate::KumoError::Fetch(FetchError::NotAvailable { .. })
        ));

        // the failed URL is not re-enqueued
        assert_eq!(crawler.queue_size(), 0);
    }

    #[tokio::test]
    async fn test_duplicates_allowed_on_enqueue() {
        let fetcher = StubFetcher::new()
            .page(&url("/wiki/Start"), "text", &["/wiki/A", "/wiki/A"])
            .page(&url("/wiki/A"), "a", &[]);
        let mut crawler = Crawler::new(url("/wiki/Start"), fetcher, MemoryIndex::new(), scope());

        crawler.crawl(false).await.unwrap();
        assert_eq!(crawler.queue_size(), 2);

        // first A indexes, second A is skipped at processing time
        assert!(matches!(
            crawler.crawl(false).await.unwrap(),
            CrawlOutcome::Indexed(_)
        ));
        assert!(matches!(
            crawler.crawl(false).await.unwrap(),
            CrawlOutcome::Skipped(_)
        ));
    }
}
