use serde::Deserialize;

/// Main configuration structure for Kumo
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawl: CrawlConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub store: StoreConfig,
}

/// Crawl behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlConfig {
    /// URL that seeds the work queue
    #[serde(rename = "seed-url")]
    pub seed_url: String,

    /// Path prefix that marks a link as internal (e.g. "/wiki/")
    #[serde(rename = "link-prefix")]
    pub link_prefix: String,

    /// Stop after this many pages have been indexed
    #[serde(rename = "max-pages")]
    pub max_pages: u32,
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,
}

/// Store backend configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Path to the SQLite database file; omit for an in-memory store
    #[serde(rename = "database-path")]
    pub database_path: Option<String>,
}
