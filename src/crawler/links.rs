//! Internal-link recognition and resolution
//!
//! A link is internal when its href begins with the configured site prefix
//! (wiki-style, e.g. `/wiki/`). Internal links are resolved against the
//! site's base URL to absolute form before being enqueued.

use url::Url;

/// The crawl's same-site convention: base URL plus internal-link prefix
#[derive(Debug, Clone)]
pub struct SiteScope {
    base_url: Url,
    link_prefix: String,
}

impl SiteScope {
    /// Creates a scope from a base URL and link prefix
    pub fn new(base_url: Url, link_prefix: impl Into<String>) -> Self {
        Self {
            base_url,
            link_prefix: link_prefix.into(),
        }
    }

    /// Derives a scope from a seed URL: the base is the seed's origin root
    pub fn from_seed(seed_url: &str, link_prefix: impl Into<String>) -> Result<Self, url::ParseError> {
        let base_url = Url::parse(seed_url)?.join("/")?;
        Ok(Self::new(base_url, link_prefix))
    }

    /// True when the href matches the internal-link convention
    pub fn is_internal(&self, href: &str) -> bool {
        href.starts_with(&self.link_prefix)
    }

    /// Resolves an internal href to an absolute URL
    ///
    /// Returns None for external links or unresolvable hrefs.
    pub fn resolve_internal(&self, href: &str) -> Option<String> {
        if !self.is_internal(href) {
            return None;
        }
        self.base_url.join(href).ok().map(|url| url.to_string())
    }
}
