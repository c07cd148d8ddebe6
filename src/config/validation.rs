use crate::config::types::{Config, CrawlConfig, UserAgentConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawl_config(&config.crawl)?;
    validate_user_agent_config(&config.user_agent)?;
    Ok(())
}

/// Validates crawl configuration
fn validate_crawl_config(config: &CrawlConfig) -> Result<(), ConfigError> {
    let seed = Url::parse(&config.seed_url)
        .map_err(|_| ConfigError::InvalidUrl(config.seed_url.clone()))?;

    if seed.scheme() != "http" && seed.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "seed-url must be http(s), got scheme '{}'",
            seed.scheme()
        )));
    }

    if !config.link_prefix.starts_with('/') {
        return Err(ConfigError::Validation(format!(
            "link-prefix must start with '/', got '{}'",
            config.link_prefix
        )));
    }

    if config.max_pages < 1 {
        return Err(ConfigError::Validation(format!(
            "max-pages must be >= 1, got {}",
            config.max_pages
        )));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler-name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler-name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    if config.crawler_version.is_empty() {
        return Err(ConfigError::Validation(
            "crawler-version cannot be empty".to_string(),
        ));
    }

    if Url::parse(&config.contact_url).is_err() {
        return Err(ConfigError::InvalidUrl(config.contact_url.clone()));
    }

    Ok(())
}
