//! Configuration for the research pipeline

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{ResearchError, Result};

/// Configuration for research operations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResearchConfig {
    /// Default history range when the caller gives no dates (e.g. "1y")
    pub default_range: String,

    /// Cache TTL for historical price data
    pub cache_ttl_history: Duration,

    /// Cache TTL for fundamental data
    pub cache_ttl_fundamental: Duration,

    /// Cache TTL for news data
    pub cache_ttl_news: Duration,

    /// Maximum number of news items rendered per report
    pub news_limit: usize,

    /// Requests per minute allowed against the quote-summary endpoint
    pub fundamentals_rate_limit: u32,

    /// Request timeout for scraping and JSON endpoints
    pub request_timeout: Duration,
}

impl Default for ResearchConfig {
    fn default() -> Self {
        Self {
            default_range: "1y".to_string(),
            cache_ttl_history: Duration::from_secs(300), // 5 minutes
            cache_ttl_fundamental: Duration::from_secs(3600), // 1 hour
            cache_ttl_news: Duration::from_secs(300),    // 5 minutes
            news_limit: 5,
            fundamentals_rate_limit: 60,
            request_timeout: Duration::from_secs(10),
        }
    }
}

impl ResearchConfig {
    /// Create a new configuration builder
    pub fn builder() -> ResearchConfigBuilder {
        ResearchConfigBuilder::default()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.news_limit == 0 {
            return Err(ResearchError::Config(
                "news_limit must be greater than 0".to_string(),
            ));
        }

        if self.fundamentals_rate_limit == 0 {
            return Err(ResearchError::Config(
                "fundamentals_rate_limit must be greater than 0".to_string(),
            ));
        }

        if self.request_timeout.is_zero() {
            return Err(ResearchError::Config(
                "request_timeout must be non-zero".to_string(),
            ));
        }

        Ok(())
    }
}

/// Builder for ResearchConfig
#[derive(Debug, Default)]
pub struct ResearchConfigBuilder {
    default_range: Option<String>,
    cache_ttl_history: Option<Duration>,
    cache_ttl_fundamental: Option<Duration>,
    cache_ttl_news: Option<Duration>,
    news_limit: Option<usize>,
    fundamentals_rate_limit: Option<u32>,
    request_timeout: Option<Duration>,
}

impl ResearchConfigBuilder {
    /// Set the default history range
    pub fn default_range(mut self, range: impl Into<String>) -> Self {
        self.default_range = Some(range.into());
        self
    }

    /// Set cache TTL for historical price data
    pub fn cache_ttl_history(mut self, duration: Duration) -> Self {
        self.cache_ttl_history = Some(duration);
        self
    }

    /// Set cache TTL for fundamental data
    pub fn cache_ttl_fundamental(mut self, duration: Duration) -> Self {
        self.cache_ttl_fundamental = Some(duration);
        self
    }

    /// Set cache TTL for news data
    pub fn cache_ttl_news(mut self, duration: Duration) -> Self {
        self.cache_ttl_news = Some(duration);
        self
    }

    /// Set the maximum number of rendered news items
    pub fn news_limit(mut self, limit: usize) -> Self {
        self.news_limit = Some(limit);
        self
    }

    /// Set the quote-summary rate limit (requests per minute)
    pub fn fundamentals_rate_limit(mut self, limit: u32) -> Self {
        self.fundamentals_rate_limit = Some(limit);
        self
    }

    /// Set the request timeout
    pub fn request_timeout(mut self, duration: Duration) -> Self {
        self.request_timeout = Some(duration);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<ResearchConfig> {
        let defaults = ResearchConfig::default();

        let config = ResearchConfig {
            default_range: self.default_range.unwrap_or(defaults.default_range),
            cache_ttl_history: self.cache_ttl_history.unwrap_or(defaults.cache_ttl_history),
            cache_ttl_fundamental: self
                .cache_ttl_fundamental
                .unwrap_or(defaults.cache_ttl_fundamental),
            cache_ttl_news: self.cache_ttl_news.unwrap_or(defaults.cache_ttl_news),
            news_limit: self.news_limit.unwrap_or(defaults.news_limit),
            fundamentals_rate_limit: self
                .fundamentals_rate_limit
                .unwrap_or(defaults.fundamentals_rate_limit),
            request_timeout: self.request_timeout.unwrap_or(defaults.request_timeout),
        };

        config.validate()?;
        Ok(config)
    }
}
