//! Moneycontrol news client: slug resolution and headline scraping
//!
//! Moneycontrol keys its company pages by a name-derived slug rather than
//! by ticker. The slug is derived heuristically from the company name and
//! verified against the site's autosuggestion search endpoint; a plain
//! symbol search is the fallback.

use async_trait::async_trait;
use regex::Regex;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use std::time::Duration;
use tracing::warn;

use crate::error::{ResearchError, Result};

use super::NewsProvider;

const SEARCH_URL: &str = "https://www.moneycontrol.com/mccode/common/autosuggestion_solr.php";
const ARTICLE_BASE: &str = "https://www.moneycontrol.com/company-article";

/// One scraped news entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsItem {
    pub headline: String,
    pub summary: String,
    pub date: String,
}

/// Client for Moneycontrol news pages
pub struct MoneycontrolClient {
    client: Client,
}

#[derive(Debug, Deserialize)]
struct SuggestionHit {
    #[serde(default)]
    link_src: String,
}

/// Normalize a company name into a Moneycontrol-style slug: lowercase,
/// "&" spelled out, separators collapsed to hyphens, punctuation dropped.
pub fn slug_from_name(name: &str) -> String {
    let lowered = name.to_lowercase().replace('&', "and").replace(' ', "-");
    lowered
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '-')
        .collect()
}

static ITEM_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<li[^>]*class="[^"]*clearfix[^"]*"[^>]*>(.*?)</li>"#)
        .unwrap_or_else(|_| unreachable!())
});
static HEADLINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<a[^>]*>(.*?)</a>").unwrap_or_else(|_| unreachable!())
});
static SUMMARY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<p[^>]*>(.*?)</p>").unwrap_or_else(|_| unreachable!())
});
static DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<span[^>]*class="[^"]*gD_12[^"]*"[^>]*>(.*?)</span>"#)
        .unwrap_or_else(|_| unreachable!())
});
static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]+>").unwrap_or_else(|_| unreachable!()));

fn strip_tags(fragment: &str) -> String {
    TAG_RE.replace_all(fragment, "").trim().to_string()
}

/// Extract news items from a company-article page.
pub fn parse_news_items(html: &str, limit: usize) -> Vec<NewsItem> {
    ITEM_RE
        .captures_iter(html)
        .filter_map(|block| {
            let body = block.get(1)?.as_str();
            let headline = HEADLINE_RE
                .captures(body)
                .and_then(|c| c.get(1))
                .map(|m| strip_tags(m.as_str()))?;
            if headline.is_empty() {
                return None;
            }
            let summary = SUMMARY_RE
                .captures(body)
                .and_then(|c| c.get(1))
                .map(|m| strip_tags(m.as_str()))
                .unwrap_or_default();
            let date = DATE_RE
                .captures(body)
                .and_then(|c| c.get(1))
                .map(|m| strip_tags(m.as_str()))
                .unwrap_or_default();
            Some(NewsItem {
                headline,
                summary,
                date,
            })
        })
        .take(limit)
        .collect()
}

impl MoneycontrolClient {
    /// Create a new client with the given request timeout
    pub fn new(timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();
        Self { client }
    }

    async fn search(&self, query: &str) -> Result<Vec<SuggestionHit>> {
        let response = self
            .client
            .get(SEARCH_URL)
            .query(&[("query", query), ("type", "1"), ("format", "json")])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ResearchError::UpstreamStatus {
                provider: "Moneycontrol search".to_string(),
                status: response.status().as_u16(),
            });
        }

        Ok(response.json().await?)
    }

    /// Resolve the content slug for a symbol.
    ///
    /// The name-derived slug wins only when the search round-trip confirms
    /// it appears in a result link; otherwise the first symbol-search hit
    /// is used. A disagreement between the two heuristics is logged rather
    /// than silently resolved.
    pub async fn resolve_slug(&self, symbol: &str, company_name: Option<&str>) -> Result<String> {
        let heuristic = company_name
            .map(slug_from_name)
            .filter(|slug| !slug.is_empty());

        let verified = if let Some(slug) = &heuristic {
            match self.search(slug).await {
                Ok(hits) => hits
                    .first()
                    .filter(|hit| hit.link_src.contains(slug.as_str()))
                    .map(|_| slug.clone()),
                Err(e) => {
                    warn!(symbol, error = %e, "slug verification search failed");
                    None
                }
            }
        } else {
            None
        };

        if let Some(slug) = verified {
            return Ok(slug);
        }

        let hits = self.search(symbol).await?;
        let fallback = hits
            .iter()
            .find(|hit| !hit.link_src.is_empty())
            .and_then(|hit| hit.link_src.rsplit('/').next())
            .map(ToString::to_string)
            .filter(|slug| !slug.is_empty());

        match fallback {
            Some(slug) => {
                if let Some(heuristic) = heuristic {
                    if heuristic != slug {
                        warn!(
                            symbol,
                            heuristic = %heuristic,
                            resolved = %slug,
                            "slug heuristics disagree, using search result"
                        );
                    }
                }
                Ok(slug)
            }
            None => Err(ResearchError::SlugUnresolved {
                symbol: symbol.to_string(),
            }),
        }
    }

    /// Fetch and parse the latest news for a resolved slug.
    pub async fn news_for_slug(&self, symbol: &str, slug: &str, limit: usize) -> Result<Vec<NewsItem>> {
        let url = format!(
            "{ARTICLE_BASE}/{slug}/news/{slug}/{}",
            symbol.to_lowercase()
        );
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(ResearchError::UpstreamStatus {
                provider: "Moneycontrol news".to_string(),
                status: response.status().as_u16(),
            });
        }

        let html = response.text().await?;
        Ok(parse_news_items(&html, limit))
    }
}

#[async_trait]
impl NewsProvider for MoneycontrolClient {
    async fn latest_news(
        &self,
        symbol: &str,
        company_name: Option<String>,
        limit: usize,
    ) -> Result<Vec<NewsItem>> {
        let slug = self.resolve_slug(symbol, company_name.as_deref()).await?;
        self.news_for_slug(symbol, &slug, limit).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_from_name() {
        assert_eq!(slug_from_name("Reliance Industries"), "reliance-industries");
        assert_eq!(slug_from_name("L&T Finance"), "landt-finance");
        assert_eq!(
            slug_from_name("Dr. Reddy's Laboratories Ltd."),
            "dr-reddys-laboratories-ltd"
        );
        assert_eq!(slug_from_name(""), "");
    }

    const FIXTURE: &str = r#"
        <div class="MT15">
            <li class="clearfix item">
                <a href="/news/1">Q4 profit <b>beats</b> estimates</a>
                <p>Net profit rose 12% on strong retail demand.</p>
                <span class="gD_12">May 3, 2025 10:14 AM</span>
            </li>
            <li class="clearfix item">
                <a href="/news/2">Board approves capex plan</a>
                <p>New energy investments cleared.</p>
                <span class="gD_12">May 2, 2025 04:40 PM</span>
            </li>
            <li class="other">ignored</li>
        </div>
    "#;

    #[test]
    fn test_parse_news_items() {
        let items = parse_news_items(FIXTURE, 10);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].headline, "Q4 profit beats estimates");
        assert_eq!(items[0].summary, "Net profit rose 12% on strong retail demand.");
        assert_eq!(items[0].date, "May 3, 2025 10:14 AM");
        assert_eq!(items[1].headline, "Board approves capex plan");
    }

    #[test]
    fn test_parse_news_items_respects_limit() {
        let items = parse_news_items(FIXTURE, 1);
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn test_parse_news_items_empty_page() {
        assert!(parse_news_items("<html><body></body></html>", 5).is_empty());
    }
}
