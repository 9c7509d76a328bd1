//! Sequential research pipeline with explicit context passing.
//!
//! The task graph of the original research flow, expressed as plain
//! functions over typed values: the technical and fundamental branches are
//! independent and run concurrently; the news step consumes the
//! fundamental step's company name; report compilation consumes all three.
//! A failing section is carried as a `Result` in the bundle so the report
//! can still be produced from whatever succeeded.

use chrono::{DateTime, Utc};
use serde_json::json;

use crate::analysis::{FundamentalAnalysis, NewsAnalysis, TechnicalAnalysis};
use crate::api::{
    FundamentalsClient, FundamentalsProvider, HistoryProvider, MoneycontrolClient, NewsProvider,
    YahooFinanceClient,
};
use crate::cache::{CacheKey, CacheManager};
use crate::config::ResearchConfig;
use crate::error::{ResearchError, Result};

/// Outputs of one research run, one `Result` per section.
#[derive(Debug)]
pub struct ResearchBundle {
    pub symbol: String,
    pub generated_at: DateTime<Utc>,
    pub technical: Result<TechnicalAnalysis>,
    pub fundamental: Result<FundamentalAnalysis>,
    pub news: Result<NewsAnalysis>,
}

/// Research pipeline over pluggable data sources
pub struct ResearchPipeline<H, F, N> {
    history: H,
    fundamentals: F,
    news: N,
    cache: CacheManager,
    config: ResearchConfig,
}

impl ResearchPipeline<YahooFinanceClient, FundamentalsClient, MoneycontrolClient> {
    /// Build a pipeline wired to the default live clients.
    pub fn with_default_clients(config: ResearchConfig) -> Self {
        let fundamentals =
            FundamentalsClient::new(config.fundamentals_rate_limit, config.request_timeout);
        let news = MoneycontrolClient::new(config.request_timeout);
        Self::new(YahooFinanceClient::new(), fundamentals, news, config)
    }
}

impl<H, F, N> ResearchPipeline<H, F, N>
where
    H: HistoryProvider,
    F: FundamentalsProvider,
    N: NewsProvider,
{
    /// Build a pipeline over explicit data sources.
    pub fn new(history: H, fundamentals: F, news: N, config: ResearchConfig) -> Self {
        let cache = CacheManager::from_config(&config);
        Self {
            history,
            fundamentals,
            news,
            cache,
            config,
        }
    }

    pub fn config(&self) -> &ResearchConfig {
        &self.config
    }

    /// Technical step: fetch history and run the indicator engine.
    pub async fn technical(
        &self,
        symbol: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<TechnicalAnalysis> {
        let key = CacheKey::new(
            symbol,
            "technical",
            json!({
                "start": start.date_naive().to_string(),
                "end": end.date_naive().to_string(),
            }),
        );

        let value = self
            .cache
            .history
            .get_or_fetch(key, || async move {
                let series = self.history.daily_history(symbol, start, end).await?;
                let analysis = TechnicalAnalysis::from_series(&series);
                Ok::<_, ResearchError>(serde_json::to_value(&analysis)?)
            })
            .await?;

        Ok(serde_json::from_value(value)?)
    }

    /// Fundamental step: fetch the typed company snapshot.
    pub async fn fundamental(&self, symbol: &str) -> Result<FundamentalAnalysis> {
        let key = CacheKey::new(symbol, "fundamental", json!({}));

        let value = self
            .cache
            .fundamental
            .get_or_fetch(key, || async move {
                let company = self.fundamentals.company_snapshot(symbol).await?;
                Ok::<_, ResearchError>(serde_json::to_value(FundamentalAnalysis::new(company))?)
            })
            .await?;

        Ok(serde_json::from_value(value)?)
    }

    /// News step: resolve the content slug and scrape recent headlines.
    ///
    /// `company_name` is the upstream context from the fundamental step.
    pub async fn news(&self, symbol: &str, company_name: Option<String>) -> Result<NewsAnalysis> {
        let limit = self.config.news_limit;
        let key = CacheKey::new(
            symbol,
            "news",
            json!({ "limit": limit, "name": &company_name }),
        );

        let value = self
            .cache
            .news
            .get_or_fetch(key, || async move {
                let items = self.news.latest_news(symbol, company_name, limit).await?;
                Ok::<_, ResearchError>(serde_json::to_value(NewsAnalysis::new(symbol, items))?)
            })
            .await?;

        Ok(serde_json::from_value(value)?)
    }

    /// Run the whole graph for one symbol.
    pub async fn run(&self, symbol: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> ResearchBundle {
        let (technical, fundamental) =
            tokio::join!(self.technical(symbol, start, end), self.fundamental(symbol));

        let company_name = fundamental
            .as_ref()
            .ok()
            .and_then(|f| f.company_name().map(ToString::to_string));

        let news = self.news(symbol, company_name).await;

        ResearchBundle {
            symbol: symbol.to_string(),
            generated_at: Utc::now(),
            technical,
            fundamental,
            news,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{
        CompanySnapshot, MockFundamentalsProvider, MockHistoryProvider, MockNewsProvider, NewsItem,
    };
    use crate::series::test_support::series_from_closes;

    fn company(name: Option<&str>) -> CompanySnapshot {
        CompanySnapshot {
            symbol: "RELIANCE.NS".to_string(),
            name: name.map(ToString::to_string),
            market_cap: Some(2.0e13),
            pe_ratio: Some(28.4),
            pb_ratio: Some(2.1),
            debt_to_equity: Some(41.2),
            roce: None,
            dividend_yield: None,
            eps: None,
        }
    }

    fn bounds() -> (DateTime<Utc>, DateTime<Utc>) {
        let end = Utc::now();
        (end - chrono::Duration::days(365), end)
    }

    #[tokio::test]
    async fn test_run_passes_company_name_to_news_step() {
        let mut history = MockHistoryProvider::new();
        history
            .expect_daily_history()
            .times(1)
            .returning(|symbol, _, _| {
                Ok(series_from_closes(symbol, &(0..60).map(|i| 100.0 + f64::from(i)).collect::<Vec<_>>()))
            });

        let mut fundamentals = MockFundamentalsProvider::new();
        fundamentals
            .expect_company_snapshot()
            .times(1)
            .returning(|_| Ok(company(Some("Reliance Industries"))));

        let mut news = MockNewsProvider::new();
        news.expect_latest_news()
            .withf(|_, name, limit| name.as_deref() == Some("Reliance Industries") && *limit == 5)
            .times(1)
            .returning(|_, _, _| {
                Ok(vec![NewsItem {
                    headline: "Q4 results".to_string(),
                    summary: String::new(),
                    date: "May 3, 2025".to_string(),
                }])
            });

        let pipeline =
            ResearchPipeline::new(history, fundamentals, news, ResearchConfig::default());
        let (start, end) = bounds();
        let bundle = pipeline.run("RELIANCE.NS", start, end).await;

        assert_eq!(bundle.symbol, "RELIANCE.NS");
        assert!(bundle.technical.is_ok());
        assert!(bundle.fundamental.is_ok());
        assert_eq!(bundle.news.unwrap().items.len(), 1);
    }

    #[tokio::test]
    async fn test_run_survives_failed_sections() {
        let mut history = MockHistoryProvider::new();
        history.expect_daily_history().returning(|symbol, _, _| {
            Err(ResearchError::NoData {
                symbol: symbol.to_string(),
            })
        });

        let mut fundamentals = MockFundamentalsProvider::new();
        fundamentals
            .expect_company_snapshot()
            .returning(|_| Ok(company(None)));

        let mut news = MockNewsProvider::new();
        news.expect_latest_news()
            .withf(|_, name, _| name.is_none())
            .returning(|symbol, _, _| {
                Err(ResearchError::SlugUnresolved {
                    symbol: symbol.to_string(),
                })
            });

        let pipeline =
            ResearchPipeline::new(history, fundamentals, news, ResearchConfig::default());
        let (start, end) = bounds();
        let bundle = pipeline.run("XXX.NS", start, end).await;

        assert!(matches!(bundle.technical, Err(ResearchError::NoData { .. })));
        assert!(bundle.fundamental.is_ok());
        assert!(matches!(bundle.news, Err(ResearchError::SlugUnresolved { .. })));
    }

    #[tokio::test]
    async fn test_fundamental_step_is_cached() {
        let history = MockHistoryProvider::new();
        let mut fundamentals = MockFundamentalsProvider::new();
        fundamentals
            .expect_company_snapshot()
            .times(1)
            .returning(|_| Ok(company(Some("Reliance Industries"))));
        let news = MockNewsProvider::new();

        let pipeline =
            ResearchPipeline::new(history, fundamentals, news, ResearchConfig::default());

        let first = pipeline.fundamental("RELIANCE.NS").await.unwrap();
        let second = pipeline.fundamental("RELIANCE.NS").await.unwrap();
        assert_eq!(first.company_name(), second.company_name());
    }
}
