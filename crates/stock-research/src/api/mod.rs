//! Upstream data sources: price history, fundamentals, and news.
//!
//! Each source sits behind an async trait so the pipeline can be tested
//! without network access.

pub mod fundamentals;
pub mod moneycontrol;
pub mod yahoo;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::series::Series;

pub use fundamentals::{CompanySnapshot, FundamentalsClient};
pub use moneycontrol::{MoneycontrolClient, NewsItem};
pub use yahoo::YahooFinanceClient;

/// Source of historical daily OHLCV data
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HistoryProvider: Send + Sync {
    /// Fetch daily bars for `symbol` between `start` and `end` inclusive.
    async fn daily_history(
        &self,
        symbol: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Series>;
}

/// Source of fundamental company data
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FundamentalsProvider: Send + Sync {
    /// Fetch the typed fundamental snapshot for `symbol`.
    async fn company_snapshot(&self, symbol: &str) -> Result<CompanySnapshot>;
}

/// Source of recent market news for a listed company
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NewsProvider: Send + Sync {
    /// Fetch up to `limit` news items for `symbol`.
    ///
    /// `company_name` feeds the content-identifier heuristic when the
    /// source is keyed by company rather than by ticker.
    async fn latest_news(
        &self,
        symbol: &str,
        company_name: Option<String>,
        limit: usize,
    ) -> Result<Vec<NewsItem>>;
}
