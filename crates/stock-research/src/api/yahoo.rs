//! Yahoo Finance history client

use async_trait::async_trait;
use chrono::{DateTime, Datelike, Utc};
use time::OffsetDateTime;
use yahoo_finance_api as yahoo;

use crate::error::{ResearchError, Result};
use crate::series::{Bar, Series};

use super::HistoryProvider;

/// Yahoo Finance client for daily OHLCV history
pub struct YahooFinanceClient {}

impl YahooFinanceClient {
    /// Create a new Yahoo Finance client
    pub fn new() -> Self {
        Self {}
    }

    /// Fetch daily bars for a symbol between two instants.
    pub async fn history(
        &self,
        symbol: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Series> {
        let provider = yahoo::YahooConnector::new()
            .map_err(|e| ResearchError::YahooFinance(e.to_string()))?;

        let start_odt = OffsetDateTime::from_unix_timestamp(start.timestamp())
            .map_err(|e| ResearchError::YahooFinance(format!("Invalid start timestamp: {e}")))?;
        let end_odt = OffsetDateTime::from_unix_timestamp(end.timestamp())
            .map_err(|e| ResearchError::YahooFinance(format!("Invalid end timestamp: {e}")))?;

        let response = provider
            .get_quote_history(symbol, start_odt, end_odt)
            .await
            .map_err(|e| ResearchError::YahooFinance(e.to_string()))?;

        let quotes = response
            .quotes()
            .map_err(|e| ResearchError::YahooFinance(e.to_string()))?;

        let bars: Vec<Bar> = quotes
            .iter()
            .map(|q| Bar {
                date: DateTime::from_timestamp(q.timestamp as i64, 0)
                    .unwrap_or_else(Utc::now)
                    .date_naive(),
                open: q.open,
                high: q.high,
                low: q.low,
                close: q.close,
                volume: q.volume,
            })
            .collect();

        // Series::new reports the empty response as NoData.
        Series::new(symbol, bars)
    }
}

impl Default for YahooFinanceClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HistoryProvider for YahooFinanceClient {
    async fn daily_history(
        &self,
        symbol: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Series> {
        self.history(symbol, start, end).await
    }
}

/// Translate a range string (e.g. "1mo", "1y", "ytd") into date bounds
/// ending now.
pub fn range_bounds(range: &str) -> Result<(DateTime<Utc>, DateTime<Utc>)> {
    let end = Utc::now();
    let start = match range {
        "1d" => end - chrono::Duration::days(1),
        "5d" => end - chrono::Duration::days(5),
        "1mo" => end - chrono::Duration::days(30),
        "3mo" => end - chrono::Duration::days(90),
        "6mo" => end - chrono::Duration::days(180),
        "1y" => end - chrono::Duration::days(365),
        "2y" => end - chrono::Duration::days(730),
        "5y" => end - chrono::Duration::days(1825),
        "10y" => end - chrono::Duration::days(3650),
        "ytd" => {
            let year = end.year();
            chrono::NaiveDate::from_ymd_opt(year, 1, 1)
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .map(|dt| dt.and_utc())
                .ok_or_else(|| ResearchError::InvalidRange(range.to_string()))?
        }
        "max" => end - chrono::Duration::days(36500), // ~100 years
        _ => return Err(ResearchError::InvalidRange(range.to_string())),
    };

    Ok((start, end))
}
