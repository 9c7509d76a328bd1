//! Yahoo quoteSummary client for fundamental company data
//!
//! The upstream response is a dynamic bag of modules; everything consumed
//! here is mapped onto typed records with named optional fields so a
//! missing key surfaces as a typed not-available, never a silent default.

use async_trait::async_trait;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use crate::error::{ResearchError, Result};

use super::FundamentalsProvider;

const BASE_URL: &str = "https://query1.finance.yahoo.com/v10/finance/quoteSummary";
const MODULES: &str = "price,summaryDetail,defaultKeyStatistics,financialData";

type SharedRateLimiter = Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>;

/// Typed fundamental snapshot for one company.
///
/// `roce` is not served by the endpoint and stays a typed not-available.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanySnapshot {
    pub symbol: String,
    pub name: Option<String>,
    pub market_cap: Option<f64>,
    pub pe_ratio: Option<f64>,
    pub pb_ratio: Option<f64>,
    pub debt_to_equity: Option<f64>,
    pub roce: Option<f64>,
    pub dividend_yield: Option<f64>,
    pub eps: Option<f64>,
}

/// Client for the quoteSummary endpoint with request rate limiting
pub struct FundamentalsClient {
    client: Client,
    rate_limiter: SharedRateLimiter,
}

#[derive(Debug, Deserialize)]
struct QuoteSummaryResponse {
    #[serde(rename = "quoteSummary")]
    quote_summary: QuoteSummaryEnvelope,
}

#[derive(Debug, Deserialize)]
struct QuoteSummaryEnvelope {
    result: Option<Vec<QuoteSummaryResult>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuoteSummaryResult {
    price: Option<PriceModule>,
    summary_detail: Option<SummaryDetailModule>,
    default_key_statistics: Option<KeyStatisticsModule>,
    financial_data: Option<FinancialDataModule>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PriceModule {
    short_name: Option<String>,
    long_name: Option<String>,
    market_cap: Option<RawValue>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SummaryDetailModule {
    #[serde(rename = "trailingPE")]
    trailing_pe: Option<RawValue>,
    dividend_yield: Option<RawValue>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct KeyStatisticsModule {
    price_to_book: Option<RawValue>,
    trailing_eps: Option<RawValue>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FinancialDataModule {
    debt_to_equity: Option<RawValue>,
}

/// Numeric fields arrive as `{ "raw": 12.3, "fmt": "12.30" }` objects.
#[derive(Debug, Deserialize)]
struct RawValue {
    raw: Option<f64>,
}

fn raw(value: Option<RawValue>) -> Option<f64> {
    value.and_then(|v| v.raw)
}

impl FundamentalsClient {
    /// Create a new client.
    ///
    /// `rate_limit` is the allowed number of requests per minute.
    pub fn new(rate_limit: u32, timeout: Duration) -> Self {
        let quota = Quota::per_minute(NonZeroU32::new(rate_limit).unwrap_or(NonZeroU32::MIN));
        let rate_limiter = Arc::new(RateLimiter::direct(quota));

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();

        Self {
            client,
            rate_limiter,
        }
    }

    /// Fetch the fundamental snapshot for a symbol.
    pub async fn snapshot(&self, symbol: &str) -> Result<CompanySnapshot> {
        self.rate_limiter.until_ready().await;

        let url = format!("{BASE_URL}/{symbol}");
        let response = self
            .client
            .get(&url)
            .query(&[("modules", MODULES)])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ResearchError::UpstreamStatus {
                provider: "Yahoo quoteSummary".to_string(),
                status: response.status().as_u16(),
            });
        }

        let body: QuoteSummaryResponse = response.json().await?;

        let result = body
            .quote_summary
            .result
            .and_then(|mut r| if r.is_empty() { None } else { Some(r.remove(0)) })
            .ok_or_else(|| ResearchError::InvalidSymbol(symbol.to_string()))?;

        let (name, market_cap) = match result.price {
            Some(p) => (p.short_name.or(p.long_name), raw(p.market_cap)),
            None => (None, None),
        };
        let (pe_ratio, dividend_yield) = match result.summary_detail {
            Some(s) => (raw(s.trailing_pe), raw(s.dividend_yield)),
            None => (None, None),
        };
        let (pb_ratio, eps) = match result.default_key_statistics {
            Some(s) => (raw(s.price_to_book), raw(s.trailing_eps)),
            None => (None, None),
        };
        let debt_to_equity = raw(result.financial_data.and_then(|f| f.debt_to_equity));

        Ok(CompanySnapshot {
            symbol: symbol.to_string(),
            name,
            market_cap,
            pe_ratio,
            pb_ratio,
            debt_to_equity,
            // Not available from the endpoint; reported as N/A downstream.
            roce: None,
            dividend_yield,
            eps,
        })
    }
}

#[async_trait]
impl FundamentalsProvider for FundamentalsClient {
    async fn company_snapshot(&self, symbol: &str) -> Result<CompanySnapshot> {
        self.snapshot(symbol).await
    }
}
