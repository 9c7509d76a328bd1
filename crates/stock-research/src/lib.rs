//! Stock research engine
//!
//! This crate turns a ticker symbol into a three-section research report:
//!
//! - Technical analysis over daily Yahoo Finance bars (moving averages,
//!   RSI, MACD, Bollinger Bands, volatility and trailing extrema)
//! - Fundamental analysis from the Yahoo Finance quote summary (key
//!   ratios, market cap, EPS)
//! - Recent headlines scraped from Moneycontrol company news pages
//!
//! # Architecture
//!
//! [`pipeline::ResearchPipeline`] orchestrates the three steps: the
//! technical and fundamental steps run concurrently, and the news step
//! runs after them so it can reuse the resolved company name. Each step
//! is a provider trait (`HistoryProvider`, `FundamentalsProvider`,
//! `NewsProvider`) with an HTTP client implementation, which keeps the
//! pipeline testable with mocks. Step outputs are cached with per-section
//! TTLs, and a failed step degrades to an explanatory line in the report
//! instead of failing the run.
//!
//! # Example
//!
//! ```rust,ignore
//! use stock_research::{ResearchConfig, ResearchPipeline, report};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     stock_research::init_tracing();
//!
//!     let config = ResearchConfig::default();
//!     let (start, end) = stock_research::api::yahoo::range_bounds("1y")?;
//!
//!     let pipeline = ResearchPipeline::with_default_clients(config);
//!     let bundle = pipeline.run("RELIANCE.NS", start, end).await;
//!
//!     println!("{}", report::compile(&bundle));
//!     Ok(())
//! }
//! ```

pub mod analysis;
pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod indicators;
pub mod logging;
pub mod pipeline;
pub mod report;
pub mod series;

pub use analysis::{FundamentalAnalysis, NewsAnalysis, TechnicalAnalysis};
pub use api::{CompanySnapshot, NewsItem};
pub use config::ResearchConfig;
pub use error::{ResearchError, Result};
pub use indicators::IndicatorSnapshot;
pub use logging::init_tracing;
pub use pipeline::{ResearchBundle, ResearchPipeline};
pub use series::{Bar, Series};
