//! Technical analysis step output

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::indicators::IndicatorSnapshot;
use crate::series::Series;

/// Result of the technical step: the indicator snapshot plus report
/// metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TechnicalAnalysis {
    pub symbol: String,
    pub report_date: NaiveDate,
    pub bar_count: usize,
    pub snapshot: IndicatorSnapshot,
}

impl TechnicalAnalysis {
    /// Run the indicator engine over a series.
    pub fn from_series(series: &Series) -> Self {
        Self {
            symbol: series.symbol().to_string(),
            report_date: Utc::now().date_naive(),
            bar_count: series.len(),
            snapshot: IndicatorSnapshot::compute(series),
        }
    }
}

/// Interpret an RSI value
pub fn interpret_rsi(rsi: f64) -> &'static str {
    if rsi > 70.0 {
        "Overbought - potential sell signal"
    } else if rsi < 30.0 {
        "Oversold - potential buy signal"
    } else {
        "Neutral"
    }
}

/// Where the current price sits relative to a moving average
pub fn price_vs_average(price: f64, average: Option<f64>) -> Option<&'static str> {
    average.map(|avg| if price > avg { "above" } else { "below" })
}
