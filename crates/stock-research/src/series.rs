//! OHLCV data model: daily bars and the ordered price series

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{ResearchError, Result};

/// One trading day of OHLCV data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

/// Ordered, non-empty sequence of daily bars for one symbol.
///
/// Bars are sorted ascending by date at construction; missing trading days
/// are simply absent and never filled. Caller data is re-ordered only by
/// the stable sort, never discarded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Series {
    symbol: String,
    bars: Vec<Bar>,
}

impl Series {
    /// Build a series from bars in any order.
    ///
    /// Returns [`ResearchError::NoData`] when `bars` is empty.
    pub fn new(symbol: impl Into<String>, mut bars: Vec<Bar>) -> Result<Self> {
        let symbol = symbol.into();
        if bars.is_empty() {
            return Err(ResearchError::NoData { symbol });
        }
        bars.sort_by_key(|b| b.date);
        Ok(Self { symbol, bars })
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        // Never true by construction, kept for the len/is_empty pairing.
        self.bars.is_empty()
    }

    /// The most recent bar by date (last after the ascending sort).
    pub fn latest(&self) -> &Bar {
        // Non-empty invariant holds from `new`.
        self.bars.last().unwrap_or_else(|| unreachable!())
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    pub fn highs(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.high).collect()
    }

    pub fn lows(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.low).collect()
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// Build a daily series from closes only; open/high/low track the close.
    pub(crate) fn series_from_closes(symbol: &str, closes: &[f64]) -> Series {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let bars = closes
            .iter()
            .enumerate()
            .map(|(i, &close)| Bar {
                date: start + chrono::Days::new(i as u64),
                open: close,
                high: close + 1.0,
                low: close - 1.0,
                close,
                volume: 1_000,
            })
            .collect();
        Series::new(symbol, bars).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(date: NaiveDate, close: f64) -> Bar {
        Bar {
            date,
            open: close,
            high: close,
            low: close,
            close,
            volume: 10,
        }
    }

    #[test]
    fn test_empty_series_is_no_data() {
        let err = Series::new("RELIANCE.NS", vec![]).unwrap_err();
        assert!(matches!(err, ResearchError::NoData { symbol } if symbol == "RELIANCE.NS"));
    }

    #[test]
    fn test_unordered_bars_are_sorted_ascending() {
        let d = |day| NaiveDate::from_ymd_opt(2024, 3, day).unwrap();
        let series = Series::new("TCS.NS", vec![bar(d(3), 30.0), bar(d(1), 10.0), bar(d(2), 20.0)])
            .unwrap();

        let dates: Vec<_> = series.bars().iter().map(|b| b.date).collect();
        assert_eq!(dates, vec![d(1), d(2), d(3)]);
        // The latest bar is selected by date, not by the caller's ordering.
        assert_eq!(series.latest().close, 30.0);
        assert_eq!(series.len(), 3);
    }

    #[test]
    fn test_column_accessors() {
        let series = test_support::series_from_closes("INFY.NS", &[10.0, 11.0, 12.0]);
        assert_eq!(series.closes(), vec![10.0, 11.0, 12.0]);
        assert_eq!(series.highs(), vec![11.0, 12.0, 13.0]);
        assert_eq!(series.lows(), vec![9.0, 10.0, 11.0]);
    }
}
