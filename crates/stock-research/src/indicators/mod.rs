//! Indicator engine: derives a fixed set of technical metrics from a
//! price series.
//!
//! One [`Series`] in, one [`IndicatorSnapshot`] out. The computation is
//! synchronous, stateless and side-effect free, so independent series can
//! be processed concurrently without coordination. Fields whose window is
//! not yet satisfied are `None` rather than an error: the caller can tell
//! "no data at all" (unrepresentable here, `Series` is non-empty by
//! construction) apart from "indicator not yet valid".

pub mod rolling;

use serde::{Deserialize, Serialize};

use crate::series::Series;

/// Trading days per year, used for the 52-week windows and for
/// annualizing volatility.
pub const TRADING_DAYS_PER_YEAR: usize = 252;

/// Window of the "recent" high/low price-action metrics.
pub const RECENT_WINDOW: usize = 20;

/// Guard against division by zero in the RSI relative-strength ratio.
const RSI_EPSILON: f64 = 1e-9;

/// Latest value of every supported indicator plus headline price-action
/// statistics, computed once per invocation and never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndicatorSnapshot {
    /// Close of the most recent bar by date.
    pub current_price: f64,

    /// 252-bar rolling maximum of daily highs, partial windows allowed.
    pub high_52w: f64,
    /// 252-bar rolling minimum of daily lows, partial windows allowed.
    pub low_52w: f64,
    /// 20-bar trailing maximum of daily highs.
    pub recent_high: f64,
    /// 20-bar trailing minimum of daily lows.
    pub recent_low: f64,
    /// Sample standard deviation of daily percentage change, scaled by
    /// sqrt(252). Needs at least two day-over-day changes.
    pub annualized_volatility: Option<f64>,

    pub sma_20: Option<f64>,
    pub sma_50: Option<f64>,
    pub sma_100: Option<f64>,
    pub sma_200: Option<f64>,

    pub ema_20: f64,
    pub ema_50: f64,
    pub ema_100: f64,
    pub ema_200: f64,

    pub rsi_14: Option<f64>,

    /// EWMA(12) minus EWMA(26) of the close.
    pub macd: f64,
    /// 9-span EWMA of the MACD line.
    pub macd_signal: f64,

    pub bollinger_upper: Option<f64>,
    pub bollinger_lower: Option<f64>,
}

impl IndicatorSnapshot {
    /// Compute the full snapshot for a series.
    pub fn compute(series: &Series) -> Self {
        let closes = series.closes();
        let highs = series.highs();
        let lows = series.lows();

        // Non-empty invariant makes the partial-window extrema and the
        // EWMA family total.
        let high_52w = rolling::trailing_max(&highs, TRADING_DAYS_PER_YEAR).unwrap_or(f64::NAN);
        let low_52w = rolling::trailing_min(&lows, TRADING_DAYS_PER_YEAR).unwrap_or(f64::NAN);
        let recent_high = rolling::trailing_max(&highs, RECENT_WINDOW).unwrap_or(f64::NAN);
        let recent_low = rolling::trailing_min(&lows, RECENT_WINDOW).unwrap_or(f64::NAN);

        let returns = rolling::pct_changes(&closes);
        let annualized_volatility =
            rolling::sample_std(&returns).map(|s| s * (TRADING_DAYS_PER_YEAR as f64).sqrt());

        let sma20 = rolling::sma_last(&closes, 20);
        let bollinger_std = rolling::rolling_std_last(&closes, 20);
        let (bollinger_upper, bollinger_lower) = match (sma20, bollinger_std) {
            (Some(mid), Some(std)) => (Some(mid + 2.0 * std), Some(mid - 2.0 * std)),
            _ => (None, None),
        };

        let ewma_close = |span| rolling::ewma_last(&closes, span).unwrap_or(f64::NAN);

        let macd_line: Vec<f64> = rolling::ewma(&closes, 12)
            .into_iter()
            .zip(rolling::ewma(&closes, 26))
            .map(|(fast, slow)| fast - slow)
            .collect();
        let macd = macd_line.last().copied().unwrap_or(f64::NAN);
        let macd_signal = rolling::ewma_last(&macd_line, 9).unwrap_or(f64::NAN);

        Self {
            current_price: series.latest().close,
            high_52w,
            low_52w,
            recent_high,
            recent_low,
            annualized_volatility,
            sma_20: sma20,
            sma_50: rolling::sma_last(&closes, 50),
            sma_100: rolling::sma_last(&closes, 100),
            sma_200: rolling::sma_last(&closes, 200),
            ema_20: ewma_close(20),
            ema_50: ewma_close(50),
            ema_100: ewma_close(100),
            ema_200: ewma_close(200),
            rsi_14: rsi(&closes, 14),
            macd,
            macd_signal,
            bollinger_upper,
            bollinger_lower,
        }
    }
}

/// Relative Strength Index over `period` bars.
///
/// Day-over-day deltas are split into gains and losses; the undefined
/// first delta contributes zero to both, matching a dataframe `diff` that
/// masks its leading NaN to zero. Defined once `period` closes exist.
fn rsi(closes: &[f64], period: usize) -> Option<f64> {
    let mut gains = Vec::with_capacity(closes.len());
    let mut losses = Vec::with_capacity(closes.len());
    gains.push(0.0);
    losses.push(0.0);
    for pair in closes.windows(2) {
        let delta = pair[1] - pair[0];
        gains.push(delta.max(0.0));
        losses.push((-delta).max(0.0));
    }

    let avg_gain = rolling::sma_last(&gains, period)?;
    let avg_loss = rolling::sma_last(&losses, period)?;
    let rs = avg_gain / (avg_loss + RSI_EPSILON);
    Some(100.0 - 100.0 / (1.0 + rs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::test_support::series_from_closes;

    const TOL: f64 = 1e-9;

    fn ramp(n: usize) -> Vec<f64> {
        (0..n).map(|i| 100.0 + i as f64).collect()
    }

    /// Closes that alternate up and down so RSI sees both gains and losses.
    fn zigzag(n: usize) -> Vec<f64> {
        (0..n)
            .map(|i| if i % 2 == 0 { 100.0 } else { 103.0 })
            .collect()
    }

    #[test]
    fn test_sma_20_equals_mean_of_last_20_closes() {
        let closes = ramp(60);
        let series = series_from_closes("AAA", &closes);
        let snapshot = IndicatorSnapshot::compute(&series);

        let expected: f64 = closes[40..].iter().sum::<f64>() / 20.0;
        assert!((snapshot.sma_20.unwrap() - expected).abs() < TOL);
        assert!(snapshot.sma_50.is_some());
        assert_eq!(snapshot.sma_100, None);
        assert_eq!(snapshot.sma_200, None);
    }

    #[test]
    fn test_five_bars_partial_window_rule() {
        // SMA(20) is unavailable while the 52-week extrema still resolve.
        let series = series_from_closes("BBB", &[10.0, 11.0, 12.0, 11.0, 13.0]);
        let snapshot = IndicatorSnapshot::compute(&series);

        assert_eq!(snapshot.sma_20, None);
        assert_eq!(snapshot.bollinger_upper, None);
        assert_eq!(snapshot.rsi_14, None);
        // highs are close + 1.0 in the fixture
        assert!((snapshot.high_52w - 14.0).abs() < TOL);
        assert!((snapshot.low_52w - 9.0).abs() < TOL);
        assert!((snapshot.current_price - 13.0).abs() < TOL);
    }

    #[test]
    fn test_52_week_high_dominates_trailing_highs() {
        let closes = zigzag(300);
        let series = series_from_closes("CCC", &closes);
        let snapshot = IndicatorSnapshot::compute(&series);

        let bars = series.bars();
        let tail = &bars[bars.len() - TRADING_DAYS_PER_YEAR..];
        assert!(tail.iter().all(|b| snapshot.high_52w >= b.high));
        assert!(tail.iter().all(|b| snapshot.low_52w <= b.low));
    }

    #[test]
    fn test_rsi_bounded_with_mixed_moves() {
        let series = series_from_closes("DDD", &zigzag(15));
        let snapshot = IndicatorSnapshot::compute(&series);

        let rsi = snapshot.rsi_14.unwrap();
        assert!((0.0..=100.0).contains(&rsi), "RSI out of range: {rsi}");
    }

    #[test]
    fn test_rsi_all_gains_approaches_100() {
        let series = series_from_closes("EEE", &ramp(30));
        let rsi = IndicatorSnapshot::compute(&series).rsi_14.unwrap();
        assert!(rsi > 99.0);
        assert!(rsi <= 100.0);
    }

    #[test]
    fn test_volatility_zero_for_constant_prices() {
        let series = series_from_closes("FFF", &[50.0; 30]);
        let vol = IndicatorSnapshot::compute(&series)
            .annualized_volatility
            .unwrap();
        assert!(vol.abs() < TOL);
    }

    #[test]
    fn test_volatility_positive_when_prices_move() {
        let series = series_from_closes("GGG", &zigzag(10));
        let vol = IndicatorSnapshot::compute(&series)
            .annualized_volatility
            .unwrap();
        assert!(vol > 0.0);
    }

    #[test]
    fn test_volatility_unavailable_for_single_bar() {
        let series = series_from_closes("HHH", &[42.0]);
        let snapshot = IndicatorSnapshot::compute(&series);
        assert_eq!(snapshot.annualized_volatility, None);
        // EWMA family is seeded by the single close.
        assert!((snapshot.ema_20 - 42.0).abs() < TOL);
        assert!((snapshot.macd - 0.0).abs() < TOL);
    }

    #[test]
    fn test_macd_signal_smooths_macd_line() {
        let series = series_from_closes("III", &ramp(40));
        let snapshot = IndicatorSnapshot::compute(&series);
        // On a steady uptrend the fast EWMA leads the slow one.
        assert!(snapshot.macd > 0.0);
        // The signal lags the line it smooths.
        assert!(snapshot.macd_signal < snapshot.macd);
    }

    #[test]
    fn test_bollinger_bands_bracket_the_mean() {
        let series = series_from_closes("JJJ", &zigzag(25));
        let snapshot = IndicatorSnapshot::compute(&series);
        let upper = snapshot.bollinger_upper.unwrap();
        let lower = snapshot.bollinger_lower.unwrap();
        let mid = snapshot.sma_20.unwrap();
        assert!(lower < mid && mid < upper);
        assert!(((upper - mid) - (mid - lower)).abs() < TOL);
    }
}
