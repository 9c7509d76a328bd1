//! Rolling-window and exponentially-weighted primitives over price slices.
//!
//! Window conventions match the usual dataframe semantics: a simple moving
//! statistic is undefined until its window is full, while the trailing
//! extrema accept partial windows from the first observation
//! (`min_periods = 1`). Standard deviations are sample deviations
//! (`ddof = 1`).

/// Mean of the trailing `window` values, `None` until the window is full.
pub fn sma_last(values: &[f64], window: usize) -> Option<f64> {
    if window == 0 || values.len() < window {
        return None;
    }
    let tail = &values[values.len() - window..];
    Some(tail.iter().sum::<f64>() / window as f64)
}

/// Sample standard deviation of the trailing `window` values, `None` until
/// the window is full.
pub fn rolling_std_last(values: &[f64], window: usize) -> Option<f64> {
    if window < 2 || values.len() < window {
        return None;
    }
    sample_std(&values[values.len() - window..])
}

/// Maximum of the trailing `window` values, partial windows allowed.
///
/// Returns `None` only for an empty slice.
pub fn trailing_max(values: &[f64], window: usize) -> Option<f64> {
    let start = values.len().saturating_sub(window);
    values[start..].iter().copied().reduce(f64::max)
}

/// Minimum of the trailing `window` values, partial windows allowed.
pub fn trailing_min(values: &[f64], window: usize) -> Option<f64> {
    let start = values.len().saturating_sub(window);
    values[start..].iter().copied().reduce(f64::min)
}

/// Recursive exponentially weighted moving average with smoothing factor
/// `alpha = 2 / (span + 1)`, seeded by the first value.
pub fn ewma(values: &[f64], span: usize) -> Vec<f64> {
    let alpha = 2.0 / (span as f64 + 1.0);
    let mut out = Vec::with_capacity(values.len());
    let mut prev: Option<f64> = None;
    for &value in values {
        let next = match prev {
            None => value,
            Some(prev) => alpha * value + (1.0 - alpha) * prev,
        };
        out.push(next);
        prev = Some(next);
    }
    out
}

/// Latest EWMA value, `None` for an empty slice.
pub fn ewma_last(values: &[f64], span: usize) -> Option<f64> {
    ewma(values, span).last().copied()
}

/// Day-over-day percentage changes; one element shorter than the input.
pub fn pct_changes(values: &[f64]) -> Vec<f64> {
    values
        .windows(2)
        .map(|pair| pair[1] / pair[0] - 1.0)
        .collect()
}

/// Sample standard deviation (`ddof = 1`), `None` for fewer than two values.
pub fn sample_std(values: &[f64]) -> Option<f64> {
    let n = values.len();
    if n < 2 {
        return None;
    }
    let mean = values.iter().sum::<f64>() / n as f64;
    let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
    Some(var.sqrt())
}
