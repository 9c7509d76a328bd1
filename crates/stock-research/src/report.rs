//! Report rendering: turns the research bundle into analyst-tone text.
//!
//! Formatting rules: price-like fields print with two decimals, rates
//! print as percentages with two decimals, and anything not available
//! prints as `N/A`. A failed section renders its domain message (missing
//! data, unresolved slug) or a generic internal-error line; the error
//! details go to the log, not the report.

use std::fmt::Write as _;

use crate::analysis::technical::{interpret_rsi, price_vs_average};
use crate::analysis::{FundamentalAnalysis, NewsAnalysis, TechnicalAnalysis, fundamental};
use crate::error::{ResearchError, Result};
use crate::pipeline::ResearchBundle;

/// Generic line used for unexpected section failures.
pub const INTERNAL_ERROR_LINE: &str =
    "An internal error occurred. Please check the logs for details.";

/// Format an optional price-like value with two decimals.
fn fmt_value(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.2}"),
        None => "N/A".to_string(),
    }
}

/// Format an optional rate as a percentage with two decimals.
fn fmt_percent(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}%", v * 100.0),
        None => "N/A".to_string(),
    }
}

/// Render the technical section.
pub fn render_technical(analysis: &TechnicalAnalysis) -> String {
    let s = &analysis.snapshot;
    let mut out = String::new();

    let _ = writeln!(out, "Yahoo Finance Technicals for {}", analysis.symbol);
    let _ = writeln!(out);
    let _ = writeln!(out, "Report Date: {}", analysis.report_date);
    let _ = writeln!(out);
    let _ = writeln!(out, "Current Price: {:.2}", s.current_price);
    let _ = writeln!(out);
    let _ = writeln!(out, "Price Action Metrics:");
    let _ = writeln!(out, "- 52-Week High: {:.2}", s.high_52w);
    let _ = writeln!(out, "- 52-Week Low: {:.2}", s.low_52w);
    let _ = writeln!(out, "- Recent 20-Day High: {:.2}", s.recent_high);
    let _ = writeln!(out, "- Recent 20-Day Low: {:.2}", s.recent_low);
    let _ = writeln!(
        out,
        "- Annualized Volatility: {}",
        fmt_percent(s.annualized_volatility)
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "Key Technical Indicators (latest):");
    let _ = writeln!(out, "- SMA(20): {}", fmt_value(s.sma_20));
    let _ = writeln!(out, "- SMA(50): {}", fmt_value(s.sma_50));
    let _ = writeln!(out, "- SMA(100): {}", fmt_value(s.sma_100));
    let _ = writeln!(out, "- SMA(200): {}", fmt_value(s.sma_200));
    let _ = writeln!(out, "- EMA(20): {:.2}", s.ema_20);
    let _ = writeln!(out, "- EMA(50): {:.2}", s.ema_50);
    let _ = writeln!(out, "- EMA(100): {:.2}", s.ema_100);
    let _ = writeln!(out, "- EMA(200): {:.2}", s.ema_200);
    match s.rsi_14 {
        Some(rsi) => {
            let _ = writeln!(out, "- RSI(14): {:.2} ({})", rsi, interpret_rsi(rsi));
        }
        None => {
            let _ = writeln!(out, "- RSI(14): N/A");
        }
    }
    let _ = writeln!(
        out,
        "- MACD: {:.2} (Signal: {:.2})",
        s.macd, s.macd_signal
    );
    let _ = writeln!(
        out,
        "- Bollinger Bands: Upper {}, Lower {}",
        fmt_value(s.bollinger_upper),
        fmt_value(s.bollinger_lower)
    );
    if let Some(position) = price_vs_average(s.current_price, s.sma_200) {
        let _ = writeln!(out, "- Price is {position} the 200-day SMA");
    }
    let _ = writeln!(out);
    let _ = write!(out, "Based on {} daily bars.", analysis.bar_count);

    out
}

/// Render the fundamental section.
pub fn render_fundamental(analysis: &FundamentalAnalysis) -> String {
    let c = &analysis.company;
    let mut out = String::new();

    let _ = writeln!(out, "Yahoo Finance Fundamentals for {}", c.symbol);
    let _ = writeln!(out);
    let _ = writeln!(out, "Company: {}", c.name.as_deref().unwrap_or("N/A"));
    let _ = writeln!(
        out,
        "Market Cap: {}",
        c.market_cap
            .map_or_else(|| "N/A".to_string(), fundamental::format_market_cap)
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "Key Ratios:");
    match c.pe_ratio {
        Some(pe) => {
            let _ = writeln!(
                out,
                "- P/E Ratio: {:.2} - {}",
                pe,
                fundamental::interpret_pe(pe)
            );
        }
        None => {
            let _ = writeln!(out, "- P/E Ratio: N/A");
        }
    }
    let _ = writeln!(out, "- P/B Ratio: {}", fmt_value(c.pb_ratio));
    let _ = writeln!(out, "- Debt-to-Equity: {}", fmt_value(c.debt_to_equity));
    let _ = writeln!(out, "- ROCE: {}", fmt_value(c.roce));
    let _ = writeln!(out, "- Dividend Yield: {}", fmt_percent(c.dividend_yield));
    let _ = write!(out, "- EPS: {}", fmt_value(c.eps));

    out
}

/// Render the news section.
pub fn render_news(analysis: &NewsAnalysis) -> String {
    if analysis.is_empty() {
        return format!("No news found for {} on Moneycontrol.", analysis.symbol);
    }

    let mut out = String::new();
    let _ = writeln!(out, "Moneycontrol News for {}", analysis.symbol);
    let _ = writeln!(out);
    let _ = writeln!(out, "Recent News Headlines:");
    for item in &analysis.items {
        let _ = writeln!(out, "- {}: {}", item.date, item.headline);
        if !item.summary.is_empty() {
            let _ = writeln!(out, "  {}", item.summary);
        }
    }

    out.trim_end().to_string()
}

/// Render a section result, mapping failures per their kind.
fn render_section<T>(result: &Result<T>, render: impl FnOnce(&T) -> String) -> String {
    match result {
        Ok(value) => render(value),
        Err(e @ (ResearchError::NoData { .. } | ResearchError::SlugUnresolved { .. })) => {
            format!("{e}.")
        }
        Err(e) => {
            tracing::error!(error = %e, "report section failed");
            INTERNAL_ERROR_LINE.to_string()
        }
    }
}

/// Compile the final report from a research bundle.
pub fn compile(bundle: &ResearchBundle) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "# Stock Research Report: {}", bundle.symbol);
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Generated: {}",
        bundle.generated_at.format("%Y-%m-%d %H:%M UTC")
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "## Technical Analysis");
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", render_section(&bundle.technical, render_technical));
    let _ = writeln!(out, "## Fundamental Analysis");
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "{}",
        render_section(&bundle.fundamental, render_fundamental)
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "## Market News");
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", render_section(&bundle.news, render_news));

    out
}
