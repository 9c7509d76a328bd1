//! Fundamental analysis step output

use serde::{Deserialize, Serialize};

use crate::api::CompanySnapshot;

/// Result of the fundamental step
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FundamentalAnalysis {
    pub company: CompanySnapshot,
}

impl FundamentalAnalysis {
    pub fn new(company: CompanySnapshot) -> Self {
        Self { company }
    }

    /// Company name for downstream steps, when the provider knew it.
    pub fn company_name(&self) -> Option<&str> {
        self.company.name.as_deref()
    }
}

/// Format market cap in human-readable form
pub fn format_market_cap(cap: f64) -> String {
    if cap >= 1_000_000_000_000.0 {
        format!("{:.2}T", cap / 1_000_000_000_000.0)
    } else if cap >= 1_000_000_000.0 {
        format!("{:.2}B", cap / 1_000_000_000.0)
    } else if cap >= 1_000_000.0 {
        format!("{:.2}M", cap / 1_000_000.0)
    } else {
        format!("{cap:.2}")
    }
}

/// Interpret a P/E ratio
pub fn interpret_pe(pe: f64) -> &'static str {
    if pe < 0.0 {
        "Negative (company is not profitable)"
    } else if pe < 15.0 {
        "Low (potentially undervalued or slow growth)"
    } else if pe < 25.0 {
        "Moderate (fairly valued)"
    } else if pe < 50.0 {
        "High (potentially overvalued or high growth)"
    } else {
        "Very High (very expensive or very high growth expectations)"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> CompanySnapshot {
        CompanySnapshot {
            symbol: "RELIANCE.NS".to_string(),
            name: Some("Reliance Industries".to_string()),
            market_cap: Some(2.0e13),
            pe_ratio: Some(28.4),
            pb_ratio: Some(2.1),
            debt_to_equity: Some(41.2),
            roce: None,
            dividend_yield: Some(0.0035),
            eps: Some(102.5),
        }
    }

    #[test]
    fn test_company_name() {
        let analysis = FundamentalAnalysis::new(snapshot());
        assert_eq!(analysis.company_name(), Some("Reliance Industries"));
    }

    #[test]
    fn test_format_market_cap() {
        assert_eq!(format_market_cap(1_500_000_000_000.0), "1.50T");
        assert_eq!(format_market_cap(50_000_000_000.0), "50.00B");
        assert_eq!(format_market_cap(250_000_000.0), "250.00M");
    }

    #[test]
    fn test_interpret_pe() {
        assert!(interpret_pe(-5.0).contains("Negative"));
        assert!(interpret_pe(10.0).contains("Low"));
        assert!(interpret_pe(20.0).contains("Moderate"));
        assert!(interpret_pe(35.0).contains("High"));
        assert!(interpret_pe(75.0).contains("Very High"));
    }
}
