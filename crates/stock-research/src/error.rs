//! Error types for stock research operations

use thiserror::Error;

/// Stock research specific errors
#[derive(Debug, Error)]
pub enum ResearchError {
    /// The provider returned no bars for the symbol
    #[error("No historical data found for {symbol}")]
    NoData { symbol: String },

    /// Invalid stock symbol or request parameter
    #[error("Invalid symbol: {0}")]
    InvalidSymbol(String),

    /// Invalid history range string
    #[error("Invalid range: {0}")]
    InvalidRange(String),

    /// Yahoo Finance API error
    #[error("Yahoo Finance error: {0}")]
    YahooFinance(String),

    /// Moneycontrol slug could not be resolved for the symbol
    #[error("Could not resolve Moneycontrol slug for symbol {symbol}")]
    SlugUnresolved { symbol: String },

    /// Upstream endpoint answered with a non-success status
    #[error("{provider} returned HTTP {status}")]
    UpstreamStatus { provider: String, status: u16 },

    /// Network or HTTP error
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

/// Result type alias for stock research operations
pub type Result<T> = std::result::Result<T, ResearchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ResearchError::InvalidSymbol("INVALID".to_string());
        assert_eq!(err.to_string(), "Invalid symbol: INVALID");

        let err = ResearchError::NoData {
            symbol: "RELIANCE.NS".to_string(),
        };
        assert_eq!(err.to_string(), "No historical data found for RELIANCE.NS");

        let err = ResearchError::SlugUnresolved {
            symbol: "TCS.NS".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Could not resolve Moneycontrol slug for symbol TCS.NS"
        );
    }

    #[test]
    fn test_upstream_status_display() {
        let err = ResearchError::UpstreamStatus {
            provider: "Moneycontrol".to_string(),
            status: 503,
        };
        assert_eq!(err.to_string(), "Moneycontrol returned HTTP 503");
    }
}
