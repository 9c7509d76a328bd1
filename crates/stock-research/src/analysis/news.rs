//! News analysis step output

use serde::{Deserialize, Serialize};

use crate::api::NewsItem;

/// Result of the news step
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsAnalysis {
    pub symbol: String,
    pub items: Vec<NewsItem>,
}

impl NewsAnalysis {
    pub fn new(symbol: impl Into<String>, items: Vec<NewsItem>) -> Self {
        Self {
            symbol: symbol.into(),
            items,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
