//! Typed outputs of the research steps

pub mod fundamental;
pub mod news;
pub mod technical;

pub use fundamental::FundamentalAnalysis;
pub use news::NewsAnalysis;
pub use technical::TechnicalAnalysis;
