pub mod analyzer;
pub mod extract;
pub mod types;

pub use analyzer::MatchAnalyzer;
