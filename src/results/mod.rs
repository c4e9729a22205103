//! Batch results: filtering, summaries, history status, and export.

pub mod filter;
pub mod summary;

pub use filter::{ResultFilter, RiskFilter, StatusFilter};
pub use summary::{BatchHealth, BatchSummary, ValidEmailExport};
