//! Account overview module
//!
//! Provides the transaction overview: daily income and expense totals for a
//! selectable date range, shown as a card with a bar chart or served as JSON.

mod aggregation;
mod card;
mod charts;
mod handlers;

pub use aggregation::{Aggregation, DailyBucket, Totals, aggregate};
pub use handlers::{AccountSummary, SummaryTotals, get_account_page, get_account_summary};
