//! Library layer for spendwatch: fetching, deduplication and reconciliation reports.
//!
//! Wraps the `spendwatch_api` client with a fetcher that scopes queries to
//! one campaign and date range, and provides pure functions that collapse
//! duplicated spend rows and compare the result against expected totals.

pub mod dedup;
pub mod error;
pub mod fetcher;
pub mod range;
pub mod report;
pub mod validation;

pub use spendwatch_api;
pub use spendwatch_api::types;
pub use spendwatch_api::{Client, Column, Credentials, Resource};

pub use dedup::{CampaignSpend, DailySpend};
pub use error::SpendwatchError;
pub use fetcher::{FetchPlan, SpendFetcher, DEFAULT_CAMPAIGN_NAME};
pub use range::DateRange;
pub use report::{CampaignBreakdown, Comparison, DayDetail, RangeSummary, DEFAULT_TOLERANCE};
