//! Report models for spend reconciliation runs.
//!
//! Everything here is a pure function of fetched records and the expected
//! figures the caller supplies. Rendering to text, tables or JSON happens
//! in the CLI; these types only carry the numbers.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use spendwatch_api::types::SpendRecord;

use crate::dedup::{self, CampaignSpend, DailySpend};
use crate::range::DateRange;

/// Absolute difference under which a computed total counts as matching.
pub const DEFAULT_TOLERANCE: Decimal = Decimal::ONE_HUNDRED;

/// Computed total checked against an expected figure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    pub actual: Decimal,
    pub expected: Decimal,
    /// `actual - expected`; negative when spend is under-reported.
    pub difference: Decimal,
    pub tolerance: Decimal,
    pub matches: bool,
}

impl Comparison {
    pub fn new(actual: Decimal, expected: Decimal, tolerance: Decimal) -> Self {
        let difference = actual - expected;
        Self {
            actual,
            expected,
            difference,
            tolerance,
            matches: difference.abs() < tolerance,
        }
    }
}

/// Deduplicated totals and day coverage for one queried date range.
#[derive(Debug, Clone, Serialize)]
pub struct RangeSummary {
    pub range: DateRange,
    pub record_count: usize,
    pub daily: DailySpend,
    pub total: Decimal,
    /// Sum of every row without deduplication.
    pub raw_total: Decimal,
    pub comparison: Comparison,
    /// Calendar days in `range` with no data, in order.
    pub missing_dates: Vec<NaiveDate>,
}

impl RangeSummary {
    /// Builds the summary, or `None` when there are no records to aggregate.
    pub fn from_records(
        range: DateRange,
        records: &[SpendRecord],
        expected: Decimal,
        tolerance: Decimal,
    ) -> Option<Self> {
        if records.is_empty() {
            return None;
        }
        let daily = dedup::daily_max(records);
        let total = dedup::total(&daily);
        Some(Self {
            range,
            record_count: records.len(),
            raw_total: dedup::raw_total(records),
            comparison: Comparison::new(total, expected, tolerance),
            missing_dates: missing_dates(&range, &daily),
            total,
            daily,
        })
    }

    pub fn day_count(&self) -> usize {
        self.daily.len()
    }

    pub fn expected_days(&self) -> usize {
        self.range.len_days()
    }

    pub fn is_complete(&self) -> bool {
        self.missing_dates.is_empty()
    }
}

/// Days of `range` that have no entry in `daily`.
pub fn missing_dates(range: &DateRange, daily: &DailySpend) -> Vec<NaiveDate> {
    range.days().filter(|d| !daily.contains_key(d)).collect()
}

/// Per-date integrity view over raw rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayDetail {
    pub date: NaiveDate,
    pub max_spend: Decimal,
    pub min_spend: Decimal,
    pub records: usize,
    pub distinct_skus: usize,
    /// All rows for the date carried the same spend. When false the
    /// duplicates disagree and the max-based total is suspect.
    pub all_identical: bool,
}

#[derive(Default)]
struct DayAccumulator<'a> {
    records: usize,
    skus: BTreeSet<&'a str>,
    max_spend: Option<Decimal>,
    min_spend: Option<Decimal>,
}

/// One [`DayDetail`] per date present in `records`, sorted by date.
pub fn day_details(records: &[SpendRecord]) -> Vec<DayDetail> {
    let mut by_date: BTreeMap<NaiveDate, DayAccumulator> = BTreeMap::new();
    for record in records {
        let acc = by_date.entry(record.stat_date).or_default();
        let spend = record.spend();
        acc.records += 1;
        if let Some(sku) = record.sku.as_deref() {
            acc.skus.insert(sku);
        }
        acc.max_spend = Some(acc.max_spend.map_or(spend, |m| m.max(spend)));
        acc.min_spend = Some(acc.min_spend.map_or(spend, |m| m.min(spend)));
    }
    by_date
        .into_iter()
        .map(|(date, acc)| {
            let max_spend = acc.max_spend.unwrap_or_default();
            let min_spend = acc.min_spend.unwrap_or_default();
            DayDetail {
                date,
                max_spend,
                min_spend,
                records: acc.records,
                distinct_skus: acc.skus.len(),
                all_identical: max_spend == min_spend,
            }
        })
        .collect()
}

/// Dates whose duplicate rows disagree on the daily spend.
pub fn inconsistent_days(details: &[DayDetail]) -> Vec<NaiveDate> {
    details
        .iter()
        .filter(|d| !d.all_identical)
        .map(|d| d.date)
        .collect()
}

/// Deduplicated totals for one campaign.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CampaignSummary {
    pub campaign_id: String,
    pub days: usize,
    pub total: Decimal,
    /// Earliest dates with their spend, limited to the preview length.
    pub first_days: Vec<(NaiveDate, Decimal)>,
}

/// Summarizes each campaign, keeping the first `preview_days` dates of each.
pub fn campaign_summaries(campaigns: &CampaignSpend, preview_days: usize) -> Vec<CampaignSummary> {
    campaigns
        .iter()
        .map(|(campaign_id, daily)| CampaignSummary {
            campaign_id: campaign_id.clone(),
            days: daily.len(),
            total: dedup::total(daily),
            first_days: daily
                .iter()
                .take(preview_days)
                .map(|(d, v)| (*d, *v))
                .collect(),
        })
        .collect()
}

/// Campaign-scoped reconciliation for one queried date range.
#[derive(Debug, Clone, Serialize)]
pub struct CampaignBreakdown {
    pub range: DateRange,
    pub record_count: usize,
    pub campaigns: Vec<CampaignSummary>,
    pub grand_total: Decimal,
}

impl CampaignBreakdown {
    /// Builds the breakdown, or `None` when there are no records to aggregate.
    pub fn from_records(
        range: DateRange,
        records: &[SpendRecord],
        preview_days: usize,
    ) -> Option<Self> {
        if records.is_empty() {
            return None;
        }
        let campaigns = dedup::campaign_daily_max(records);
        Some(Self {
            range,
            record_count: records.len(),
            grand_total: dedup::campaign_total(&campaigns),
            campaigns: campaign_summaries(&campaigns, preview_days),
        })
    }
}
