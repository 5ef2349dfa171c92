//! Deduplication helpers that collapse repeated spend rows.
//!
//! The backend repeats a campaign's full daily spend on every SKU row for
//! that day, so summing rows overstates spend. These functions keep the
//! largest value seen per date (or per campaign and date). They operate on
//! slices of upstream `SpendRecord` types and do not perform network calls.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use spendwatch_api::types::SpendRecord;

/// Date to the maximum spend recorded for that date.
pub type DailySpend = BTreeMap<NaiveDate, Decimal>;

/// Campaign key to its own [`DailySpend`].
pub type CampaignSpend = BTreeMap<String, DailySpend>;

/// Folds `(key, value)` pairs into one entry per key holding the largest value.
pub fn max_per_key<K, I>(pairs: I) -> BTreeMap<K, Decimal>
where
    K: Ord,
    I: IntoIterator<Item = (K, Decimal)>,
{
    let mut map: BTreeMap<K, Decimal> = BTreeMap::new();
    for (key, value) in pairs {
        map.entry(key)
            .and_modify(|current| *current = (*current).max(value))
            .or_insert(value);
    }
    map
}

/// Maximum spend per date. Rows without a spend value count as zero.
pub fn daily_max(records: &[SpendRecord]) -> DailySpend {
    max_per_key(records.iter().map(|r| (r.stat_date, r.spend())))
}

/// Maximum spend per (campaign, date). Rows without a campaign identifier
/// are grouped under [`spendwatch_api::types::NO_CAMPAIGN`].
pub fn campaign_daily_max(records: &[SpendRecord]) -> CampaignSpend {
    let mut by_campaign: BTreeMap<&str, Vec<(NaiveDate, Decimal)>> = BTreeMap::new();
    for record in records {
        by_campaign
            .entry(record.campaign_key())
            .or_default()
            .push((record.stat_date, record.spend()));
    }
    by_campaign
        .into_iter()
        .map(|(campaign, pairs)| (campaign.to_string(), max_per_key(pairs)))
        .collect()
}

/// Sums the deduplicated daily values.
pub fn total(daily: &DailySpend) -> Decimal {
    daily.values().sum()
}

/// Sums the deduplicated daily values across every campaign.
pub fn campaign_total(campaigns: &CampaignSpend) -> Decimal {
    campaigns.values().map(total).sum()
}

/// Sums every row as-is, without deduplication.
pub fn raw_total(records: &[SpendRecord]) -> Decimal {
    records.iter().map(SpendRecord::spend).sum()
}
