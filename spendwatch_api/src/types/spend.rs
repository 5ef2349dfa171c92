use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{de, Deserialize, Deserializer, Serialize};

extern crate serde_json;

/// Grouping key for records that carry no campaign identifier.
pub const NO_CAMPAIGN: &str = "__NO_CAMPAIGN__";

/// One row of advertising spend as returned by the backend.
///
/// Every column except `stat_date` may be absent from the projection or
/// `null` in the row. Identifiers arrive as strings or bare numbers
/// depending on the resource, so both are accepted and normalized to
/// strings; empty strings count as absent.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SpendRecord {
    pub stat_date: NaiveDate,

    #[serde(default)]
    pub money_spent: Option<Decimal>,

    #[serde(default, deserialize_with = "string_or_number")]
    pub sku: Option<String>,

    #[serde(default, deserialize_with = "string_or_number")]
    pub campaign_id: Option<String>,

    #[serde(default)]
    pub campaign_name: Option<String>,
}

impl SpendRecord {
    pub fn new(stat_date: NaiveDate, money_spent: Option<Decimal>) -> Self {
        Self {
            stat_date,
            money_spent,
            sku: None,
            campaign_id: None,
            campaign_name: None,
        }
    }

    pub fn with_sku(mut self, sku: &str) -> Self {
        self.sku = Some(sku.to_string());
        self
    }

    pub fn with_campaign_id(mut self, campaign_id: &str) -> Self {
        self.campaign_id = Some(campaign_id.to_string()).filter(|id| !id.is_empty());
        self
    }

    pub fn with_campaign_name(mut self, campaign_name: &str) -> Self {
        self.campaign_name = Some(campaign_name.to_string());
        self
    }

    /// Spend for the row, with a missing value counted as zero.
    pub fn spend(&self) -> Decimal {
        self.money_spent.unwrap_or(Decimal::ZERO)
    }

    /// Campaign identifier, or [`NO_CAMPAIGN`] when the row has none.
    pub fn campaign_key(&self) -> &str {
        self.campaign_id.as_deref().unwrap_or(NO_CAMPAIGN)
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<serde_json::Value>::deserialize(deserializer)? {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(serde_json::Value::String(s)) => Ok(Some(s)),
        Some(serde_json::Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(de::Error::custom(format!(
            "expected string or number, got {}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_spend_counts_as_zero() {
        let record: SpendRecord = serde_json::from_str(r#"{"stat_date": "2025-12-01"}"#).unwrap();
        assert_eq!(record.money_spent, None);
        assert_eq!(record.spend(), Decimal::ZERO);
    }

    #[test]
    fn spend_accepts_string_and_number() {
        let from_str: SpendRecord =
            serde_json::from_str(r#"{"stat_date": "2025-12-01", "money_spent": "3487.73"}"#)
                .unwrap();
        let from_num: SpendRecord =
            serde_json::from_str(r#"{"stat_date": "2025-12-01", "money_spent": 3487.73}"#)
                .unwrap();
        assert_eq!(from_str.spend(), Decimal::new(348773, 2));
        assert_eq!(from_num.spend(), Decimal::new(348773, 2));
    }

    #[test]
    fn numeric_campaign_id_becomes_string() {
        let record: SpendRecord = serde_json::from_str(
            r#"{"stat_date": "2025-12-01", "campaign_id": 11033377, "sku": 1788047372}"#,
        )
        .unwrap();
        assert_eq!(record.campaign_id.as_deref(), Some("11033377"));
        assert_eq!(record.sku.as_deref(), Some("1788047372"));
        assert_eq!(record.campaign_key(), "11033377");
    }

    #[test]
    fn empty_or_null_campaign_uses_sentinel() {
        let empty: SpendRecord =
            serde_json::from_str(r#"{"stat_date": "2025-12-01", "campaign_id": ""}"#).unwrap();
        let null: SpendRecord =
            serde_json::from_str(r#"{"stat_date": "2025-12-01", "campaign_id": null}"#).unwrap();
        assert_eq!(empty.campaign_key(), NO_CAMPAIGN);
        assert_eq!(null.campaign_key(), NO_CAMPAIGN);
        assert_eq!(
            SpendRecord::new(empty.stat_date, None)
                .with_campaign_id("")
                .campaign_key(),
            NO_CAMPAIGN
        );
    }

    #[test]
    fn boolean_campaign_id_is_rejected() {
        let result = serde_json::from_str::<SpendRecord>(
            r#"{"stat_date": "2025-12-01", "campaign_id": true}"#,
        );
        assert!(result.is_err());
    }
}
