use std::fmt;

use chrono::NaiveDate;
use url::Url;

use super::common::{FilterOp, Query, QueryCommon};

/// Backend tables and views that expose spend records.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Resource {
    /// Raw per-SKU daily performance table.
    #[default]
    PerformanceDaily,
    /// Aggregating view over the daily table, as read by the dashboard.
    PerformanceSummary,
    /// Any other table or view name.
    Custom(String),
}

impl Resource {
    pub fn table(&self) -> &str {
        match self {
            Resource::PerformanceDaily => "ozon_performance_daily",
            Resource::PerformanceSummary => "ozon_performance_summary",
            Resource::Custom(name) => name.as_str(),
        }
    }

    /// Path of the resource below the API base URL.
    pub fn path(&self) -> String {
        format!("/rest/v1/{}", self.table())
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.table())
    }
}

/// Columns of a spend record that can be projected or ordered on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Column {
    CampaignId,
    CampaignName,
    StatDate,
    MoneySpent,
    Sku,
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Column::CampaignId => "campaign_id",
            Column::CampaignName => "campaign_name",
            Column::StatDate => "stat_date",
            Column::MoneySpent => "money_spent",
            Column::Sku => "sku",
        };
        write!(f, "{}", name)
    }
}

#[derive(Default)]
pub struct SpendQuery {
    pub common: QueryCommon,
    pub resource: Resource,
    pub campaign_name: Option<String>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub columns: Vec<Column>,
    pub order_by: Option<Column>,
}

impl Query for SpendQuery {
    fn get_common(&mut self) -> &mut QueryCommon {
        &mut self.common
    }
    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        if let Some(campaign_name) = &self.campaign_name {
            url.query_pairs_mut().append_pair(
                &Column::CampaignName.to_string(),
                &FilterOp::Eq.apply(campaign_name),
            );
        }
        if let Some(date_from) = self.date_from {
            url.query_pairs_mut().append_pair(
                &Column::StatDate.to_string(),
                &FilterOp::Gte.apply(&date_from.to_string()),
            );
        }
        if let Some(date_to) = self.date_to {
            url.query_pairs_mut().append_pair(
                &Column::StatDate.to_string(),
                &FilterOp::Lte.apply(&date_to.to_string()),
            );
        }
        if !self.columns.is_empty() {
            let select = self
                .columns
                .iter()
                .map(|c| c.to_string())
                .collect::<Vec<_>>()
                .join(",");
            url.query_pairs_mut().append_pair("select", &select);
        }
        if let Some(order_by) = self.order_by {
            url.query_pairs_mut().append_pair(
                "order",
                format!("{}.{}", order_by, self.common.sort_direction).as_str(),
            );
        }

        self.common.add_to_url(&url)
    }
}

impl SpendQuery {
    pub fn for_resource(resource: Resource) -> Self {
        Self {
            resource,
            ..Default::default()
        }
    }

    pub fn with_campaign_name(mut self, campaign_name: &str) -> Self {
        self.campaign_name = Some(campaign_name.to_string());
        self
    }

    pub fn with_date_from(mut self, date_from: NaiveDate) -> Self {
        self.date_from = Some(date_from);
        self
    }

    pub fn with_date_to(mut self, date_to: NaiveDate) -> Self {
        self.date_to = Some(date_to);
        self
    }

    pub fn with_column(mut self, column: Column) -> Self {
        self.columns.push(column);
        self
    }
    pub fn with_columns(mut self, columns: &[Column]) -> Self {
        self.columns.extend_from_slice(columns);
        self
    }

    pub fn with_order(mut self, column: Column) -> Self {
        self.order_by = Some(column);
        self
    }
}
