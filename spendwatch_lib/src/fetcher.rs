//! Fetching spend records for one campaign over a date range.

use spendwatch_api::types::SpendRecord;
use spendwatch_api::{Client, Column, Query, Resource, SortDirection, SpendQuery};

use crate::error::SpendwatchError;
use crate::range::DateRange;

/// Campaign whose dashboard totals are under investigation.
pub const DEFAULT_CAMPAIGN_NAME: &str = "Кабель КГ 2*2,5";

/// Which resource to read, which campaign to filter on and which columns to project.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchPlan {
    pub resource: Resource,
    pub campaign_name: String,
    pub columns: Vec<Column>,
}

impl FetchPlan {
    /// Raw per-SKU rows from the daily performance table.
    pub fn daily(campaign_name: &str) -> Self {
        Self {
            resource: Resource::PerformanceDaily,
            campaign_name: campaign_name.to_string(),
            columns: vec![
                Column::StatDate,
                Column::MoneySpent,
                Column::Sku,
                Column::CampaignId,
            ],
        }
    }

    /// Rows from the summary view, the same query the dashboard issues.
    pub fn summary(campaign_name: &str) -> Self {
        Self {
            resource: Resource::PerformanceSummary,
            campaign_name: campaign_name.to_string(),
            columns: vec![
                Column::CampaignId,
                Column::CampaignName,
                Column::StatDate,
                Column::MoneySpent,
                Column::Sku,
            ],
        }
    }

    /// Builds the query for `range`, ordered by date ascending.
    pub fn query(&self, range: &DateRange) -> SpendQuery {
        SpendQuery::for_resource(self.resource.clone())
            .with_campaign_name(&self.campaign_name)
            .with_date_from(range.from())
            .with_date_to(range.to())
            .with_columns(&self.columns)
            .with_order(Column::StatDate)
            .with_sort_direction(SortDirection::Asc)
    }
}

/// Runs a [`FetchPlan`] against the backend, one request per call.
pub struct SpendFetcher {
    inner: Client,
    plan: FetchPlan,
}

impl SpendFetcher {
    pub fn new(client: Client, plan: FetchPlan) -> Self {
        Self {
            inner: client,
            plan,
        }
    }

    pub fn plan(&self) -> &FetchPlan {
        &self.plan
    }

    /// Fetches the rows for `range`, keeping request failures distinct from
    /// an empty result.
    pub async fn try_fetch(&self, range: &DateRange) -> Result<Vec<SpendRecord>, SpendwatchError> {
        let query = self.plan.query(range);
        let records = self.inner.get_spend_records(&query).await?;
        tracing::debug!(
            "Fetched {} rows from {} for {}",
            records.len(),
            self.plan.resource,
            range
        );
        Ok(records)
    }

    /// Fetches the rows for `range`, reducing any failure to an empty list.
    ///
    /// The failure is logged, but callers see the same empty result they
    /// would get when no rows match; use [`SpendFetcher::try_fetch`] to tell
    /// the two apart.
    pub async fn fetch_or_empty(&self, range: &DateRange) -> Vec<SpendRecord> {
        match self.try_fetch(range).await {
            Ok(records) => records,
            Err(e) => {
                tracing::error!("Request for {} over {} failed: {}", self.plan.resource, range, e);
                Vec::new()
            }
        }
    }
}
