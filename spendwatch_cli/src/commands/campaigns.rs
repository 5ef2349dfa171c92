use anyhow::{bail, Result};
use clap::Args;
use spendwatch_lib::validation;
use spendwatch_lib::{CampaignBreakdown, Client, DateRange, FetchPlan, SpendFetcher};

use crate::output::{
    format_money, print_campaigns_csv, print_campaigns_table, print_heading, print_json,
    OutputFormat,
};

#[derive(Args)]
pub struct CampaignsArgs {
    /// Month to inspect (YYYY-MM)
    #[arg(long, default_value = "2025-12")]
    pub month: String,

    /// Number of earliest days to list per campaign
    #[arg(long, default_value = "3")]
    pub preview_days: usize,
}

pub async fn run(
    args: &CampaignsArgs,
    client: Client,
    campaign: &str,
    format: &OutputFormat,
) -> Result<()> {
    let (year, month) = validation::validate_month(&args.month)?;
    let preview_days = validation::validate_preview_days(args.preview_days)?;

    let range = DateRange::month(year, month)?;
    let fetcher = SpendFetcher::new(client, FetchPlan::summary(campaign));
    let records = fetcher.fetch_or_empty(&range).await;

    let Some(breakdown) = CampaignBreakdown::from_records(range, &records, preview_days) else {
        bail!("No data for \"{}\" over {}", campaign, range);
    };

    match format {
        OutputFormat::Table => print_text(&breakdown, campaign, false),
        OutputFormat::Markdown => print_text(&breakdown, campaign, true),
        OutputFormat::Json => print_json(&breakdown)?,
        OutputFormat::Csv => print_campaigns_csv(&breakdown.campaigns)?,
    }

    Ok(())
}

fn print_text(breakdown: &CampaignBreakdown, campaign: &str, markdown: bool) {
    print_heading(&format!(
        "Per-campaign spend for \"{}\" over {}",
        campaign, breakdown.range
    ));
    println!("Records loaded: {}", breakdown.record_count);
    println!("Campaigns found: {}", breakdown.campaigns.len());
    println!();

    print_campaigns_table(&breakdown.campaigns, markdown);
    println!();
    println!("Grand total: {}", format_money(breakdown.grand_total));
}
