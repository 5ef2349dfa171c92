use std::io::Write;

use anyhow::Result;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use spendwatch_lib::dedup::DailySpend;
use spendwatch_lib::report::CampaignSummary;
use spendwatch_lib::{Comparison, DayDetail};
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Clone, Debug)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
    Markdown,
}

#[derive(Tabled, Serialize)]
struct DayRow {
    #[tabled(rename = "#")]
    #[serde(rename = "#")]
    index: usize,
    #[tabled(rename = "Date")]
    #[serde(rename = "Date")]
    date: String,
    #[tabled(rename = "Spend (₽)")]
    #[serde(rename = "Spend")]
    spend: String,
}

#[derive(Tabled, Serialize)]
struct DetailRow {
    #[tabled(rename = "Date")]
    #[serde(rename = "Date")]
    date: String,
    #[tabled(rename = "Spend (₽)")]
    #[serde(rename = "Spend")]
    spend: String,
    #[tabled(rename = "Records")]
    #[serde(rename = "Records")]
    records: usize,
    #[tabled(rename = "SKU")]
    #[serde(rename = "SKU")]
    skus: usize,
    #[tabled(rename = "All identical?")]
    #[serde(rename = "All identical?")]
    identical: String,
}

#[derive(Tabled, Serialize)]
struct CampaignRow {
    #[tabled(rename = "Campaign")]
    #[serde(rename = "Campaign")]
    campaign_id: String,
    #[tabled(rename = "Days")]
    #[serde(rename = "Days")]
    days: usize,
    #[tabled(rename = "Total (₽)")]
    #[serde(rename = "Total")]
    total: String,
    #[tabled(rename = "First days")]
    #[serde(rename = "First days")]
    first_days: String,
}

// -- Row builders --

fn build_day_rows(daily: &DailySpend) -> Vec<DayRow> {
    daily
        .iter()
        .enumerate()
        .map(|(i, (date, spend))| DayRow {
            index: i + 1,
            date: date.to_string(),
            spend: format_amount(*spend),
        })
        .collect()
}

fn build_detail_rows(details: &[DayDetail]) -> Vec<DetailRow> {
    details
        .iter()
        .map(|d| DetailRow {
            date: d.date.to_string(),
            spend: format_amount(d.max_spend),
            records: d.records,
            skus: d.distinct_skus,
            identical: check_mark(d.all_identical).to_string(),
        })
        .collect()
}

fn build_campaign_rows(campaigns: &[CampaignSummary]) -> Vec<CampaignRow> {
    campaigns
        .iter()
        .map(|c| CampaignRow {
            campaign_id: c.campaign_id.clone(),
            days: c.days,
            total: format_amount(c.total),
            first_days: c
                .first_days
                .iter()
                .map(|(date, spend)| format!("{}: {}", date, format_amount(*spend)))
                .collect::<Vec<_>>()
                .join("; "),
        })
        .collect()
}

// -- Tables --

fn render_table<T: Tabled>(rows: Vec<T>, markdown: bool) -> String {
    let mut table = Table::new(rows);
    if markdown {
        table.with(Style::markdown());
    }
    table.to_string()
}

pub fn print_days_table(daily: &DailySpend, markdown: bool) {
    println!("{}", render_table(build_day_rows(daily), markdown));
}

pub fn print_details_table(details: &[DayDetail], markdown: bool) {
    println!("{}", render_table(build_detail_rows(details), markdown));
}

pub fn print_campaigns_table(campaigns: &[CampaignSummary], markdown: bool) {
    println!("{}", render_table(build_campaign_rows(campaigns), markdown));
}

// -- CSV output --

fn write_csv<T: Serialize, W: Write>(rows: Vec<T>, writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn print_days_csv(daily: &DailySpend) -> Result<()> {
    write_csv(build_day_rows(daily), std::io::stdout())
}

pub fn print_details_csv(details: &[DayDetail]) -> Result<()> {
    write_csv(build_detail_rows(details), std::io::stdout())
}

pub fn print_campaigns_csv(campaigns: &[CampaignSummary]) -> Result<()> {
    write_csv(build_campaign_rows(campaigns), std::io::stdout())
}

// -- JSON output --

pub fn print_json<T: serde::Serialize>(data: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(data)?);
    Ok(())
}

// -- Text helpers --

/// Two decimal places, half away from zero, no grouping.
pub fn format_amount(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.2}", rounded)
}

pub fn format_money(value: Decimal) -> String {
    format!("{} ₽", format_amount(value))
}

pub fn check_mark(ok: bool) -> &'static str {
    if ok {
        "✅"
    } else {
        "❌"
    }
}

/// Lines describing a computed total against its expected value.
pub fn comparison_lines(comparison: &Comparison) -> Vec<String> {
    vec![
        format!("Total: {}", format_money(comparison.actual)),
        format!("Expected: ~{}", format_money(comparison.expected)),
        format!("Difference: {}", format_money(comparison.difference)),
        format!(
            "Matches: {} {}",
            check_mark(comparison.matches),
            if comparison.matches { "yes" } else { "no" }
        ),
    ]
}

pub fn print_heading(title: &str) {
    println!("{}", title);
    println!("{}", "-".repeat(title.chars().count()));
}
