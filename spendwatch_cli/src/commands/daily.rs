use anyhow::Result;
use chrono::NaiveDate;
use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;
use spendwatch_lib::report::{day_details, inconsistent_days};
use spendwatch_lib::validation;
use spendwatch_lib::{Client, DateRange, DayDetail, FetchPlan, RangeSummary, SpendFetcher};

use crate::output::{
    check_mark, comparison_lines, format_money, print_days_csv, print_days_table,
    print_details_csv, print_details_table, print_heading, print_json, OutputFormat,
};

#[derive(Args)]
pub struct DailyArgs {
    /// Month to inspect (YYYY-MM)
    #[arg(long, default_value = "2025-12")]
    pub month: String,

    /// Length of the first pass, counted from the 1st of the month
    #[arg(long, default_value = "7")]
    pub week_days: u32,

    /// Dashboard total expected for the first pass
    #[arg(long, default_value = "24428")]
    pub week_expected: Decimal,

    /// Dashboard total expected for the whole month
    #[arg(long, default_value = "109130")]
    pub month_expected: Decimal,

    /// Absolute difference still counted as a match
    #[arg(long, default_value = "100")]
    pub tolerance: Decimal,

    /// Skip the per-day detail table
    #[arg(long)]
    pub no_detail: bool,
}

/// Everything one `daily` run produced. Absent summaries mean the fetch
/// came back empty.
#[derive(Serialize)]
struct DailyReport {
    campaign: String,
    week: Option<RangeSummary>,
    month: Option<RangeSummary>,
    details: Option<Vec<DayDetail>>,
    inconsistent_days: Vec<NaiveDate>,
}

pub async fn run(
    args: &DailyArgs,
    client: Client,
    campaign: &str,
    format: &OutputFormat,
) -> Result<()> {
    let (year, month) = validation::validate_month(&args.month)?;
    let week_days = validation::validate_day_count(args.week_days)?;
    let tolerance = validation::validate_tolerance(args.tolerance)?;
    let week_expected = validation::validate_expected(args.week_expected)?;
    let month_expected = validation::validate_expected(args.month_expected)?;

    let week_range = DateRange::first_days(year, month, week_days)?;
    let month_range = DateRange::month(year, month)?;
    let fetcher = SpendFetcher::new(client, FetchPlan::daily(campaign));

    let week_records = fetcher.fetch_or_empty(&week_range).await;
    let week = RangeSummary::from_records(week_range, &week_records, week_expected, tolerance);

    let month_records = fetcher.fetch_or_empty(&month_range).await;
    let month_summary =
        RangeSummary::from_records(month_range, &month_records, month_expected, tolerance);
    tracing::debug!(
        "Fetched {} rows for {} and {} rows for {}",
        week_records.len(),
        week_range,
        month_records.len(),
        month_range
    );

    let details = if args.no_detail || month_records.is_empty() {
        None
    } else {
        Some(day_details(&month_records))
    };

    let report = DailyReport {
        campaign: campaign.to_string(),
        inconsistent_days: details.as_deref().map(inconsistent_days).unwrap_or_default(),
        week,
        month: month_summary,
        details,
    };

    match format {
        OutputFormat::Table => print_text(&report, &week_range, &month_range, false),
        OutputFormat::Markdown => print_text(&report, &week_range, &month_range, true),
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Csv => match (&report.details, &report.month) {
            (Some(details), _) => print_details_csv(details)?,
            (None, Some(summary)) => print_days_csv(&summary.daily)?,
            (None, None) => eprintln!("No data for {}", month_range),
        },
    }

    Ok(())
}

fn print_text(
    report: &DailyReport,
    week_range: &DateRange,
    month_range: &DateRange,
    markdown: bool,
) {
    println!("Spend diagnostics");
    println!("Campaign: {}", report.campaign);
    println!("Period: {}", month_range);
    println!();

    print_heading(&format!("Pass 1: {}", week_range));
    match &report.week {
        Some(summary) => {
            println!("Days: {}", summary.day_count());
            for line in comparison_lines(&summary.comparison) {
                println!("{}", line);
            }
        }
        None => println!("❌ No data"),
    }
    println!();

    print_heading(&format!("Pass 2: {}", month_range));
    match &report.month {
        Some(summary) => print_month(summary, markdown),
        None => println!("❌ No data"),
    }
    println!();

    if let Some(details) = &report.details {
        print_heading("Pass 3: per-day detail");
        print_details_table(details, markdown);
        println!();
        println!(
            "Days with data: {} of {}",
            details.len(),
            month_range.len_days()
        );
        println!(
            "Total records: {}",
            details.iter().map(|d| d.records).sum::<usize>()
        );
        if !report.inconsistent_days.is_empty() {
            let dates: Vec<String> = report
                .inconsistent_days
                .iter()
                .map(NaiveDate::to_string)
                .collect();
            println!(
                "⚠️ Duplicate rows disagree on {} day(s): {}",
                dates.len(),
                dates.join(", ")
            );
        }
        println!();
    }

    println!("Conclusions:");
    println!(
        "   If days with data < {}, the gap is in the upstream sync.",
        month_range.len_days()
    );
    println!("   If every day is present but the total differs, the deduplication is suspect.");
}

fn print_month(summary: &RangeSummary, markdown: bool) {
    println!(
        "Days with data: {} of {}",
        summary.day_count(),
        summary.expected_days()
    );
    for line in comparison_lines(&summary.comparison) {
        println!("{}", line);
    }
    println!(
        "Raw sum without dedup: {} over {} rows",
        format_money(summary.raw_total),
        summary.record_count
    );
    println!();

    if summary.is_complete() {
        println!(
            "{} All {} days are present",
            check_mark(true),
            summary.expected_days()
        );
        return;
    }

    println!("⚠️ Not every day of the month has data");
    println!("   {} days missing", summary.missing_dates.len());
    println!();
    println!("Dates with data:");
    print_days_table(&summary.daily, markdown);
    println!();
    println!("{} Missing dates:", check_mark(false));
    for date in &summary.missing_dates {
        println!("   - {}", date);
    }
}
