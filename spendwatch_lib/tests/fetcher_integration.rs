//! Fetcher behaviour against a mock backend.

use rust_decimal::Decimal;
use spendwatch_lib::report::{day_details, RangeSummary, DEFAULT_TOLERANCE};
use spendwatch_lib::{Client, Credentials, DateRange, FetchPlan, SpendFetcher, SpendwatchError};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fixture(name: &str) -> String {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../spendwatch_api/tests/fixtures/");
    std::fs::read_to_string(format!("{}{}", path, name)).unwrap()
}

fn fetcher(server: &MockServer, plan: FetchPlan) -> SpendFetcher {
    SpendFetcher::new(
        Client::with_base_url(&server.uri(), Credentials::from_key("anon-key")),
        plan,
    )
}

#[tokio::test]
async fn fetch_or_empty_returns_rows() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/ozon_performance_daily"))
        .and(query_param("campaign_name", "eq.Кабель КГ 2*2,5"))
        .and(query_param("stat_date", "gte.2025-12-01"))
        .and(query_param("stat_date", "lte.2025-12-07"))
        .and(query_param("order", "stat_date.asc"))
        .and(header("apikey", "anon-key"))
        .and(header("authorization", "Bearer anon-key"))
        .respond_with(ResponseTemplate::new(200).set_body_string(fixture("daily_week.json")))
        .expect(1)
        .mount(&server)
        .await;

    let fetcher = fetcher(&server, FetchPlan::daily("Кабель КГ 2*2,5"));
    let week = DateRange::first_days(2025, 12, 7).unwrap();
    let records = fetcher.fetch_or_empty(&week).await;
    assert_eq!(records.len(), 10);

    let summary =
        RangeSummary::from_records(week, &records, Decimal::new(24428, 0), DEFAULT_TOLERANCE)
            .unwrap();
    assert_eq!(summary.day_count(), 7);
    assert_eq!(summary.total, Decimal::new(2442811, 2));
    assert!(summary.comparison.matches);
    assert!(summary.is_complete());

    let details = day_details(&records);
    let last = details.last().unwrap();
    assert!(!last.all_identical);
    assert_eq!(last.distinct_skus, 2);
}

#[tokio::test]
async fn fetch_or_empty_swallows_server_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/ozon_performance_daily"))
        .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
        .expect(1)
        .mount(&server)
        .await;

    let fetcher = fetcher(&server, FetchPlan::daily("X"));
    let records = fetcher
        .fetch_or_empty(&DateRange::month(2025, 12).unwrap())
        .await;
    assert!(records.is_empty());
}

#[tokio::test]
async fn fetch_or_empty_swallows_decode_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/ozon_performance_summary"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let fetcher = fetcher(&server, FetchPlan::summary("X"));
    let records = fetcher
        .fetch_or_empty(&DateRange::month(2025, 12).unwrap())
        .await;
    assert!(records.is_empty());
}

#[tokio::test]
async fn try_fetch_separates_failure_from_no_rows() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/ozon_performance_daily"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/ozon_performance_summary"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let month = DateRange::month(2025, 12).unwrap();

    let empty = fetcher(&server, FetchPlan::daily("X")).try_fetch(&month).await;
    assert!(matches!(empty, Ok(ref rows) if rows.is_empty()));

    let failed = fetcher(&server, FetchPlan::summary("X")).try_fetch(&month).await;
    assert!(matches!(failed, Err(SpendwatchError::Api(_))));
}

#[tokio::test]
async fn summary_plan_groups_by_campaign() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/ozon_performance_summary"))
        .and(query_param(
            "select",
            "campaign_id,campaign_name,stat_date,money_spent,sku",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_string(fixture("summary_mixed.json")))
        .mount(&server)
        .await;

    let month = DateRange::month(2025, 12).unwrap();
    let records = fetcher(&server, FetchPlan::summary("Кабель КГ 2*2,5"))
        .fetch_or_empty(&month)
        .await;
    let breakdown =
        spendwatch_lib::CampaignBreakdown::from_records(month, &records, 3).unwrap();
    assert_eq!(breakdown.campaigns.len(), 3);
    assert_eq!(breakdown.grand_total, Decimal::new(150050, 2));
}
