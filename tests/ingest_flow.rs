//! End-to-end ingest pipeline tests against the in-memory store.

use std::sync::Arc;

use axum::extract::{Json, State};
use axum::http::StatusCode;

use userload::api::server::{convert, AppState};
use userload::{ingest_csv, ConvertRequest, IngestError, MemoryUserStore, UserStore};

const HEADER: &str = "name.firstName,name.lastName,age,address,additional_info";

fn csv_row(first: &str, last: &str, age: &str) -> String {
    format!(
        r#"{first},{last},{age},"{{""line1"": ""A-563 Rakshak Society"", ""city"": ""Pune""}}","{{""hobby"": ""chess""}}""#
    )
}

fn csv_of(rows: &[String]) -> String {
    format!("{HEADER}\n{}", rows.join("\n"))
}

#[tokio::test]
async fn valid_rows_increase_population_by_n() {
    let store = MemoryUserStore::new();
    let payload = csv_of(&[
        csv_row("Rohit", "Prasad", "35"),
        csv_row("Asha", "Rao", "17"),
        csv_row("Vikram", "Singh", "52"),
    ]);

    let summary = ingest_csv(&store, &payload).await.unwrap();
    assert_eq!(summary.inserted, 3);
    assert_eq!(store.count().await.unwrap(), 3);

    let users = store.fetch_all().await.unwrap();
    assert_eq!(users[0].name, "Rohit Prasad");
    assert_eq!(users[0].age, 35);
    assert_eq!(users[0].address["city"], "Pune");
    assert_eq!(users[2].id, 3);
}

#[tokio::test]
async fn three_age_scenario_matches_expected_report() {
    let store = MemoryUserStore::new();
    let payload = csv_of(&[
        csv_row("A", "One", "15"),
        csv_row("B", "Two", "30"),
        csv_row("C", "Three", "70"),
    ]);

    let summary = ingest_csv(&store, &payload).await.unwrap();
    let dist = summary.distribution;

    assert_eq!(dist.lt20, 33.33);
    assert_eq!(dist.between_20_and_40, 33.33);
    assert_eq!(dist.between_40_and_60, 0.0);
    assert_eq!(dist.gt60, 33.33);
}

#[tokio::test]
async fn boundary_ages_20_and_40_count_in_middle_bucket() {
    let store = MemoryUserStore::new();
    let payload = csv_of(&[csv_row("Edge", "Low", "20"), csv_row("Edge", "High", "40")]);

    let summary = ingest_csv(&store, &payload).await.unwrap();
    assert_eq!(summary.distribution.between_20_and_40, 100.0);
    assert_eq!(summary.distribution.lt20, 0.0);
    assert_eq!(summary.distribution.between_40_and_60, 0.0);
}

#[tokio::test]
async fn unparsable_address_aborts_whole_batch() {
    let store = MemoryUserStore::new();

    // Seed one user so we can tell "unchanged" from "empty".
    let seed = csv_of(&[csv_row("Seed", "User", "30")]);
    ingest_csv(&store, &seed).await.unwrap();
    assert_eq!(store.count().await.unwrap(), 1);

    let payload = format!(
        "{HEADER}\n{}\n{}",
        csv_row("Good", "Row", "25"),
        r#"Bad,Row,44,not-json,"{{}}""#,
    );
    let err = ingest_csv(&store, &payload).await.unwrap_err();
    assert!(matches!(err, IngestError::Transform(_)));

    // Nothing from the failing batch was committed, including the good row.
    assert_eq!(store.count().await.unwrap(), 1);
}

#[tokio::test]
async fn non_numeric_age_is_rejected() {
    let store = MemoryUserStore::new();
    let payload = csv_of(&[csv_row("Rohit", "Prasad", "thirty-five")]);

    let err = ingest_csv(&store, &payload).await.unwrap_err();
    assert!(err.to_string().contains("invalid age"));
    assert_eq!(store.count().await.unwrap(), 0);
}

#[tokio::test]
async fn report_covers_full_population_across_requests() {
    let store = MemoryUserStore::new();

    ingest_csv(&store, &csv_of(&[csv_row("A", "One", "10")]))
        .await
        .unwrap();
    let summary = ingest_csv(&store, &csv_of(&[csv_row("B", "Two", "30")]))
        .await
        .unwrap();

    // Second report is over both users, not just the second batch.
    assert_eq!(summary.total_users, 2);
    assert_eq!(summary.distribution.lt20, 50.0);
    assert_eq!(summary.distribution.between_20_and_40, 50.0);
}

#[tokio::test]
async fn convert_endpoint_missing_csv_data_is_400() {
    let store: Arc<dyn UserStore> = Arc::new(MemoryUserStore::new());
    let state = AppState {
        store: store.clone(),
    };

    let result = convert(State(state), Json(ConvertRequest { csv_data: None })).await;

    let (status, body) = result.unwrap_err();
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body.0["error"], "CSV data is required.");
    assert_eq!(store.count().await.unwrap(), 0);
}

#[tokio::test]
async fn convert_endpoint_success_and_failure_bodies() {
    let store: Arc<dyn UserStore> = Arc::new(MemoryUserStore::new());
    let state = AppState {
        store: store.clone(),
    };

    let ok = convert(
        State(state.clone()),
        Json(ConvertRequest {
            csv_data: Some(csv_of(&[csv_row("Rohit", "Prasad", "35")])),
        }),
    )
    .await
    .unwrap();
    assert_eq!(ok.0.message, "CSV data saved successfully.");
    assert_eq!(store.count().await.unwrap(), 1);

    // Malformed payload maps to 500 and leaves the population unchanged.
    let err = convert(
        State(state),
        Json(ConvertRequest {
            csv_data: Some(format!("{HEADER}\n{}", r#"Bad,Row,44,not-json,"{{}}""#)),
        }),
    )
    .await
    .unwrap_err();
    assert_eq!(err.0, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(err.1 .0["error"].as_str().unwrap().contains("invalid JSON"));
    assert_eq!(store.count().await.unwrap(), 1);
}
