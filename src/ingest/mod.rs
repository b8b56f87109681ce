//! High-level ingest pipeline: CSV text in, persisted users and a logged
//! age distribution report out.
//!
//! Stages, run sequentially per request:
//!
//! 1. Parse the delimited text (encoding/delimiter auto-detection).
//! 2. Normalize every row into a [`UserRecord`]; the first bad row aborts
//!    the batch before anything is written.
//! 3. Bulk-insert the batch through the [`UserStore`] (all-or-nothing).
//! 4. Re-read the *entire* stored population and compute the distribution.
//! 5. Emit the report over the log stream.
//!
//! # Example
//!
//! ```rust,ignore
//! use userload::{ingest_csv, MemoryUserStore};
//!
//! # async fn run() {
//! let store = MemoryUserStore::new();
//! let summary = ingest_csv(&store, "name.firstName,name.lastName,age,address,additional_info\n...")
//!     .await
//!     .unwrap();
//! println!("stored {} users", summary.inserted);
//! # }
//! ```

use serde::Serialize;

use crate::aggregate::age_distribution;
use crate::api::logs::{emit_report, log_info, log_success};
use crate::error::IngestResult;
use crate::models::AgeDistribution;
use crate::parser::parse_bytes_auto;
use crate::storage::UserStore;
use crate::transform::transform_rows;

/// Outcome of one successful ingest request.
#[derive(Debug, Clone, Serialize)]
pub struct IngestSummary {
    /// Records inserted by this request.
    pub inserted: u64,
    /// Stored population size after the insert.
    pub total_users: usize,
    /// Report computed over the full population.
    pub distribution: AgeDistribution,
}

/// Run the full pipeline over one CSV payload.
pub async fn ingest_csv(store: &dyn UserStore, csv_data: &str) -> IngestResult<IngestSummary> {
    log_info("Reading CSV payload...");
    let parsed = parse_bytes_auto(csv_data.as_bytes())?;
    log_success(format!(
        "Parsed {} rows ({} columns, '{}' delimited, {})",
        parsed.rows.len(),
        parsed.headers.len(),
        if parsed.delimiter == '\t' { "TAB".into() } else { parsed.delimiter.to_string() },
        parsed.encoding,
    ));

    log_info("Normalizing rows...");
    let records = transform_rows(&parsed.rows)?;
    log_success(format!("Normalized {} user records", records.len()));

    let inserted = store.bulk_insert(records).await?;
    log_success(format!("Stored {} users", inserted));

    // The report always covers the whole population, not just this batch.
    let users = store.fetch_all().await?;
    let distribution = age_distribution(&users);
    emit_report(&distribution);

    Ok(IngestSummary {
        inserted,
        total_users: users.len(),
        distribution,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryUserStore;

    const HEADER: &str = "name.firstName,name.lastName,age,address,additional_info";

    fn row(first: &str, last: &str, age: &str) -> String {
        format!(
            r#"{first},{last},{age},"{{""city"": ""Pune""}}","{{""hobby"": ""chess""}}""#
        )
    }

    #[tokio::test]
    async fn test_ingest_reports_over_full_population() {
        let store = MemoryUserStore::new();

        let first = format!("{HEADER}\n{}", row("Rohit", "Prasad", "35"));
        let summary = ingest_csv(&store, &first).await.unwrap();
        assert_eq!(summary.inserted, 1);
        assert_eq!(summary.total_users, 1);

        // Second request: report covers both batches.
        let second = format!("{HEADER}\n{}", row("Asha", "Rao", "70"));
        let summary = ingest_csv(&store, &second).await.unwrap();
        assert_eq!(summary.inserted, 1);
        assert_eq!(summary.total_users, 2);
        assert_eq!(summary.distribution.between_20_and_40, 50.0);
        assert_eq!(summary.distribution.gt60, 50.0);
    }

    #[tokio::test]
    async fn test_bad_row_leaves_store_untouched() {
        let store = MemoryUserStore::new();

        let payload = format!(
            "{HEADER}\n{}\n{}",
            row("Rohit", "Prasad", "35"),
            // address cell is not JSON
            r#"Asha,Rao,70,not-json,"{{}}""#,
        );
        assert!(ingest_csv(&store, &payload).await.is_err());
        assert_eq!(store.count().await.unwrap(), 0);
    }
}
