//! Domain models for the userload ingestion pipeline.
//!
//! - [`RawRow`] - one parsed CSV line, header name to cell text
//! - [`UserRecord`] - a normalized user, ready for persistence
//! - [`StoredUser`] - a persisted user as read back from the store
//! - [`AgeDistribution`] - the bucketed percentage report

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// A raw CSV row: column header mapped to the cell's text.
///
/// Produced by the parser in source order. A short row simply lacks the
/// trailing keys; no validation happens at this stage.
pub type RawRow = HashMap<String, String>;

// =============================================================================
// User Record
// =============================================================================

/// A normalized user record, scoped to one request.
///
/// Built by the transformer from a [`RawRow`]:
/// `name` concatenates the `name.firstName` and `name.lastName` columns,
/// `age` is coerced to an integer, and the `address` / `additional_info`
/// cells are decoded from embedded JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Full name, "first last".
    pub name: String,
    /// Age in years, coerced from the raw cell at ingestion time.
    pub age: i32,
    /// Structured address, decoded from a JSON cell.
    pub address: Value,
    /// Arbitrary extra attributes, decoded from a JSON cell.
    pub additional_info: Value,
}

// =============================================================================
// Stored User
// =============================================================================

/// A user as persisted: [`UserRecord`] plus the store-assigned identity
/// and timestamps. Never mutated or deleted by this service.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct StoredUser {
    /// Auto-incrementing primary key.
    pub id: i32,
    pub name: String,
    pub age: i32,
    pub address: Value,
    pub additional_info: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Age Distribution Report
// =============================================================================

/// Percentage of the stored population in each age bucket, rounded to
/// two decimal places.
///
/// Bucket rule (intentionally asymmetric, kept from the original system):
/// ages 20 and 40 both land in the `between_20_and_40` bucket.
///
/// An empty population yields the all-zero report rather than NaN;
/// check [`AgeDistribution::is_empty`] to tell the two apart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgeDistribution {
    /// Population size the percentages were computed over.
    pub total_users: usize,
    /// Age < 20.
    pub lt20: f64,
    /// 20 <= age <= 40.
    pub between_20_and_40: f64,
    /// 40 < age <= 60.
    pub between_40_and_60: f64,
    /// Age > 60.
    pub gt60: f64,
}

impl AgeDistribution {
    /// The defined report for an empty population: all buckets at 0.00.
    pub fn empty() -> Self {
        Self {
            total_users: 0,
            lt20: 0.0,
            between_20_and_40: 0.0,
            between_40_and_60: 0.0,
            gt60: 0.0,
        }
    }

    /// True when no users were stored at report time.
    pub fn is_empty(&self) -> bool {
        self.total_users == 0
    }
}
