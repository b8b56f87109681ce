//! # userload - CSV user ingestion with age distribution reporting
//!
//! userload accepts CSV user records over HTTP, normalizes dot-nested
//! columns into typed records, bulk-persists them to Postgres, and logs an
//! age distribution report over the full stored population.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐    ┌────────────┐    ┌─────────────┐    ┌─────────────┐
//! │ POST /convert│───▶│   Parser   │───▶│  Transform  │───▶│ Bulk insert │
//! │  { csvData } │    │ (auto-enc) │    │ (normalize) │    │  (Postgres) │
//! └──────────────┘    └────────────┘    └─────────────┘    └──────┬──────┘
//!                                                                 │
//!                                       ┌─────────────┐    ┌──────▼──────┐
//!                                       │ Log stream  │◀───│  Aggregate  │
//!                                       │ (SSE+stdout)│    │ (all users) │
//!                                       └─────────────┘    └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use userload::{ingest_csv, MemoryUserStore};
//!
//! #[tokio::main]
//! async fn main() {
//!     let store = MemoryUserStore::new();
//!     let summary = ingest_csv(&store, csv_text).await.unwrap();
//!     println!("Stored {} users", summary.inserted);
//! }
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Hierarchical error types
//! - [`models`] - Domain models (UserRecord, StoredUser, AgeDistribution)
//! - [`parser`] - CSV parsing with auto-detection
//! - [`transform`] - Row normalization
//! - [`aggregate`] - Age bucket aggregation
//! - [`storage`] - UserStore trait, Postgres and in-memory stores
//! - [`ingest`] - Pipeline orchestration
//! - [`config`] - Environment configuration
//! - [`api`] - HTTP API server

// Core modules
pub mod error;
pub mod models;

// Parsing
pub mod parser;

// Normalization
pub mod transform;

// Aggregation
pub mod aggregate;

// Persistence
pub mod storage;

// Pipeline
pub mod ingest;

// Configuration
pub mod config;

// HTTP API
pub mod api;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{
    ConfigError, CsvError, CsvResult, IngestError, IngestResult, StorageError, StorageResult,
    TransformError, TransformResult,
};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{AgeDistribution, RawRow, StoredUser, UserRecord};

// =============================================================================
// Re-exports - CSV Parsing
// =============================================================================

pub use parser::{
    decode_content, detect_delimiter, detect_encoding, parse_bytes_auto, parse_file_auto,
    parse_str, ParseResult,
};

// =============================================================================
// Re-exports - Transform
// =============================================================================

pub use transform::{transform_row, transform_rows};

// =============================================================================
// Re-exports - Aggregation
// =============================================================================

pub use aggregate::{age_distribution, bucket_for, AgeBucket};

// =============================================================================
// Re-exports - Storage
// =============================================================================

pub use storage::{MemoryUserStore, PgUserStore, UserStore};

// =============================================================================
// Re-exports - Pipeline
// =============================================================================

pub use ingest::{ingest_csv, IngestSummary};

// =============================================================================
// Re-exports - Configuration
// =============================================================================

pub use config::AppConfig;

// =============================================================================
// Re-exports - API
// =============================================================================

pub use api::types::{error_response, ConvertRequest, ConvertResponse};

// Server
pub mod server {
    pub use crate::api::server::{app, start_server, AppState};
}
