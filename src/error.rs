//! Error types for the userload ingestion pipeline.
//!
//! This module defines a hierarchy of error types:
//!
//! - [`CsvError`] - CSV parsing errors
//! - [`TransformError`] - row normalization errors
//! - [`StorageError`] - database errors
//! - [`ConfigError`] - environment configuration errors
//! - [`IngestError`] - top-level orchestration errors
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries.

use thiserror::Error;

// =============================================================================
// CSV Parsing Errors
// =============================================================================

/// Errors during CSV parsing.
#[derive(Debug, Error)]
pub enum CsvError {
    /// Failed to read input.
    #[error("Failed to read input: {0}")]
    IoError(#[from] std::io::Error),

    /// Failed to decode input bytes.
    #[error("Failed to decode input: {0}")]
    EncodingError(String),

    /// Invalid CSV format.
    #[error("Invalid CSV format: {0}")]
    ParseError(String),

    /// Empty input.
    #[error("CSV input is empty")]
    EmptyInput,

    /// No headers found.
    #[error("No headers found in CSV")]
    NoHeaders,
}

impl From<csv::Error> for CsvError {
    fn from(err: csv::Error) -> Self {
        CsvError::ParseError(err.to_string())
    }
}

// =============================================================================
// Transformation Errors
// =============================================================================

/// Errors while normalizing a raw row into a user record.
///
/// All variants carry the 1-based data row number (header excluded) so a
/// failing batch points at the offending line.
#[derive(Debug, Error)]
pub enum TransformError {
    /// A required source column is absent from the row.
    #[error("Row {row}: missing column '{column}'")]
    MissingColumn { row: usize, column: String },

    /// The age cell does not parse as an integer.
    #[error("Row {row}: invalid age '{value}'")]
    InvalidAge { row: usize, value: String },

    /// A structured cell (address / additional_info) is not valid JSON.
    #[error("Row {row}, column '{column}': invalid JSON: {message}")]
    InvalidJson {
        row: usize,
        column: String,
        message: String,
    },
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors from the user store.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Failed to connect to the database.
    #[error("Failed to connect to database: {0}")]
    Connection(String),

    /// A query or bulk write failed.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

// =============================================================================
// Configuration Errors
// =============================================================================

/// Errors while reading environment configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable is not set.
    #[error("Missing required env var: {0}")]
    MissingVar(String),

    /// An environment variable holds a value of the wrong shape.
    #[error("Invalid value for {var}: {message}")]
    InvalidVar { var: String, message: String },
}

// =============================================================================
// Ingest Errors (top-level)
// =============================================================================

/// Top-level pipeline orchestration errors.
///
/// This is the main error type returned by [`crate::ingest::ingest_csv`].
/// It wraps all lower-level errors and maps to an HTTP 500 at the API layer.
#[derive(Debug, Error)]
pub enum IngestError {
    /// CSV parsing error.
    #[error("CSV error: {0}")]
    Csv(#[from] CsvError),

    /// Row normalization error.
    #[error("Transform error: {0}")]
    Transform(#[from] TransformError),

    /// Storage error.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for CSV operations.
pub type CsvResult<T> = Result<T, CsvError>;

/// Result type for transformation operations.
pub type TransformResult<T> = Result<T, TransformError>;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Result type for ingest operations.
pub type IngestResult<T> = Result<T, IngestError>;
