//! Request/response types for the HTTP API.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Body of `POST /convert`.
///
/// `csvData` is optional at the serde level so its absence maps to an
/// explicit 400 instead of a deserialization failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvertRequest {
    /// Delimited text with a header row.
    pub csv_data: Option<String>,
}

/// Successful `POST /convert` response.
///
/// The age distribution report is deliberately not part of this body; it is
/// emitted over the log stream only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConvertResponse {
    pub message: String,
}

impl ConvertResponse {
    pub fn saved() -> Self {
        Self {
            message: "CSV data saved successfully.".to_string(),
        }
    }
}

/// Create an error response body.
pub fn error_response(error: &str) -> Value {
    json!({ "error": error })
}
