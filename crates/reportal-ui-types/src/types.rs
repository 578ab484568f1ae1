//! Wire types for the report generation API.

use serde::{Deserialize, Serialize};

/// Request body for `POST /api/reports/generate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRequest {
    /// Natural language query.
    pub query: String,
    /// Session ID for conversational context. Omitted on the first request;
    /// the backend assigns one in its response.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    /// Additional free-form context forwarded to the backend.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<serde_json::Value>,
}

impl ReportRequest {
    /// Create a request for the given query and (possibly unset) session.
    pub fn new(query: String, session_id: Option<String>) -> Self {
        Self {
            query,
            session_id,
            context: None,
        }
    }
}

/// One backend-emitted component descriptor: a type tag plus an open
/// property object interpreted per type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentConfig {
    /// The component type tag, e.g. "LineChart" or "Table".
    #[serde(rename = "type")]
    pub component_type: String,
    /// Untyped properties, validated when resolved into a
    /// [`ReportComponent`](crate::ReportComponent).
    pub props: serde_json::Value,
}

impl ComponentConfig {
    /// Create a new descriptor.
    pub fn new(component_type: String, props: serde_json::Value) -> Self {
        Self {
            component_type,
            props,
        }
    }
}

/// Successful response body of `POST /api/reports/generate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportResponse {
    /// The backend-assigned session identifier.
    pub session_id: String,
    /// Ordered component descriptors to render, possibly empty.
    pub components: Vec<ComponentConfig>,
    /// Response metadata (timings, row counts, ...). Opaque to the client.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

/// Backend error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// The analysis exceeded the backend's time budget.
    Timeout,
    /// The analysis model failed.
    ClaudeError,
    /// The warehouse query failed.
    BigqueryError,
    /// The request was rejected before execution.
    ValidationError,
}

/// Error detail carried inside the failure envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Machine-readable failure category.
    pub code: ErrorCode,
    /// Internal message, not meant for display.
    #[serde(default)]
    pub message: String,
    /// Localized message surfaced to the user verbatim.
    #[serde(rename = "userMessage", default)]
    pub user_message: String,
    /// When the failure occurred, as reported by the backend.
    #[serde(default)]
    pub timestamp: String,
    /// Correlation ID for support lookups.
    #[serde(rename = "requestId", default)]
    pub request_id: String,
}

/// Failure response body of `POST /api/reports/generate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// The error detail.
    pub error: ErrorDetail,
}
