//! Client SDK for the reporting agent backend
//!
//! This crate abstracts the HTTP conversation with the report generation
//! service behind a small async trait, so the terminal front-end (and tests)
//! can swap the real backend for mocks without touching session logic. The
//! backend contract is a single JSON request/response cycle per query; there
//! is no streaming, no retry, and no client-side cancellation beyond the
//! request timeout.

use async_trait::async_trait;
use reportal_ui_types::{ReportRequest, ReportResponse};

pub mod error;
pub mod http_client;

pub use error::{ClientError, GENERATE_FALLBACK_MESSAGE, GENERIC_FALLBACK_MESSAGE};
pub use http_client::HttpReportingClient;

/// Client for the reporting backend.
#[async_trait]
pub trait ReportingClient: Send + Sync {
    /// Submit one natural-language query and wait for the component list.
    async fn generate(&self, request: ReportRequest) -> Result<ReportResponse, ClientError>;

    /// Check that the backend is reachable and healthy.
    async fn health_check(&self) -> Result<(), ClientError>;
}

pub type ReportingClientBox = Box<dyn ReportingClient>;
