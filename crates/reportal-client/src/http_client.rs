use std::time::Duration;

use async_trait::async_trait;
use reportal_ui_types::{ErrorResponse, ReportRequest, ReportResponse};

use crate::{ClientError, ReportingClient};

/// HTTP client for a remote reporting backend.
pub struct HttpReportingClient {
    base_url: String,
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpReportingClient {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
            timeout: Duration::from_secs(600),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl ReportingClient for HttpReportingClient {
    async fn generate(&self, request: ReportRequest) -> Result<ReportResponse, ClientError> {
        let url = format!("{}/api/reports/generate", self.base_url);

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .timeout(self.timeout)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            if let Ok(envelope) = serde_json::from_str::<ErrorResponse>(&body) {
                tracing::error!(
                    status = status.as_u16(),
                    code = ?envelope.error.code,
                    request_id = %envelope.error.request_id,
                    "report generation failed"
                );
                return Err(ClientError::Backend {
                    status: status.as_u16(),
                    detail: envelope.error,
                });
            }

            tracing::error!(status = status.as_u16(), "report generation failed without envelope");
            return Err(ClientError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        let parsed = serde_json::from_str::<ReportResponse>(&body)
            .map_err(|err| ClientError::MalformedResponse(err.to_string()))?;

        Ok(parsed)
    }

    async fn health_check(&self) -> Result<(), ClientError> {
        let url = format!("{}/health", self.base_url);

        let response = self
            .client
            .get(&url)
            .timeout(Duration::from_secs(5))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status(status.as_u16()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_generate_parses_response() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/reports/generate")
            .match_body(mockito::Matcher::PartialJson(json!({
                "query": "今月のMeta広告のパフォーマンスを見せて"
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "session_id": "s1",
                    "components": [
                        {"type": "Metric", "props": {"title": "Spend", "value": "¥120,000"}}
                    ]
                })
                .to_string(),
            )
            .create_async()
            .await;

        let client = HttpReportingClient::new(server.url());
        let response = client
            .generate(ReportRequest::new(
                "今月のMeta広告のパフォーマンスを見せて".to_string(),
                None,
            ))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(response.session_id, "s1");
        assert_eq!(response.components.len(), 1);
    }

    #[tokio::test]
    async fn test_generate_sends_established_session_id() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/reports/generate")
            .match_body(mockito::Matcher::PartialJson(json!({"session_id": "s1"})))
            .with_status(200)
            .with_body(json!({"session_id": "s1", "components": []}).to_string())
            .create_async()
            .await;

        let client = HttpReportingClient::new(server.url());
        let response = client
            .generate(ReportRequest::new(
                "CVRはどう？".to_string(),
                Some("s1".to_string()),
            ))
            .await
            .unwrap();

        mock.assert_async().await;
        assert!(response.components.is_empty());
    }

    #[tokio::test]
    async fn test_backend_error_envelope_surfaces_user_message() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/reports/generate")
            .with_status(504)
            .with_body(
                json!({
                    "error": {
                        "code": "TIMEOUT",
                        "message": "query exceeded deadline",
                        "userMessage": "分析に時間がかかりすぎました。クエリを簡略化してお試しください。",
                        "timestamp": "2025-01-10T09:00:00Z",
                        "requestId": "req-9"
                    }
                })
                .to_string(),
            )
            .create_async()
            .await;

        let client = HttpReportingClient::new(server.url());
        let err = client
            .generate(ReportRequest::new("重いクエリ".to_string(), None))
            .await
            .unwrap_err();

        assert_eq!(
            err.user_message(),
            "分析に時間がかかりすぎました。クエリを簡略化してお試しください。"
        );
        match err {
            ClientError::Backend { status, detail } => {
                assert_eq!(status, 504);
                assert_eq!(detail.request_id, "req-9");
            }
            other => panic!("expected Backend, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unparseable_error_body_falls_back() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/reports/generate")
            .with_status(500)
            .with_body("Internal Server Error")
            .create_async()
            .await;

        let client = HttpReportingClient::new(server.url());
        let err = client
            .generate(ReportRequest::new("クエリ".to_string(), None))
            .await
            .unwrap_err();

        assert!(matches!(err, ClientError::Status(500)));
        assert_eq!(err.user_message(), crate::GENERATE_FALLBACK_MESSAGE);
    }

    #[tokio::test]
    async fn test_malformed_success_body_is_generic_failure() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/reports/generate")
            .with_status(200)
            .with_body("not json")
            .create_async()
            .await;

        let client = HttpReportingClient::new(server.url());
        let err = client
            .generate(ReportRequest::new("クエリ".to_string(), None))
            .await
            .unwrap_err();

        assert!(matches!(err, ClientError::MalformedResponse(_)));
        assert_eq!(err.user_message(), crate::GENERIC_FALLBACK_MESSAGE);
    }

    #[tokio::test]
    async fn test_health_check() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/health")
            .with_status(200)
            .with_body(json!({"status": "ok"}).to_string())
            .create_async()
            .await;

        let client = HttpReportingClient::new(server.url());
        assert!(client.health_check().await.is_ok());
    }
}
