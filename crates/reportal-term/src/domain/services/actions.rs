use std::sync::Arc;

use anyhow::Result;
use reportal_ui_types::ReportRequest;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::domain::models::Action;
use crate::domain::models::Event;
use crate::domain::models::ReportingClientBox;

async fn generate_report(
    client: &Arc<ReportingClientBox>,
    query: String,
    session_id: Option<String>,
    event_tx: &mpsc::UnboundedSender<Event>,
) -> Result<()> {
    let request = ReportRequest::new(query, session_id);
    match client.generate(request).await {
        Ok(response) => {
            event_tx.send(Event::ReportReceived(response))?;
        }
        Err(err) => {
            tracing::error!(error = %err, "report generation failed");
            event_tx.send(Event::ReportFailed(err.user_message()))?;
        }
    }

    return Ok(());
}

pub struct ActionsService {}

impl ActionsService {
    /// Backend worker loop. Requests run on their own task so the UI stays
    /// responsive; results come back to the UI loop as events.
    pub async fn start(
        client: ReportingClientBox,
        event_tx: mpsc::UnboundedSender<Event>,
        rx: &mut mpsc::UnboundedReceiver<Action>,
    ) -> Result<()> {
        let client_arc = Arc::new(client);

        #[allow(unused_assignments)]
        let mut worker: JoinHandle<Result<()>> = tokio::spawn(async { Ok(()) });

        loop {
            if let Some(action) = rx.recv().await {
                match action {
                    Action::GenerateReport { query, session_id } => {
                        let client_worker = client_arc.clone();
                        let worker_event_tx = event_tx.clone();
                        worker = tokio::spawn(async move {
                            generate_report(&client_worker, query, session_id, &worker_event_tx)
                                .await
                        });
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use reportal_client::ClientError;
    use reportal_client::ReportingClient;
    use reportal_ui_types::ReportResponse;
    use tokio::sync::mpsc;

    use super::*;

    struct MockReportingClient {
        generate_fn: Box<
            dyn Fn(ReportRequest) -> std::result::Result<ReportResponse, ClientError>
                + Send
                + Sync,
        >,
    }

    #[async_trait]
    impl ReportingClient for MockReportingClient {
        async fn generate(
            &self,
            request: ReportRequest,
        ) -> std::result::Result<ReportResponse, ClientError> {
            return (self.generate_fn)(request);
        }

        async fn health_check(&self) -> std::result::Result<(), ClientError> {
            return Ok(());
        }
    }

    #[tokio::test]
    async fn test_successful_generation_emits_report_received() {
        let (event_tx, mut event_rx) = mpsc::unbounded_channel::<Event>();
        let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();

        let client = MockReportingClient {
            generate_fn: Box::new(|request| {
                assert_eq!(request.query, "広告費の推移");
                assert_eq!(request.session_id, Some("s1".to_string()));
                Ok(ReportResponse {
                    session_id: "s1".to_string(),
                    components: vec![],
                    metadata: None,
                })
            }),
        };

        tokio::spawn(async move {
            ActionsService::start(Box::new(client), event_tx, &mut action_rx)
                .await
                .unwrap();
        });

        action_tx
            .send(Action::GenerateReport {
                query: "広告費の推移".to_string(),
                session_id: Some("s1".to_string()),
            })
            .unwrap();

        match event_rx.recv().await.unwrap() {
            Event::ReportReceived(response) => assert_eq!(response.session_id, "s1"),
            other => panic!("expected ReportReceived, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_failed_generation_emits_user_facing_message() {
        let (event_tx, mut event_rx) = mpsc::unbounded_channel::<Event>();
        let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();

        let client = MockReportingClient {
            generate_fn: Box::new(|_| Err(ClientError::Status(500))),
        };

        tokio::spawn(async move {
            ActionsService::start(Box::new(client), event_tx, &mut action_rx)
                .await
                .unwrap();
        });

        action_tx
            .send(Action::GenerateReport {
                query: "広告費の推移".to_string(),
                session_id: None,
            })
            .unwrap();

        match event_rx.recv().await.unwrap() {
            Event::ReportFailed(message) => {
                assert_eq!(message, "レポート生成に失敗しました");
            }
            other => panic!("expected ReportFailed, got {other:?}"),
        }
    }
}
