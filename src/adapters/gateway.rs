use crate::domain::model::{EndpointId, SendReceipt, SessionEvent};
use crate::domain::ports::MessagingClient;
use crate::utils::error::{BroadcastError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const CLIENT_ID_HEADER: &str = "X-Client-Id";
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);

#[derive(Debug, Deserialize)]
struct SessionStatus {
    state: String,
    #[serde(default)]
    qr: Option<String>,
    #[serde(default)]
    reason: Option<String>,
}

#[derive(Debug, Serialize)]
struct ResolveRequest<'a> {
    number: &'a str,
}

#[derive(Debug, Deserialize)]
struct ResolveResponse {
    endpoint: Option<String>,
}

#[derive(Debug, Serialize)]
struct SendRequest<'a> {
    endpoint: &'a str,
    body: &'a str,
}

#[derive(Debug, Deserialize)]
struct SendResponse {
    #[serde(default)]
    id: Option<String>,
}

/// `MessagingClient` implementation talking to the local gateway bridge over
/// HTTP. Every request carries the client id header; the bridge keeps the
/// session directory keyed by that id, so an authenticated session survives
/// across runs.
pub struct HttpGateway {
    http: Client,
    base_url: String,
    client_id: String,
    poll_interval: Duration,
    last_emitted: Option<(String, Option<String>)>,
}

impl HttpGateway {
    pub fn new(base_url: impl Into<String>, client_id: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            client_id: client_id.into(),
            poll_interval: DEFAULT_POLL_INTERVAL,
            last_emitted: None,
        }
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    async fn fetch_status(&self) -> Result<SessionStatus> {
        let status = self
            .http
            .get(format!("{}/session", self.base_url))
            .header(CLIENT_ID_HEADER, &self.client_id)
            .send()
            .await?
            .error_for_status()?
            .json::<SessionStatus>()
            .await?;
        Ok(status)
    }
}

#[async_trait]
impl MessagingClient for HttpGateway {
    /// Polls the bridge session endpoint and emits each lifecycle transition
    /// once. A refreshed QR payload counts as a new transition.
    async fn next_event(&mut self) -> Result<SessionEvent> {
        loop {
            let status = self.fetch_status().await?;
            let observed = (status.state.clone(), status.qr.clone());

            if self.last_emitted.as_ref() != Some(&observed) {
                self.last_emitted = Some(observed);
                let event = match status.state.as_str() {
                    "qr" => SessionEvent::QrCode(status.qr.unwrap_or_default()),
                    "authenticated" => SessionEvent::Authenticated,
                    "ready" => SessionEvent::Ready,
                    "failed" => SessionEvent::AuthFailed(
                        status
                            .reason
                            .unwrap_or_else(|| "gateway reported session failure".to_string()),
                    ),
                    other => {
                        return Err(BroadcastError::AuthError {
                            message: format!("unexpected session state: {}", other),
                        })
                    }
                };
                return Ok(event);
            }

            tokio::time::sleep(self.poll_interval).await;
        }
    }

    async fn resolve_endpoint(&self, number: &str) -> Result<Option<EndpointId>> {
        let response = self
            .http
            .post(format!("{}/resolve", self.base_url))
            .header(CLIENT_ID_HEADER, &self.client_id)
            .json(&ResolveRequest { number })
            .send()
            .await?
            .error_for_status()?
            .json::<ResolveResponse>()
            .await?;

        Ok(response.endpoint.map(EndpointId))
    }

    async fn send_message(&self, endpoint: &EndpointId, body: &str) -> Result<SendReceipt> {
        let response = self
            .http
            .post(format!("{}/send", self.base_url))
            .header(CLIENT_ID_HEADER, &self.client_id)
            .json(&SendRequest {
                endpoint: endpoint.as_str(),
                body,
            })
            .send()
            .await?
            .error_for_status()?
            .json::<SendResponse>()
            .await?;

        Ok(SendReceipt {
            message_id: response.id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn gateway(server: &MockServer) -> HttpGateway {
        HttpGateway::new(server.base_url(), "test-client")
            .with_poll_interval(Duration::from_millis(5))
    }

    #[tokio::test]
    async fn test_next_event_ready_on_existing_session() {
        let server = MockServer::start();
        let session_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/session")
                .header(CLIENT_ID_HEADER, "test-client");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({"state": "ready"}));
        });

        let mut gateway = gateway(&server);
        let event = gateway.next_event().await.unwrap();

        session_mock.assert();
        assert_eq!(event, SessionEvent::Ready);
    }

    #[tokio::test]
    async fn test_next_event_emits_each_transition_once() {
        let server = MockServer::start();
        let mut qr_mock = server.mock(|when, then| {
            when.method(GET).path("/session");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({"state": "qr", "qr": "2@login-token"}));
        });

        let mut gateway = gateway(&server);
        let event = gateway.next_event().await.unwrap();
        assert_eq!(event, SessionEvent::QrCode("2@login-token".to_string()));

        // The bridge moves on; the next poll picks up the new state.
        qr_mock.delete();
        server.mock(|when, then| {
            when.method(GET).path("/session");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({"state": "authenticated"}));
        });

        let event = gateway.next_event().await.unwrap();
        assert_eq!(event, SessionEvent::Authenticated);
    }

    #[tokio::test]
    async fn test_next_event_failure_carries_reason() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/session");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({"state": "failed", "reason": "session expired"}));
        });

        let mut gateway = gateway(&server);
        let event = gateway.next_event().await.unwrap();

        assert_eq!(
            event,
            SessionEvent::AuthFailed("session expired".to_string())
        );
    }

    #[tokio::test]
    async fn test_resolve_registered_number() {
        let server = MockServer::start();
        let resolve_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/resolve")
                .header(CLIENT_ID_HEADER, "test-client")
                .json_body(serde_json::json!({"number": "4915112345"}));
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({"endpoint": "4915112345@c.us"}));
        });

        let gateway = gateway(&server);
        let endpoint = gateway.resolve_endpoint("4915112345").await.unwrap();

        resolve_mock.assert();
        assert_eq!(endpoint, Some(EndpointId("4915112345@c.us".to_string())));
    }

    #[tokio::test]
    async fn test_resolve_unregistered_number_is_none() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/resolve");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({"endpoint": null}));
        });

        let gateway = gateway(&server);
        let endpoint = gateway.resolve_endpoint("000").await.unwrap();

        assert_eq!(endpoint, None);
    }

    #[tokio::test]
    async fn test_send_returns_confirmed_receipt() {
        let server = MockServer::start();
        let send_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/send")
                .json_body(serde_json::json!({"endpoint": "111@c.us", "body": "Hi Alice!"}));
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({"id": "MSG-1"}));
        });

        let gateway = gateway(&server);
        let receipt = gateway
            .send_message(&EndpointId("111@c.us".to_string()), "Hi Alice!")
            .await
            .unwrap();

        send_mock.assert();
        assert_eq!(receipt.message_id, Some("MSG-1".to_string()));
    }

    #[tokio::test]
    async fn test_send_without_id_is_ambiguous() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/send");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({}));
        });

        let gateway = gateway(&server);
        let receipt = gateway
            .send_message(&EndpointId("111@c.us".to_string()), "Hi!")
            .await
            .unwrap();

        assert_eq!(receipt.message_id, None);
    }

    #[tokio::test]
    async fn test_gateway_error_status_surfaces_as_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/send");
            then.status(500);
        });

        let gateway = gateway(&server);
        let result = gateway
            .send_message(&EndpointId("111@c.us".to_string()), "Hi!")
            .await;

        assert!(result.is_err());
    }
}
