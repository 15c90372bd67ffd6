use crate::domain::model::{DelayRange, EndpointId, SendReceipt, SessionEvent};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Capability surface of the external messaging collaborator. Callers depend
/// on this trait only, never on the concrete gateway, so a scripted double
/// can stand in during tests.
#[async_trait]
pub trait MessagingClient: Send + Sync {
    /// Next session lifecycle notification. Blocks until the session state
    /// changes; `Ready` means the client accepts resolve and send calls.
    async fn next_event(&mut self) -> Result<SessionEvent>;

    /// Whether the canonical number is a registered endpoint. `None` means
    /// not registered.
    async fn resolve_endpoint(&self, number: &str) -> Result<Option<EndpointId>>;

    /// Deliver `body` to a previously resolved endpoint.
    async fn send_message(&self, endpoint: &EndpointId, body: &str) -> Result<SendReceipt>;
}

/// Pacing between sends: the uniform draw and the suspension primitive are
/// separate operations so tests can assert the drawn duration without
/// sleeping.
#[async_trait]
pub trait Pacer: Send {
    fn draw(&mut self, range: &DelayRange) -> Duration;

    async fn pause(&mut self, delay: Duration);
}
