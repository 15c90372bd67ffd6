use crate::utils::error::{BroadcastError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A single broadcast recipient, produced by the contact reader. Both fields
/// are non-empty and trimmed; the number keeps its source formatting apart
/// from a stripped trailing comma.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub name: String,
    pub number: String,
}

/// Opaque identifier of a registered endpoint, as returned by the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointId(pub String);

impl EndpointId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Acknowledgement returned by the send operation. A missing id means the
/// message left the gateway without delivery confirmation.
#[derive(Debug, Clone)]
pub struct SendReceipt {
    pub message_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    Sent { message_id: String },
    NotRegistered,
    SentWithoutConfirmation,
    Failed { reason: String },
}

impl SendOutcome {
    /// Only a confirmed send counts as success. An unconfirmed send is
    /// tallied with the failures but stays a distinct variant so callers can
    /// tell it apart from hard failures.
    pub fn is_success(&self) -> bool {
        matches!(self, SendOutcome::Sent { .. })
    }
}

/// Per-contact progress event emitted by the orchestrator.
#[derive(Debug, Clone)]
pub struct SendEvent {
    pub index: usize,
    pub total: usize,
    pub contact: Contact,
    pub outcome: SendOutcome,
}

#[derive(Debug, Default)]
pub struct BroadcastReport {
    pub success_count: usize,
    pub fail_count: usize,
    pub events: Vec<SendEvent>,
}

/// Session lifecycle notifications of the messaging collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    QrCode(String),
    Authenticated,
    AuthFailed(String),
    Ready,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendMode {
    /// First contact only, a deterministic slice regardless of random state.
    Test,
    Full,
}

/// Inclusive delay bounds between consecutive sends. `min <= max` holds for
/// every constructed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelayRange {
    min: Duration,
    max: Duration,
}

impl DelayRange {
    pub fn new(min: Duration, max: Duration) -> Result<Self> {
        if min > max {
            return Err(BroadcastError::ConfigError {
                message: format!(
                    "invalid delay range: min ({:?}) is greater than max ({:?})",
                    min, max
                ),
            });
        }
        Ok(Self { min, max })
    }

    pub fn from_secs(min: u64, max: u64) -> Result<Self> {
        Self::new(Duration::from_secs(min), Duration::from_secs(max))
    }

    pub fn min(&self) -> Duration {
        self.min
    }

    pub fn max(&self) -> Duration {
        self.max
    }
}
