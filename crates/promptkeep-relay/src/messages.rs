use serde::{Deserialize, Serialize};
use tracing::info;

/// A notification from another context. The relay does not interpret it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelayMessage {
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<serde_json::Value>,
}

impl RelayMessage {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            payload: None,
        }
    }

    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = Some(payload);
        self
    }

    /// Decode a message as it arrives over the wire.
    pub fn from_json(raw: &str) -> Result<Self, crate::RelayError> {
        Ok(serde_json::from_str(raw)?)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ack {
    pub received: bool,
}

/// Fire-and-forget message sink. Counts what it has seen so hosts can tell
/// it is alive.
#[derive(Debug, Default)]
pub struct Relay {
    received: u64,
}

impl Relay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Log and acknowledge every message.
    pub fn on_message(&mut self, message: &RelayMessage) -> Ack {
        self.received += 1;
        info!(
            relay.kind = %message.kind,
            relay.has_payload = message.payload.is_some(),
            relay.received = self.received,
            "message received"
        );
        Ack { received: true }
    }

    pub fn received(&self) -> u64 {
        self.received
    }
}
