//! Share payload and its JSON wire form.

use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::ShareError;

/// Editor content plus the moment it was shared.
///
/// Serialized as `{"c": content, "t": timestamp}`. The short keys are part
/// of the wire contract shared with links already in circulation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharePayload {
    #[serde(rename = "c")]
    pub content: String,

    /// Milliseconds since the Unix epoch.
    #[serde(rename = "t")]
    pub timestamp: i64,
}

impl SharePayload {
    /// Creates payload stamped with the current wall clock time.
    pub fn new(content: impl Into<String>) -> Self {
        Self::with_timestamp(content, now_millis())
    }

    /// Creates payload with an explicit timestamp.
    pub fn with_timestamp(content: impl Into<String>, timestamp: i64) -> Self {
        Self {
            content: content.into(),
            timestamp,
        }
    }

    /// Serializes payload to its compact JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`ShareError::Serialization`] if serde_json fails.
    pub fn to_json(&self) -> Result<String, ShareError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Current time in milliseconds since the Unix epoch.
///
/// A clock set before the epoch reads as zero.
pub fn now_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}
