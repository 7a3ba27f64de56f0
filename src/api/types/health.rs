//! Health-check types.

use serde::{Deserialize, Serialize};

/// Response for GET /api/ and for simple write acknowledgements.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatusMessage {
    /// Human-readable message
    #[serde(default)]
    pub message: String,
    /// Status text ("OK" on the health route)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl StatusMessage {
    pub fn is_ok(&self) -> bool {
        self.status.as_deref() == Some("OK")
    }
}
