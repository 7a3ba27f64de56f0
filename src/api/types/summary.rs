//! Types for POST /api/summarize.

use serde::{Deserialize, Serialize};

/// Request body for POST /api/summarize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummarizeRequest {
    pub prompt: String,
}

/// The subset of the summarize response the client keeps.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryResponse {
    /// Generated political-context summary
    #[serde(default)]
    pub llm_response: Option<String>,
    /// Supporting articles
    #[serde(default)]
    pub articles: Option<serde_json::Value>,
    /// Supporting executive orders
    #[serde(default)]
    pub executive_orders: Option<serde_json::Value>,
}
