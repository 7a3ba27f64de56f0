//! Issue documents served by /api/issues.

use serde::{Deserialize, Serialize};

/// A tracked political issue with its linked coverage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    /// Numeric issue id (`_id` on the wire)
    #[serde(rename = "_id")]
    pub id: i64,
    pub issue: String,
    pub summary: String,
    /// LLM-generated summary ("TBD" until generated)
    pub llm_summary: String,
    /// Linked articles; shape is owned by the service
    #[serde(default)]
    pub articles: Vec<serde_json::Value>,
    /// Linked executive orders; shape is owned by the service
    #[serde(default)]
    pub executive_orders: Vec<serde_json::Value>,
}

impl Issue {
    pub fn new(id: i64, issue: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            id,
            issue: issue.into(),
            summary: summary.into(),
            llm_summary: "TBD".to_string(),
            articles: Vec::new(),
            executive_orders: Vec::new(),
        }
    }

    pub fn with_llm_summary(mut self, llm_summary: impl Into<String>) -> Self {
        self.llm_summary = llm_summary.into();
        self
    }
}
