//! Similarity-search types for the articles, executive and biography routes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Default number of results requested from similarity routes.
pub const DEFAULT_TOP_K: u32 = 5;

/// Document identifier as stored in MongoDB: integer ids for seeded data,
/// strings for everything else.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DocumentId {
    Int(i64),
    Text(String),
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentId::Int(n) => write!(f, "{}", n),
            DocumentId::Text(s) => f.write_str(s),
        }
    }
}

/// One ranked hit from GET /api/articles or GET /api/executive.
///
/// Executive orders reuse the same shape: `name` carries the order title and
/// `summary` the order text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityResult {
    /// Source document id
    pub article_id: DocumentId,
    /// Title ("Unnamed" when missing upstream)
    pub name: String,
    /// Summary or order text
    pub summary: String,
    /// Cosine similarity against the query embedding
    pub similarity_score: f64,
}

/// Response for GET /api/biography.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BiographyResponse {
    #[serde(default)]
    pub articles: Vec<SimilarityResult>,
    #[serde(default, rename = "executive orders")]
    pub executive_orders: Vec<SimilarityResult>,
}

/// Query parameters for the similarity routes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityQuery {
    /// Free-text query (required, non-empty)
    pub query_text: String,
    /// Number of results
    pub top_k: u32,
}

impl SimilarityQuery {
    pub fn new(query_text: impl Into<String>) -> Self {
        Self {
            query_text: query_text.into(),
            top_k: DEFAULT_TOP_K,
        }
    }

    pub fn with_top_k(mut self, top_k: u32) -> Self {
        self.top_k = top_k;
        self
    }
}
