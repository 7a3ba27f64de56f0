//! One-time schema bootstrap: collections and unique indexes.
//!
//! [`run`] applies a [`BootstrapPlan`] through any [`SchemaAdmin`] backend.
//! Every step checks before it creates, so re-running the plan against an
//! initialized database changes nothing.

pub mod memory;
#[cfg(feature = "mongo")]
pub mod mongo;

pub use memory::MemorySchema;
#[cfg(feature = "mongo")]
pub use mongo::MongoSchema;

use async_trait::async_trait;
use thiserror::Error;

/// Bootstrap errors.
#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("Collection already exists: {0}")]
    DuplicateCollection(String),

    #[error("Unique index on {collection}.{field} already exists")]
    DuplicateIndex { collection: String, field: String },

    #[error("Unknown collection: {0}")]
    UnknownCollection(String),

    #[error("Config error: {0}")]
    Config(#[from] crate::config::ConfigError),

    #[cfg(feature = "mongo")]
    #[error("MongoDB error: {0}")]
    Mongo(#[from] mongodb::error::Error),

    #[error("Backend error: {0}")]
    Backend(String),
}

/// One collection and its optional single-field unique index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionSpec {
    pub name: String,
    pub unique_index: Option<String>,
}

impl CollectionSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            unique_index: None,
        }
    }

    /// Add an ascending unique index on `field`.
    pub fn unique(mut self, field: impl Into<String>) -> Self {
        self.unique_index = Some(field.into());
        self
    }
}

/// Ordered list of collections to ensure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapPlan {
    pub collections: Vec<CollectionSpec>,
}

impl Default for BootstrapPlan {
    /// The WhatTheGovDoin schema.
    fn default() -> Self {
        Self {
            collections: vec![
                CollectionSpec::new("issues").unique("issue_id"),
                CollectionSpec::new("users").unique("userid"),
                CollectionSpec::new("executive").unique("article_id"),
                CollectionSpec::new("articles").unique("article_id"),
            ],
        }
    }
}

impl BootstrapPlan {
    pub fn new(collections: Vec<CollectionSpec>) -> Self {
        Self { collections }
    }
}

/// Administrative operations a schema backend must provide.
#[async_trait]
pub trait SchemaAdmin: Send + Sync {
    /// Names of the collections that already exist.
    async fn collection_names(&self) -> Result<Vec<String>, BootstrapError>;

    async fn create_collection(&self, name: &str) -> Result<(), BootstrapError>;

    /// Fields covered by an existing single-field unique index on `collection`.
    async fn unique_index_fields(&self, collection: &str) -> Result<Vec<String>, BootstrapError>;

    async fn create_unique_index(&self, collection: &str, field: &str) -> Result<(), BootstrapError>;
}

/// What a bootstrap run changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BootstrapReport {
    pub created_collections: Vec<String>,
    pub existing_collections: Vec<String>,
    /// `(collection, field)` pairs
    pub created_indexes: Vec<(String, String)>,
    pub existing_indexes: Vec<(String, String)>,
}

impl BootstrapReport {
    /// `true` when the run created nothing.
    pub fn is_noop(&self) -> bool {
        self.created_collections.is_empty() && self.created_indexes.is_empty()
    }
}

/// Apply `plan` through `admin`, creating only what is missing.
pub async fn run<A: SchemaAdmin + ?Sized>(
    admin: &A,
    plan: &BootstrapPlan,
) -> Result<BootstrapReport, BootstrapError> {
    let mut report = BootstrapReport::default();
    let mut existing = admin.collection_names().await?;

    for spec in &plan.collections {
        if existing.iter().any(|name| name == &spec.name) {
            tracing::debug!(collection = %spec.name, "Collection exists");
            report.existing_collections.push(spec.name.clone());
        } else {
            admin.create_collection(&spec.name).await?;
            tracing::info!(collection = %spec.name, "Created collection");
            existing.push(spec.name.clone());
            report.created_collections.push(spec.name.clone());
        }

        let Some(field) = &spec.unique_index else {
            continue;
        };
        let entry = (spec.name.clone(), field.clone());
        let indexed = admin.unique_index_fields(&spec.name).await?;
        if indexed.iter().any(|f| f == field) {
            tracing::debug!(collection = %spec.name, field = %field, "Unique index exists");
            report.existing_indexes.push(entry);
        } else {
            admin.create_unique_index(&spec.name, field).await?;
            tracing::info!(collection = %spec.name, field = %field, "Created unique index");
            report.created_indexes.push(entry);
        }
    }

    Ok(report)
}
