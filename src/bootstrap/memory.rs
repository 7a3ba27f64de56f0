//! In-memory schema backend.
//!
//! Creating a collection or index twice is an error here, which makes it a
//! strict stand-in for checking that a plan is applied idempotently.

use std::collections::BTreeMap;

use async_lock::RwLock;
use async_trait::async_trait;

use super::{BootstrapError, SchemaAdmin};

#[derive(Debug, Default)]
pub struct MemorySchema {
    /// collection name → unique-indexed fields
    collections: RwLock<BTreeMap<String, Vec<String>>>,
}

impl MemorySchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every collection and its unique-indexed fields.
    pub async fn snapshot(&self) -> BTreeMap<String, Vec<String>> {
        self.collections.read().await.clone()
    }
}

#[async_trait]
impl SchemaAdmin for MemorySchema {
    async fn collection_names(&self) -> Result<Vec<String>, BootstrapError> {
        Ok(self.collections.read().await.keys().cloned().collect())
    }

    async fn create_collection(&self, name: &str) -> Result<(), BootstrapError> {
        let mut collections = self.collections.write().await;
        if collections.contains_key(name) {
            return Err(BootstrapError::DuplicateCollection(name.to_string()));
        }
        collections.insert(name.to_string(), Vec::new());
        Ok(())
    }

    async fn unique_index_fields(&self, collection: &str) -> Result<Vec<String>, BootstrapError> {
        self.collections
            .read()
            .await
            .get(collection)
            .cloned()
            .ok_or_else(|| BootstrapError::UnknownCollection(collection.to_string()))
    }

    async fn create_unique_index(&self, collection: &str, field: &str) -> Result<(), BootstrapError> {
        let mut collections = self.collections.write().await;
        let fields = collections
            .get_mut(collection)
            .ok_or_else(|| BootstrapError::UnknownCollection(collection.to_string()))?;
        if fields.iter().any(|f| f == field) {
            return Err(BootstrapError::DuplicateIndex {
                collection: collection.to_string(),
                field: field.to_string(),
            });
        }
        fields.push(field.to_string());
        Ok(())
    }
}
