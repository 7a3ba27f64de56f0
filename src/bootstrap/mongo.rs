//! MongoDB schema backend.

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::{Bson, Document};
use mongodb::options::{ClientOptions, Credential, IndexOptions};
use mongodb::{Client, Database, IndexModel};

use super::{BootstrapError, SchemaAdmin};
use crate::config::RuntimeConfig;

/// Schema admin over a live MongoDB database.
#[derive(Debug, Clone)]
pub struct MongoSchema {
    db: Database,
}

impl MongoSchema {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Connect using `MONGO_URI`, the root credentials (auth source `admin`)
    /// and `MONGO_DATABASE` from `config`.
    pub async fn connect(config: &RuntimeConfig) -> Result<Self, BootstrapError> {
        let uri = config.require_mongo_uri()?;
        let mut options = ClientOptions::parse(uri).await?;

        if let (Some(username), Some(password)) = (&config.mongo_username, &config.mongo_password) {
            let mut credential = Credential::default();
            credential.username = Some(username.clone());
            credential.password = Some(password.clone());
            credential.source = Some("admin".to_string());
            options.credential = Some(credential);
        }

        let client = Client::with_options(options)?;
        tracing::info!(database = %config.mongo_database, "Connected to MongoDB");
        Ok(Self::new(client.database(&config.mongo_database)))
    }

    pub fn database(&self) -> &Database {
        &self.db
    }
}

/// The field of a single-field index key document.
fn single_field(keys: &Document) -> Option<&str> {
    let mut fields = keys.keys();
    match (fields.next(), fields.next()) {
        (Some(field), None) => Some(field.as_str()),
        _ => None,
    }
}

#[async_trait]
impl SchemaAdmin for MongoSchema {
    async fn collection_names(&self) -> Result<Vec<String>, BootstrapError> {
        Ok(self.db.list_collection_names().await?)
    }

    async fn create_collection(&self, name: &str) -> Result<(), BootstrapError> {
        self.db.create_collection(name).await?;
        Ok(())
    }

    async fn unique_index_fields(&self, collection: &str) -> Result<Vec<String>, BootstrapError> {
        let indexes: Vec<IndexModel> = self
            .db
            .collection::<Document>(collection)
            .list_indexes()
            .await?
            .try_collect()
            .await?;

        Ok(indexes
            .iter()
            .filter(|model| {
                model
                    .options
                    .as_ref()
                    .and_then(|o| o.unique)
                    .unwrap_or(false)
            })
            .filter_map(|model| single_field(&model.keys).map(str::to_string))
            .collect())
    }

    async fn create_unique_index(&self, collection: &str, field: &str) -> Result<(), BootstrapError> {
        let mut keys = Document::new();
        keys.insert(field, Bson::Int32(1));
        let model = IndexModel::builder()
            .keys(keys)
            .options(IndexOptions::builder().unique(true).build())
            .build();
        self.db
            .collection::<Document>(collection)
            .create_index(model)
            .await?;
        Ok(())
    }
}
