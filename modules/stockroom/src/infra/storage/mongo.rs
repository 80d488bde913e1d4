use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{Document, doc};
use mongodb::{Client, Collection, Database};

use super::collection::{DocumentCollection, StoreError, UpdateCounts, parse_object_id};
use crate::config::StoreConfig;

/// Long-lived connection to a MongoDB database.
///
/// Opened once at process start; the driver pools connections internally, and
/// collection handles are cheap clones of the shared client.
#[derive(Clone)]
pub struct MongoStore {
    database: Database,
}

impl MongoStore {
    /// # Errors
    /// Returns `StoreError::Unavailable` if the connection string is invalid.
    pub async fn connect(cfg: &StoreConfig) -> Result<Self, StoreError> {
        let client = Client::with_uri_str(&cfg.uri).await?;
        tracing::info!(database = %cfg.database, "Connected document store client");
        Ok(Self {
            database: client.database(&cfg.database),
        })
    }

    /// Round-trip to the server so misconfiguration fails at startup.
    ///
    /// # Errors
    /// Returns `StoreError::Unavailable` if the server cannot be reached.
    pub async fn ping(&self) -> Result<(), StoreError> {
        self.database.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }

    #[must_use]
    pub fn collection(&self, name: &str) -> MongoCollection {
        MongoCollection {
            inner: self.database.collection::<Document>(name),
        }
    }
}

pub struct MongoCollection {
    inner: Collection<Document>,
}

#[async_trait]
impl DocumentCollection for MongoCollection {
    async fn insert(&self, document: Document) -> Result<String, StoreError> {
        let result = self.inner.insert_one(document).await?;
        result
            .inserted_id
            .as_object_id()
            .map(|oid| oid.to_hex())
            .ok_or_else(|| StoreError::Decode(format!("unexpected _id {}", result.inserted_id)))
    }

    async fn find_one(&self, id: &str) -> Result<Option<Document>, StoreError> {
        let oid = parse_object_id(id)?;
        Ok(self.inner.find_one(doc! { "_id": oid }).await?)
    }

    async fn find_many(&self, filter: Document) -> Result<Vec<Document>, StoreError> {
        let cursor = self.inner.find(filter).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn update_one(&self, id: &str, fields: Document) -> Result<UpdateCounts, StoreError> {
        let oid = parse_object_id(id)?;
        let result = self
            .inner
            .update_one(doc! { "_id": oid }, doc! { "$set": fields })
            .await?;
        Ok(UpdateCounts {
            matched: result.matched_count,
            modified: result.modified_count,
        })
    }

    async fn delete_one(&self, id: &str) -> Result<u64, StoreError> {
        let oid = parse_object_id(id)?;
        let result = self.inner.delete_one(doc! { "_id": oid }).await?;
        Ok(result.deleted_count)
    }

    async fn count_by(&self, field: &str) -> Result<Vec<Document>, StoreError> {
        let pipeline = [doc! {
            "$group": { "_id": format!("${field}"), "count": { "$sum": 1 } }
        }];
        let cursor = self.inner.aggregate(pipeline).await?;
        Ok(cursor.try_collect().await?)
    }
}
