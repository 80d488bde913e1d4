use async_trait::async_trait;
use mongodb::bson::Document;
use mongodb::bson::oid::ObjectId;
use thiserror::Error;

use crate::domain::error::{DomainError, Resource};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("malformed identifier '{0}'")]
    MalformedIdentifier(String),

    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("failed to encode document: {0}")]
    Encode(String),

    #[error("failed to decode document: {0}")]
    Decode(String),

    #[error("unsupported query operator '{0}'")]
    UnsupportedQuery(String),
}

impl From<mongodb::error::Error> for StoreError {
    fn from(e: mongodb::error::Error) -> Self {
        Self::Unavailable(e.to_string())
    }
}

impl StoreError {
    /// Convert into the domain error for a given collection.
    pub fn into_domain(self, resource: Resource) -> DomainError {
        match self {
            StoreError::MalformedIdentifier(id) => DomainError::malformed_identifier(resource, id),
            other => DomainError::store_unavailable(other.to_string()),
        }
    }
}

/// Outcome of an `update_one` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UpdateCounts {
    pub matched: u64,
    pub modified: u64,
}

/// One collection of the document store.
///
/// All methods are single pass-through store calls: no retries, no caching.
/// Identifiers are the string form of the store's `ObjectId`.
#[async_trait]
pub trait DocumentCollection: Send + Sync {
    /// Insert a document and return its generated id.
    async fn insert(&self, document: Document) -> Result<String, StoreError>;

    async fn find_one(&self, id: &str) -> Result<Option<Document>, StoreError>;

    /// Documents matching a query filter (`{field: value}` or
    /// `{field: {"$gt": value}}`), in store order.
    async fn find_many(&self, filter: Document) -> Result<Vec<Document>, StoreError>;

    /// Apply `$set` of `fields` to the document with `id`.
    async fn update_one(&self, id: &str, fields: Document) -> Result<UpdateCounts, StoreError>;

    /// Returns the number of deleted documents (0 or 1).
    async fn delete_one(&self, id: &str) -> Result<u64, StoreError>;

    /// Group all documents by `field`; yields `{_id: <value>, count: <n>}`.
    async fn count_by(&self, field: &str) -> Result<Vec<Document>, StoreError>;
}

/// Parse the string form of a store identifier.
///
/// # Errors
/// Returns `StoreError::MalformedIdentifier` unless `id` is 24 hex characters.
pub fn parse_object_id(id: &str) -> Result<ObjectId, StoreError> {
    ObjectId::parse_str(id).map_err(|_| StoreError::MalformedIdentifier(id.to_owned()))
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_object_id() {
        let oid = parse_object_id("652a1f0c9b1e8a3d4c5b6a79").unwrap();
        assert_eq!(oid.to_hex(), "652a1f0c9b1e8a3d4c5b6a79");
    }

    #[test]
    fn rejects_malformed_ids() {
        for bad in ["", "123", "zzzzzzzzzzzzzzzzzzzzzzzz", "652a1f0c9b1e8a3d4c5b6a79ff"] {
            assert!(matches!(
                parse_object_id(bad),
                Err(StoreError::MalformedIdentifier(_))
            ));
        }
    }

    #[test]
    fn malformed_id_maps_to_domain_kind() {
        let err = StoreError::MalformedIdentifier("x".to_owned()).into_domain(Resource::Item);
        assert!(matches!(err, DomainError::MalformedIdentifier { .. }));

        let err = StoreError::Unavailable("down".to_owned()).into_domain(Resource::Item);
        assert!(matches!(err, DomainError::StoreUnavailable { .. }));
    }
}
