use std::sync::Arc;

use async_trait::async_trait;
use mongodb::bson::{Document, doc};
use time::OffsetDateTime;

use super::collection::DocumentCollection;
use super::entity::{ClockInDocument, decode, encode, to_bson_datetime};
use crate::domain::error::{DomainError, Resource};
use crate::domain::model::{ClockInFilter, ClockInRecord, NewClockIn, RecordId};
use crate::domain::repo::ClockInRepository;

/// Clock-in repository over a single document collection.
pub struct DocumentClockInRepository {
    collection: Arc<dyn DocumentCollection>,
}

impl DocumentClockInRepository {
    #[must_use]
    pub fn new(collection: Arc<dyn DocumentCollection>) -> Self {
        Self { collection }
    }
}

pub(super) fn clock_in_filter_document(filter: &ClockInFilter) -> Document {
    let mut query = Document::new();
    if let Some(email) = &filter.email {
        query.insert("email", email.as_str());
    }
    if let Some(location) = &filter.location {
        query.insert("location", location.as_str());
    }
    if let Some(inserted) = filter.inserted_after {
        query.insert("insert_datetime", doc! { "$gt": to_bson_datetime(inserted) });
    }
    query
}

fn into_record(document: Document) -> Result<ClockInRecord, DomainError> {
    decode::<ClockInDocument>(document)
        .and_then(ClockInRecord::try_from)
        .map_err(|e| e.into_domain(Resource::ClockIn))
}

#[async_trait]
impl ClockInRepository for DocumentClockInRepository {
    async fn insert(
        &self,
        record: &NewClockIn,
        insert_datetime: OffsetDateTime,
    ) -> Result<RecordId, DomainError> {
        let document = encode(&ClockInDocument::new(record, insert_datetime))
            .map_err(|e| e.into_domain(Resource::ClockIn))?;
        let id = self
            .collection
            .insert(document)
            .await
            .map_err(|e| e.into_domain(Resource::ClockIn))?;
        Ok(RecordId::new(id))
    }

    async fn get(&self, id: &RecordId) -> Result<Option<ClockInRecord>, DomainError> {
        self.collection
            .find_one(id.as_str())
            .await
            .map_err(|e| e.into_domain(Resource::ClockIn))?
            .map(into_record)
            .transpose()
    }

    async fn find(&self, filter: &ClockInFilter) -> Result<Vec<ClockInRecord>, DomainError> {
        let documents = self
            .collection
            .find_many(clock_in_filter_document(filter))
            .await
            .map_err(|e| e.into_domain(Resource::ClockIn))?;
        documents.into_iter().map(into_record).collect()
    }

    async fn update(&self, id: &RecordId, record: &NewClockIn) -> Result<bool, DomainError> {
        let fields = doc! {
            "email": record.email.as_str(),
            "location": record.location.as_str(),
        };
        let counts = self
            .collection
            .update_one(id.as_str(), fields)
            .await
            .map_err(|e| e.into_domain(Resource::ClockIn))?;
        Ok(counts.matched > 0)
    }

    async fn delete(&self, id: &RecordId) -> Result<bool, DomainError> {
        let deleted = self
            .collection
            .delete_one(id.as_str())
            .await
            .map_err(|e| e.into_domain(Resource::ClockIn))?;
        Ok(deleted > 0)
    }
}
