use std::sync::Arc;

use async_trait::async_trait;
use mongodb::bson::{Document, doc};
use time::OffsetDateTime;

use super::collection::DocumentCollection;
use super::entity::{EmailCountDocument, ItemDocument, decode, encode, to_bson_datetime};
use crate::domain::error::{DomainError, Resource};
use crate::domain::model::{EmailCount, Item, ItemFilter, NewItem, RecordId};
use crate::domain::repo::ItemsRepository;

/// Items repository over a single document collection.
pub struct DocumentItemsRepository {
    collection: Arc<dyn DocumentCollection>,
}

impl DocumentItemsRepository {
    #[must_use]
    pub fn new(collection: Arc<dyn DocumentCollection>) -> Self {
        Self { collection }
    }
}

pub(super) fn item_filter_document(filter: &ItemFilter) -> Document {
    let mut query = Document::new();
    if let Some(email) = &filter.email {
        query.insert("email", email.as_str());
    }
    if let Some(expiry) = filter.expiry_after {
        query.insert("expiry_date", doc! { "$gt": to_bson_datetime(expiry) });
    }
    if let Some(inserted) = filter.inserted_after {
        query.insert("insert_date", doc! { "$gt": to_bson_datetime(inserted) });
    }
    if let Some(quantity) = filter.min_quantity {
        query.insert("quantity", doc! { "$gte": quantity });
    }
    query
}

/// Client-settable fields only; `insert_date` is never part of an update.
pub(super) fn item_update_document(item: &NewItem) -> Document {
    doc! {
        "name": item.name.as_str(),
        "email": item.email.as_str(),
        "item_name": item.item_name.as_str(),
        "quantity": item.quantity,
        "expiry_date": to_bson_datetime(item.expiry_date),
    }
}

fn into_item(document: Document) -> Result<Item, DomainError> {
    decode::<ItemDocument>(document)
        .and_then(Item::try_from)
        .map_err(|e| e.into_domain(Resource::Item))
}

#[async_trait]
impl ItemsRepository for DocumentItemsRepository {
    async fn insert(
        &self,
        item: &NewItem,
        insert_date: OffsetDateTime,
    ) -> Result<RecordId, DomainError> {
        let document =
            encode(&ItemDocument::new(item, insert_date)).map_err(|e| e.into_domain(Resource::Item))?;
        let id = self
            .collection
            .insert(document)
            .await
            .map_err(|e| e.into_domain(Resource::Item))?;
        Ok(RecordId::new(id))
    }

    async fn get(&self, id: &RecordId) -> Result<Option<Item>, DomainError> {
        self.collection
            .find_one(id.as_str())
            .await
            .map_err(|e| e.into_domain(Resource::Item))?
            .map(into_item)
            .transpose()
    }

    async fn find(&self, filter: &ItemFilter) -> Result<Vec<Item>, DomainError> {
        let documents = self
            .collection
            .find_many(item_filter_document(filter))
            .await
            .map_err(|e| e.into_domain(Resource::Item))?;
        documents.into_iter().map(into_item).collect()
    }

    async fn update(&self, id: &RecordId, item: &NewItem) -> Result<bool, DomainError> {
        let counts = self
            .collection
            .update_one(id.as_str(), item_update_document(item))
            .await
            .map_err(|e| e.into_domain(Resource::Item))?;
        tracing::debug!(
            matched = counts.matched,
            modified = counts.modified,
            "Item update applied"
        );
        Ok(counts.matched > 0)
    }

    async fn delete(&self, id: &RecordId) -> Result<bool, DomainError> {
        let deleted = self
            .collection
            .delete_one(id.as_str())
            .await
            .map_err(|e| e.into_domain(Resource::Item))?;
        Ok(deleted > 0)
    }

    async fn count_by_email(&self) -> Result<Vec<EmailCount>, DomainError> {
        let groups = self
            .collection
            .count_by("email")
            .await
            .map_err(|e| e.into_domain(Resource::Item))?;
        groups
            .into_iter()
            .map(|g| {
                decode::<EmailCountDocument>(g)
                    .map(EmailCount::from)
                    .map_err(|e| e.into_domain(Resource::Item))
            })
            .collect()
    }
}
