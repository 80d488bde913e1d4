use std::sync::Arc;

use tracing::instrument;

use super::error::{DomainError, Resource};
use super::model::{
    ClockInFilter, ClockInRecord, EmailCount, Item, ItemFilter, NewClockIn, NewItem, RecordId, now,
};
use super::repo::{ClockInRepository, ItemsRepository};

mod clock_in;
mod items;

/// Request-level operations for both resources.
///
/// Holds no mutable state; all state lives behind the repositories, so one
/// instance is shared by every request.
pub struct Service {
    items: Arc<dyn ItemsRepository>,
    clock_ins: Arc<dyn ClockInRepository>,
}

impl Service {
    #[must_use]
    pub fn new(items: Arc<dyn ItemsRepository>, clock_ins: Arc<dyn ClockInRepository>) -> Self {
        Self { items, clock_ins }
    }

    // ==================== Item Operations ====================

    /// # Errors
    /// Returns `DomainError::StoreUnavailable` if the insert fails.
    #[instrument(skip_all, fields(email = %new_item.email))]
    pub async fn create_item(&self, new_item: NewItem) -> Result<Item, DomainError> {
        items::create_item(self, new_item).await
    }

    /// # Errors
    /// Returns `DomainError::NotFound` or `DomainError::MalformedIdentifier`
    /// when no such item exists.
    #[instrument(skip(self), fields(item_id = %id))]
    pub async fn get_item(&self, id: &RecordId) -> Result<Item, DomainError> {
        items::get_item(self, id).await
    }

    /// # Errors
    /// Returns `DomainError::StoreUnavailable` if the query fails.
    #[instrument(skip(self))]
    pub async fn filter_items(&self, filter: &ItemFilter) -> Result<Vec<Item>, DomainError> {
        items::filter_items(self, filter).await
    }

    /// # Errors
    /// Returns `DomainError::NotFound` when no item matched `id`.
    #[instrument(skip(self, patch), fields(item_id = %id))]
    pub async fn update_item(&self, id: &RecordId, patch: NewItem) -> Result<Item, DomainError> {
        items::update_item(self, id, patch).await
    }

    /// # Errors
    /// Returns `DomainError::NotFound` when nothing was deleted.
    #[instrument(skip(self), fields(item_id = %id))]
    pub async fn delete_item(&self, id: &RecordId) -> Result<(), DomainError> {
        items::delete_item(self, id).await
    }

    /// # Errors
    /// Returns `DomainError::StoreUnavailable` if the aggregation fails.
    #[instrument(skip(self))]
    pub async fn count_items_by_email(&self) -> Result<Vec<EmailCount>, DomainError> {
        items::count_items_by_email(self).await
    }

    // ==================== Clock-in Operations ====================

    /// # Errors
    /// Returns `DomainError::StoreUnavailable` if the insert fails.
    #[instrument(skip_all, fields(email = %new_record.email))]
    pub async fn create_clock_in(
        &self,
        new_record: NewClockIn,
    ) -> Result<ClockInRecord, DomainError> {
        clock_in::create_clock_in(self, new_record).await
    }

    /// # Errors
    /// Returns `DomainError::NotFound` or `DomainError::MalformedIdentifier`
    /// when no such record exists.
    #[instrument(skip(self), fields(clock_in_id = %id))]
    pub async fn get_clock_in(&self, id: &RecordId) -> Result<ClockInRecord, DomainError> {
        clock_in::get_clock_in(self, id).await
    }

    /// # Errors
    /// Returns `DomainError::StoreUnavailable` if the query fails.
    #[instrument(skip(self))]
    pub async fn filter_clock_ins(
        &self,
        filter: &ClockInFilter,
    ) -> Result<Vec<ClockInRecord>, DomainError> {
        clock_in::filter_clock_ins(self, filter).await
    }

    /// # Errors
    /// Returns `DomainError::NotFound` when no record matched `id`.
    #[instrument(skip(self, patch), fields(clock_in_id = %id))]
    pub async fn update_clock_in(
        &self,
        id: &RecordId,
        patch: NewClockIn,
    ) -> Result<ClockInRecord, DomainError> {
        clock_in::update_clock_in(self, id, patch).await
    }

    /// # Errors
    /// Returns `DomainError::NotFound` when nothing was deleted.
    #[instrument(skip(self), fields(clock_in_id = %id))]
    pub async fn delete_clock_in(&self, id: &RecordId) -> Result<(), DomainError> {
        clock_in::delete_clock_in(self, id).await
    }
}
