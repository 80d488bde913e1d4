use async_trait::async_trait;
use time::OffsetDateTime;

use super::error::DomainError;
use super::model::{
    ClockInFilter, ClockInRecord, EmailCount, Item, ItemFilter, NewClockIn, NewItem, RecordId,
};

/// Persistence operations for inventory items.
///
/// Each method maps to exactly one store call. Identifiers the store cannot
/// parse fail with `DomainError::MalformedIdentifier`.
#[async_trait]
pub trait ItemsRepository: Send + Sync {
    /// Insert a new item stamped with `insert_date`; returns the generated id.
    async fn insert(
        &self,
        item: &NewItem,
        insert_date: OffsetDateTime,
    ) -> Result<RecordId, DomainError>;

    async fn get(&self, id: &RecordId) -> Result<Option<Item>, DomainError>;

    /// Items matching every constraint of `filter`, in store order.
    async fn find(&self, filter: &ItemFilter) -> Result<Vec<Item>, DomainError>;

    /// Overwrite the client-settable fields; returns whether a record matched.
    async fn update(&self, id: &RecordId, item: &NewItem) -> Result<bool, DomainError>;

    /// Returns whether a record was removed.
    async fn delete(&self, id: &RecordId) -> Result<bool, DomainError>;

    async fn count_by_email(&self) -> Result<Vec<EmailCount>, DomainError>;
}

/// Persistence operations for clock-in records.
#[async_trait]
pub trait ClockInRepository: Send + Sync {
    async fn insert(
        &self,
        record: &NewClockIn,
        insert_datetime: OffsetDateTime,
    ) -> Result<RecordId, DomainError>;

    async fn get(&self, id: &RecordId) -> Result<Option<ClockInRecord>, DomainError>;

    async fn find(&self, filter: &ClockInFilter) -> Result<Vec<ClockInRecord>, DomainError>;

    async fn update(&self, id: &RecordId, record: &NewClockIn) -> Result<bool, DomainError>;

    async fn delete(&self, id: &RecordId) -> Result<bool, DomainError>;
}
