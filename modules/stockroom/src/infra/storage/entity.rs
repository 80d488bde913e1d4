//! Stored document shapes and their mapping to domain models.

use mongodb::bson::oid::ObjectId;
use mongodb::bson::{self, DateTime as BsonDateTime, Document};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::collection::StoreError;
use crate::domain::model::{
    ClockInRecord, EmailCount, Item, NewClockIn, NewItem, RecordId, canonical_timestamp,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub email: String,
    pub item_name: String,
    pub quantity: i64,
    pub expiry_date: BsonDateTime,
    pub insert_date: BsonDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClockInDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub email: String,
    pub location: String,
    pub insert_datetime: BsonDateTime,
}

/// One row of the group-by-email aggregation.
#[derive(Debug, Clone, Deserialize)]
pub struct EmailCountDocument {
    #[serde(rename = "_id")]
    pub email: Option<String>,
    pub count: i64,
}

#[must_use]
#[allow(clippy::integer_division)]
pub fn to_bson_datetime(ts: OffsetDateTime) -> BsonDateTime {
    let millis = ts.unix_timestamp_nanos() / 1_000_000;
    BsonDateTime::from_millis(i64::try_from(millis).unwrap_or(i64::MAX))
}

/// # Errors
/// Returns `StoreError::Decode` if the stored value is outside the supported range.
pub fn from_bson_datetime(dt: BsonDateTime) -> Result<OffsetDateTime, StoreError> {
    let nanos = i128::from(dt.timestamp_millis()) * 1_000_000;
    OffsetDateTime::from_unix_timestamp_nanos(nanos)
        .map(canonical_timestamp)
        .map_err(|e| StoreError::Decode(e.to_string()))
}

/// # Errors
/// Returns `StoreError::Encode` if `value` does not serialize to a document.
pub fn encode<T: Serialize>(value: &T) -> Result<Document, StoreError> {
    bson::to_document(value).map_err(|e| StoreError::Encode(e.to_string()))
}

/// # Errors
/// Returns `StoreError::Decode` if the document does not have the expected shape.
pub fn decode<T: for<'de> Deserialize<'de>>(document: Document) -> Result<T, StoreError> {
    bson::from_document(document).map_err(|e| StoreError::Decode(e.to_string()))
}

fn record_id(id: Option<ObjectId>) -> Result<RecordId, StoreError> {
    id.map(|oid| RecordId::new(oid.to_hex()))
        .ok_or_else(|| StoreError::Decode("document has no _id".to_owned()))
}

impl ItemDocument {
    #[must_use]
    pub fn new(item: &NewItem, insert_date: OffsetDateTime) -> Self {
        Self {
            id: None,
            name: item.name.clone(),
            email: item.email.clone(),
            item_name: item.item_name.clone(),
            quantity: item.quantity,
            expiry_date: to_bson_datetime(item.expiry_date),
            insert_date: to_bson_datetime(insert_date),
        }
    }
}

impl TryFrom<ItemDocument> for Item {
    type Error = StoreError;

    fn try_from(doc: ItemDocument) -> Result<Self, Self::Error> {
        Ok(Item {
            id: record_id(doc.id)?,
            name: doc.name,
            email: doc.email,
            item_name: doc.item_name,
            quantity: doc.quantity,
            expiry_date: from_bson_datetime(doc.expiry_date)?,
            insert_date: from_bson_datetime(doc.insert_date)?,
        })
    }
}

impl ClockInDocument {
    #[must_use]
    pub fn new(record: &NewClockIn, insert_datetime: OffsetDateTime) -> Self {
        Self {
            id: None,
            email: record.email.clone(),
            location: record.location.clone(),
            insert_datetime: to_bson_datetime(insert_datetime),
        }
    }
}

impl TryFrom<ClockInDocument> for ClockInRecord {
    type Error = StoreError;

    fn try_from(doc: ClockInDocument) -> Result<Self, Self::Error> {
        Ok(ClockInRecord {
            id: record_id(doc.id)?,
            email: doc.email,
            location: doc.location,
            insert_datetime: from_bson_datetime(doc.insert_datetime)?,
        })
    }
}

impl From<EmailCountDocument> for EmailCount {
    fn from(doc: EmailCountDocument) -> Self {
        EmailCount {
            email: doc.email.unwrap_or_default(),
            count: u64::try_from(doc.count).unwrap_or(0),
        }
    }
}
