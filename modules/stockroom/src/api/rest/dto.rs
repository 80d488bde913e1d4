use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::domain::model::{ClockInRecord, EmailCount, Item};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDto {
    pub id: String,
    pub name: String,
    pub email: String,
    pub item_name: String,
    pub quantity: i64,
    #[serde(with = "time::serde::rfc3339")]
    pub expiry_date: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub insert_date: OffsetDateTime,
}

impl From<Item> for ItemDto {
    fn from(item: Item) -> Self {
        Self {
            id: item.id.to_string(),
            name: item.name,
            email: item.email,
            item_name: item.item_name,
            quantity: item.quantity,
            expiry_date: item.expiry_date,
            insert_date: item.insert_date,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockInDto {
    pub id: String,
    pub email: String,
    pub location: String,
    #[serde(with = "time::serde::rfc3339")]
    pub insert_datetime: OffsetDateTime,
}

impl From<ClockInRecord> for ClockInDto {
    fn from(record: ClockInRecord) -> Self {
        Self {
            id: record.id.to_string(),
            email: record.email,
            location: record.location,
            insert_datetime: record.insert_datetime,
        }
    }
}

/// One aggregation row; the group key is emitted as `_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailCountDto {
    #[serde(rename = "_id")]
    pub email: String,
    pub count: u64,
}

impl From<EmailCount> for EmailCountDto {
    fn from(c: EmailCount) -> Self {
        Self {
            email: c.email,
            count: c.count,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletedDto {
    pub detail: String,
}

impl DeletedDto {
    #[must_use]
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

/// Raw `/items/filter` query; parsed by the validation layer.
#[derive(Debug, Default, Deserialize)]
pub struct ItemFilterQuery {
    pub email: Option<String>,
    pub expiry_date: Option<String>,
    pub insert_date: Option<String>,
    pub quantity: Option<String>,
}

/// Raw `/clock-in/filter` query; parsed by the validation layer.
#[derive(Debug, Default, Deserialize)]
pub struct ClockInFilterQuery {
    pub email: Option<String>,
    pub location: Option<String>,
    pub insert_datetime: Option<String>,
}
