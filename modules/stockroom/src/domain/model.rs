//! Domain models for inventory items and clock-in records.
//!
//! These are storage-agnostic: identifiers are carried in their string form and
//! timestamps as UTC `OffsetDateTime` values with millisecond precision.

use std::fmt;

use time::{OffsetDateTime, UtcOffset};

/// Store-assigned identifier of a record, in its string form.
///
/// Only the storage adapter knows how to interpret it; a value that the store
/// cannot parse surfaces as `DomainError::MalformedIdentifier`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordId(String);

impl RecordId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Normalize a timestamp to UTC with millisecond precision.
///
/// Every timestamp entering the system passes through here so that values read
/// back from the store compare equal to the values that were written.
#[must_use]
pub fn canonical_timestamp(ts: OffsetDateTime) -> OffsetDateTime {
    let utc = ts.to_offset(UtcOffset::UTC);
    utc.replace_millisecond(utc.millisecond()).unwrap_or(utc)
}

/// Current server time in canonical form.
#[must_use]
pub fn now() -> OffsetDateTime {
    canonical_timestamp(OffsetDateTime::now_utc())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub id: RecordId,
    pub name: String,
    pub email: String,
    pub item_name: String,
    pub quantity: i64,
    pub expiry_date: OffsetDateTime,
    /// Server clock at creation; never changed afterwards.
    pub insert_date: OffsetDateTime,
}

/// Client-settable item fields, used for both create and update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewItem {
    pub name: String,
    pub email: String,
    pub item_name: String,
    pub quantity: i64,
    pub expiry_date: OffsetDateTime,
}

impl NewItem {
    #[must_use]
    pub fn into_item(self, id: RecordId, insert_date: OffsetDateTime) -> Item {
        Item {
            id,
            name: self.name,
            email: self.email,
            item_name: self.item_name,
            quantity: self.quantity,
            expiry_date: self.expiry_date,
            insert_date,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClockInRecord {
    pub id: RecordId,
    pub email: String,
    pub location: String,
    /// Server clock at creation; never changed afterwards.
    pub insert_datetime: OffsetDateTime,
}

/// Client-settable clock-in fields, used for both create and update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewClockIn {
    pub email: String,
    pub location: String,
}

impl NewClockIn {
    #[must_use]
    pub fn into_record(self, id: RecordId, insert_datetime: OffsetDateTime) -> ClockInRecord {
        ClockInRecord {
            id,
            email: self.email,
            location: self.location,
            insert_datetime,
        }
    }
}

/// Item search constraints. `None` fields impose no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemFilter {
    /// exact match
    pub email: Option<String>,
    /// strictly later than
    pub expiry_after: Option<OffsetDateTime>,
    /// strictly later than
    pub inserted_after: Option<OffsetDateTime>,
    /// greater than or equal
    pub min_quantity: Option<i64>,
}

/// Clock-in search constraints. `None` fields impose no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClockInFilter {
    pub email: Option<String>,
    pub location: Option<String>,
    /// strictly later than
    pub inserted_after: Option<OffsetDateTime>,
}

/// Number of items sharing one email address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailCount {
    pub email: String,
    pub count: u64,
}
