//! Structural validation of incoming payloads and filter parameters.
//!
//! Every field is checked and all violations are reported together; nothing
//! reaches the store unless the whole payload is valid. Unknown fields are
//! ignored, including client attempts to set `id` or the insert timestamps.

use serde_json::{Map, Value};
use time::format_description::well_known::{Iso8601, Rfc3339};
use time::{OffsetDateTime, PrimitiveDateTime};
use validator::ValidateEmail;

use super::error::{DomainError, FieldViolation};
use super::model::{ClockInFilter, ItemFilter, NewClockIn, NewItem, canonical_timestamp};

/// Validate an item payload for create or full update.
///
/// # Errors
/// Returns `DomainError::Validation` listing every offending field.
pub fn new_item(payload: &Value) -> Result<NewItem, DomainError> {
    let fields = object(payload)?;

    match (
        string(fields, "name"),
        email(fields, "email"),
        string(fields, "item_name"),
        integer(fields, "quantity"),
        timestamp(fields, "expiry_date"),
    ) {
        (Ok(name), Ok(email), Ok(item_name), Ok(quantity), Ok(expiry_date)) => Ok(NewItem {
            name,
            email,
            item_name,
            quantity,
            expiry_date,
        }),
        (name, email, item_name, quantity, expiry_date) => Err(DomainError::validation(
            [
                name.err(),
                email.err(),
                item_name.err(),
                quantity.err(),
                expiry_date.err(),
            ]
            .into_iter()
            .flatten()
            .collect(),
        )),
    }
}

/// Validate a clock-in payload for create or full update.
///
/// # Errors
/// Returns `DomainError::Validation` listing every offending field.
pub fn new_clock_in(payload: &Value) -> Result<NewClockIn, DomainError> {
    let fields = object(payload)?;

    match (email(fields, "email"), string(fields, "location")) {
        (Ok(email), Ok(location)) => Ok(NewClockIn { email, location }),
        (email, location) => Err(DomainError::validation(
            [email.err(), location.err()].into_iter().flatten().collect(),
        )),
    }
}

/// Build an item filter from raw query parameters.
///
/// Empty parameters are treated as absent.
///
/// # Errors
/// Returns `DomainError::Validation` when `quantity` is not an integer or a
/// date parameter is not a timestamp.
pub fn item_filter(
    email: Option<&str>,
    expiry_date: Option<&str>,
    insert_date: Option<&str>,
    quantity: Option<&str>,
) -> Result<ItemFilter, DomainError> {
    match (
        optional_timestamp("expiry_date", expiry_date),
        optional_timestamp("insert_date", insert_date),
        optional_integer("quantity", quantity),
    ) {
        (Ok(expiry_after), Ok(inserted_after), Ok(min_quantity)) => Ok(ItemFilter {
            email: optional_text(email),
            expiry_after,
            inserted_after,
            min_quantity,
        }),
        (expiry_date, insert_date, quantity) => Err(DomainError::validation(
            [expiry_date.err(), insert_date.err(), quantity.err()]
                .into_iter()
                .flatten()
                .collect(),
        )),
    }
}

/// Build a clock-in filter from raw query parameters.
///
/// # Errors
/// Returns `DomainError::Validation` when `insert_datetime` is not a timestamp.
pub fn clock_in_filter(
    email: Option<&str>,
    location: Option<&str>,
    insert_datetime: Option<&str>,
) -> Result<ClockInFilter, DomainError> {
    let inserted_after =
        optional_timestamp("insert_datetime", insert_datetime).map_err(|v| {
            DomainError::validation(vec![v])
        })?;

    Ok(ClockInFilter {
        email: optional_text(email),
        location: optional_text(location),
        inserted_after,
    })
}

/// Parse a timestamp in canonical form.
///
/// Accepts RFC 3339 (`2025-01-01T00:00:00Z`, `2025-01-01T02:00:00+02:00`) or an
/// ISO 8601 date-time without offset, which is taken as UTC.
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<OffsetDateTime> {
    let raw = raw.trim();
    OffsetDateTime::parse(raw, &Rfc3339)
        .ok()
        .or_else(|| {
            PrimitiveDateTime::parse(raw, &Iso8601::DEFAULT)
                .ok()
                .map(PrimitiveDateTime::assume_utc)
        })
        .map(canonical_timestamp)
}

fn object(payload: &Value) -> Result<&Map<String, Value>, DomainError> {
    payload
        .as_object()
        .ok_or_else(|| DomainError::field("body", "expected a JSON object"))
}

fn required<'a>(fields: &'a Map<String, Value>, name: &str) -> Result<&'a Value, FieldViolation> {
    match fields.get(name) {
        None | Some(Value::Null) => Err(FieldViolation::new(name, "field required")),
        Some(value) => Ok(value),
    }
}

fn string(fields: &Map<String, Value>, name: &str) -> Result<String, FieldViolation> {
    required(fields, name)?
        .as_str()
        .map(ToOwned::to_owned)
        .ok_or_else(|| FieldViolation::new(name, "must be a string"))
}

fn email(fields: &Map<String, Value>, name: &str) -> Result<String, FieldViolation> {
    let value = string(fields, name)?;
    if value.as_str().validate_email() {
        Ok(value)
    } else {
        Err(FieldViolation::new(name, "must be a valid email address"))
    }
}

/// Integral floats such as `5.0` are accepted.
fn integer(fields: &Map<String, Value>, name: &str) -> Result<i64, FieldViolation> {
    let value = required(fields, name)?;
    value
        .as_i64()
        .or_else(|| value.as_f64().and_then(integral_float))
        .ok_or_else(|| FieldViolation::new(name, "must be an integer"))
}

#[allow(clippy::cast_possible_truncation)]
fn integral_float(f: f64) -> Option<i64> {
    const LIMIT: f64 = 9_007_199_254_740_992.0; // 2^53

    (f.fract() == 0.0 && f.abs() <= LIMIT).then(|| f as i64)
}

fn timestamp(fields: &Map<String, Value>, name: &str) -> Result<OffsetDateTime, FieldViolation> {
    required(fields, name)?
        .as_str()
        .and_then(parse_timestamp)
        .ok_or_else(|| FieldViolation::new(name, "must be an RFC 3339 timestamp"))
}

fn optional_text(raw: Option<&str>) -> Option<String> {
    raw.filter(|s| !s.is_empty()).map(ToOwned::to_owned)
}

fn optional_integer(name: &str, raw: Option<&str>) -> Result<Option<i64>, FieldViolation> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(s) => s
            .parse::<i64>()
            .map(Some)
            .map_err(|_| FieldViolation::new(name, "must be an integer")),
    }
}

fn optional_timestamp(
    name: &str,
    raw: Option<&str>,
) -> Result<Option<OffsetDateTime>, FieldViolation> {
    match raw.filter(|s| !s.trim().is_empty()) {
        None => Ok(None),
        Some(s) => parse_timestamp(s)
            .map(Some)
            .ok_or_else(|| FieldViolation::new(name, "must be an RFC 3339 timestamp")),
    }
}
