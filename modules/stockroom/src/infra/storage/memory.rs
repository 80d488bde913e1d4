use std::cmp::Ordering;

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{Bson, Document, doc};
use parking_lot::Mutex;

use super::collection::{DocumentCollection, StoreError, UpdateCounts, parse_object_id};

/// Process-local collection with the same query semantics the service relies on.
///
/// Used by `--mock` runs and by tests. Supports equality plus the
/// `$eq`, `$gt`, `$gte`, `$lt` and `$lte` operators.
#[derive(Default)]
pub struct InMemoryCollection {
    documents: Mutex<Vec<Document>>,
}

impl InMemoryCollection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn has_id(document: &Document, oid: ObjectId) -> bool {
    matches!(document.get("_id"), Some(Bson::ObjectId(id)) if *id == oid)
}

fn compare_bson(left: &Bson, right: &Bson) -> Option<Ordering> {
    match (left, right) {
        (Bson::String(a), Bson::String(b)) => Some(a.cmp(b)),
        (Bson::DateTime(a), Bson::DateTime(b)) => {
            Some(a.timestamp_millis().cmp(&b.timestamp_millis()))
        }
        (Bson::ObjectId(a), Bson::ObjectId(b)) => Some(a.bytes().cmp(&b.bytes())),
        (Bson::Boolean(a), Bson::Boolean(b)) => Some(a.cmp(b)),
        _ => match (as_i64(left), as_i64(right)) {
            (Some(a), Some(b)) => Some(a.cmp(&b)),
            _ => as_f64(left)?.partial_cmp(&as_f64(right)?),
        },
    }
}

fn as_i64(value: &Bson) -> Option<i64> {
    match value {
        Bson::Int32(v) => Some(i64::from(*v)),
        Bson::Int64(v) => Some(*v),
        _ => None,
    }
}

#[allow(clippy::cast_precision_loss)]
fn as_f64(value: &Bson) -> Option<f64> {
    match value {
        Bson::Double(v) => Some(*v),
        Bson::Int32(v) => Some(f64::from(*v)),
        Bson::Int64(v) => Some(*v as f64),
        _ => None,
    }
}

fn condition_holds(actual: Option<&Bson>, condition: &Bson) -> Result<bool, StoreError> {
    let Bson::Document(ops) = condition else {
        return Ok(actual.and_then(|a| compare_bson(a, condition)) == Some(Ordering::Equal));
    };

    for (op, operand) in ops {
        let ordering = actual.and_then(|a| compare_bson(a, operand));
        let holds = match op.as_str() {
            "$eq" => ordering == Some(Ordering::Equal),
            "$gt" => ordering == Some(Ordering::Greater),
            "$gte" => matches!(ordering, Some(Ordering::Greater | Ordering::Equal)),
            "$lt" => ordering == Some(Ordering::Less),
            "$lte" => matches!(ordering, Some(Ordering::Less | Ordering::Equal)),
            other => return Err(StoreError::UnsupportedQuery(other.to_owned())),
        };
        if !holds {
            return Ok(false);
        }
    }
    Ok(true)
}

fn matches_filter(document: &Document, filter: &Document) -> Result<bool, StoreError> {
    for (field, condition) in filter {
        if !condition_holds(document.get(field), condition)? {
            return Ok(false);
        }
    }
    Ok(true)
}

#[async_trait]
impl DocumentCollection for InMemoryCollection {
    async fn insert(&self, mut document: Document) -> Result<String, StoreError> {
        let oid = ObjectId::new();
        document.insert("_id", oid);
        self.documents.lock().push(document);
        Ok(oid.to_hex())
    }

    async fn find_one(&self, id: &str) -> Result<Option<Document>, StoreError> {
        let oid = parse_object_id(id)?;
        Ok(self
            .documents
            .lock()
            .iter()
            .find(|d| has_id(d, oid))
            .cloned())
    }

    async fn find_many(&self, filter: Document) -> Result<Vec<Document>, StoreError> {
        let documents = self.documents.lock();
        let mut found = Vec::new();
        for document in documents.iter() {
            if matches_filter(document, &filter)? {
                found.push(document.clone());
            }
        }
        Ok(found)
    }

    async fn update_one(&self, id: &str, fields: Document) -> Result<UpdateCounts, StoreError> {
        let oid = parse_object_id(id)?;
        let mut documents = self.documents.lock();
        let Some(document) = documents.iter_mut().find(|d| has_id(d, oid)) else {
            return Ok(UpdateCounts::default());
        };

        let mut modified = false;
        for (key, value) in fields {
            if document.get(&key) != Some(&value) {
                document.insert(key, value);
                modified = true;
            }
        }
        Ok(UpdateCounts {
            matched: 1,
            modified: u64::from(modified),
        })
    }

    async fn delete_one(&self, id: &str) -> Result<u64, StoreError> {
        let oid = parse_object_id(id)?;
        let mut documents = self.documents.lock();
        match documents.iter().position(|d| has_id(d, oid)) {
            Some(index) => {
                documents.remove(index);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn count_by(&self, field: &str) -> Result<Vec<Document>, StoreError> {
        let documents = self.documents.lock();
        let mut groups: Vec<(Bson, i64)> = Vec::new();
        for document in documents.iter() {
            let key = document.get(field).cloned().unwrap_or(Bson::Null);
            match groups.iter_mut().find(|(k, _)| *k == key) {
                Some((_, count)) => *count += 1,
                None => groups.push((key, 1)),
            }
        }
        Ok(groups
            .into_iter()
            .map(|(key, count)| doc! { "_id": key, "count": count })
            .collect())
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use mongodb::bson::DateTime;

    #[tokio::test]
    async fn insert_assigns_hex_ids() {
        let coll = InMemoryCollection::new();
        let a = coll.insert(doc! { "x": 1 }).await.unwrap();
        let b = coll.insert(doc! { "x": 2 }).await.unwrap();
        assert_eq!(a.len(), 24);
        assert_ne!(a, b);
        assert_eq!(coll.find_many(doc! {}).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn filters_by_equality_and_ranges() {
        let coll = InMemoryCollection::new();
        for (email, qty, at) in [("a@x.com", 5_i64, 1_000), ("b@x.com", 10, 2_000), ("a@x.com", 1, 3_000)] {
            coll.insert(doc! { "email": email, "quantity": qty, "at": DateTime::from_millis(at) })
                .await
                .unwrap();
        }

        let by_email = coll.find_many(doc! { "email": "a@x.com" }).await.unwrap();
        assert_eq!(by_email.len(), 2);

        let at_least_five = coll
            .find_many(doc! { "quantity": { "$gte": 5_i64 } })
            .await
            .unwrap();
        assert_eq!(at_least_five.len(), 2);

        let after = coll
            .find_many(doc! { "at": { "$gt": DateTime::from_millis(2_000) } })
            .await
            .unwrap();
        assert_eq!(after.len(), 1);

        let combined = coll
            .find_many(doc! { "email": "a@x.com", "quantity": { "$gte": 5_i64 } })
            .await
            .unwrap();
        assert_eq!(combined.len(), 1);
    }

    #[tokio::test]
    async fn unknown_operator_is_rejected() {
        let coll = InMemoryCollection::new();
        coll.insert(doc! { "x": 1 }).await.unwrap();
        let err = coll
            .find_many(doc! { "x": { "$regex": "1" } })
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::UnsupportedQuery(op) if op == "$regex"));
    }

    #[tokio::test]
    async fn update_reports_matched_and_modified() {
        let coll = InMemoryCollection::new();
        let id = coll.insert(doc! { "name": "a" }).await.unwrap();

        let counts = coll.update_one(&id, doc! { "name": "b" }).await.unwrap();
        assert_eq!(counts, UpdateCounts { matched: 1, modified: 1 });

        let counts = coll.update_one(&id, doc! { "name": "b" }).await.unwrap();
        assert_eq!(counts, UpdateCounts { matched: 1, modified: 0 });

        let missing = ObjectId::new().to_hex();
        let counts = coll.update_one(&missing, doc! { "name": "c" }).await.unwrap();
        assert_eq!(counts, UpdateCounts::default());
    }

    #[tokio::test]
    async fn delete_removes_once() {
        let coll = InMemoryCollection::new();
        let id = coll.insert(doc! { "name": "a" }).await.unwrap();
        assert_eq!(coll.delete_one(&id).await.unwrap(), 1);
        assert_eq!(coll.delete_one(&id).await.unwrap(), 0);
        assert!(coll.find_many(doc! {}).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn malformed_id_is_reported() {
        let coll = InMemoryCollection::new();
        assert!(matches!(
            coll.find_one("nope").await,
            Err(StoreError::MalformedIdentifier(_))
        ));
    }

    #[tokio::test]
    async fn count_by_groups_in_first_seen_order() {
        let coll = InMemoryCollection::new();
        for email in ["a@x.com", "b@x.com", "a@x.com"] {
            coll.insert(doc! { "email": email }).await.unwrap();
        }
        let groups = coll.count_by("email").await.unwrap();
        assert_eq!(
            groups,
            vec![
                doc! { "_id": "a@x.com", "count": 2_i64 },
                doc! { "_id": "b@x.com", "count": 1_i64 },
            ]
        );
    }
}
