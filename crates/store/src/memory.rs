//! In-memory backend.
//!
//! Collections are vectors of BSON documents in insertion order behind an
//! async `RwLock`. Used by tests and by `records run --memory` to exercise
//! the full sequence without a database server.

use std::collections::HashMap;

use bson::oid::ObjectId;
use bson::{Bson, Document};
use tokio::sync::RwLock;

use crate::backend::{DocumentStore, StoreError, UpdateSummary};

/// In-memory document store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, Vec<Document>>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents in `collection`.
    pub async fn count(&self, collection: &str) -> usize {
        self.collections
            .read()
            .await
            .get(collection)
            .map_or(0, Vec::len)
    }
}

/// Whether `document` satisfies every condition in `filter`.
fn matches(document: &Document, filter: &Document) -> bool {
    filter.iter().all(|(key, expected)| {
        let actual = document.get(key);
        match expected {
            Bson::Document(condition) if condition.contains_key("$in") => {
                match (condition.get_array("$in"), actual) {
                    (Ok(candidates), Some(value)) => candidates.contains(value),
                    _ => false,
                }
            }
            _ => actual == Some(expected),
        }
    })
}

/// Apply a `$set` update in place. Returns whether anything changed.
fn apply_update(document: &mut Document, update: &Document) -> Result<bool, StoreError> {
    let mut changed = false;
    for (operator, fields) in update {
        let Bson::Document(fields) = fields else {
            return Err(StoreError::UnsupportedOperator(operator.clone()));
        };
        if operator != "$set" {
            return Err(StoreError::UnsupportedOperator(operator.clone()));
        }
        for (key, value) in fields {
            if document.get(key) != Some(value) {
                document.insert(key.clone(), value.clone());
                changed = true;
            }
        }
    }
    Ok(changed)
}

fn check_update(update: &Document) -> Result<(), StoreError> {
    match update.keys().find(|op| op.as_str() != "$set") {
        Some(op) => Err(StoreError::UnsupportedOperator(op.clone())),
        None => Ok(()),
    }
}

impl DocumentStore for MemoryStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn insert_one(
        &self,
        collection: &str,
        mut document: Document,
    ) -> Result<ObjectId, StoreError> {
        let id = match document.get_object_id("_id") {
            Ok(id) => id,
            Err(_) => {
                let id = ObjectId::new();
                document.insert("_id", id);
                id
            }
        };

        let mut collections = self.collections.write().await;
        let documents = collections.entry(collection.to_owned()).or_default();
        if documents
            .iter()
            .any(|d| d.get_object_id("_id").is_ok_and(|existing| existing == id))
        {
            return Err(StoreError::DuplicateKey(id));
        }
        documents.push(document);
        Ok(id)
    }

    async fn find_one(
        &self,
        collection: &str,
        filter: Document,
    ) -> Result<Option<Document>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.iter().find(|d| matches(d, &filter)))
            .cloned())
    }

    async fn find_by_ids(
        &self,
        collection: &str,
        ids: Vec<ObjectId>,
    ) -> Result<Vec<Document>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .filter(|d| d.get_object_id("_id").is_ok_and(|id| ids.contains(&id)))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn update_one(
        &self,
        collection: &str,
        filter: Document,
        update: Document,
    ) -> Result<UpdateSummary, StoreError> {
        check_update(&update)?;
        let mut collections = self.collections.write().await;
        let Some(document) = collections
            .get_mut(collection)
            .and_then(|docs| docs.iter_mut().find(|d| matches(d, &filter)))
        else {
            return Ok(UpdateSummary::default());
        };

        let changed = apply_update(document, &update)?;
        Ok(UpdateSummary {
            matched: 1,
            modified: u64::from(changed),
        })
    }

    async fn find_one_and_update(
        &self,
        collection: &str,
        filter: Document,
        update: Document,
    ) -> Result<Option<Document>, StoreError> {
        check_update(&update)?;
        let mut collections = self.collections.write().await;
        let Some(document) = collections
            .get_mut(collection)
            .and_then(|docs| docs.iter_mut().find(|d| matches(d, &filter)))
        else {
            return Ok(None);
        };

        apply_update(document, &update)?;
        Ok(Some(document.clone()))
    }

    async fn find_one_and_delete(
        &self,
        collection: &str,
        filter: Document,
    ) -> Result<Option<Document>, StoreError> {
        let mut collections = self.collections.write().await;
        Ok(collections.get_mut(collection).and_then(|docs| {
            docs.iter()
                .position(|d| matches(d, &filter))
                .map(|index| docs.remove(index))
        }))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn shutdown(self) {}
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use bson::doc;

    use super::*;

    async fn seeded() -> MemoryStore {
        let store = MemoryStore::new();
        store
            .insert_one("users", doc! { "username": "alice", "age": 30 })
            .await
            .unwrap();
        store
            .insert_one("users", doc! { "username": "bob", "age": 40 })
            .await
            .unwrap();
        store
    }

    #[tokio::test]
    async fn test_insert_assigns_id() {
        let store = MemoryStore::new();
        let id = store.insert_one("things", doc! { "n": 1 }).await.unwrap();
        let found = store
            .find_one("things", doc! { "_id": id })
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.get_i32("n").unwrap(), 1);
    }

    #[tokio::test]
    async fn test_insert_keeps_given_id_and_rejects_duplicates() {
        let store = MemoryStore::new();
        let id = ObjectId::new();
        let returned = store.insert_one("things", doc! { "_id": id }).await.unwrap();
        assert_eq!(returned, id);

        let err = store.insert_one("things", doc! { "_id": id }).await.unwrap_err();
        assert!(matches!(err, StoreError::DuplicateKey(dup) if dup == id));
    }

    #[tokio::test]
    async fn test_find_one_no_match() {
        let store = seeded().await;
        assert!(store.find_one("users", doc! { "username": "carol" }).await.unwrap().is_none());
        assert!(store.find_one("missing", doc! {}).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_one_touches_first_match_only() {
        let store = seeded().await;
        let summary = store
            .update_one("users", doc! { "username": "alice" }, doc! { "$set": { "age": 31 } })
            .await
            .unwrap();
        assert_eq!(summary, UpdateSummary { matched: 1, modified: 1 });

        let bob = store.find_one("users", doc! { "username": "bob" }).await.unwrap().unwrap();
        assert_eq!(bob.get_i32("age").unwrap(), 40);
    }

    #[tokio::test]
    async fn test_update_same_value_is_not_modified() {
        let store = seeded().await;
        let summary = store
            .update_one("users", doc! { "username": "alice" }, doc! { "$set": { "age": 30 } })
            .await
            .unwrap();
        assert_eq!(summary, UpdateSummary { matched: 1, modified: 0 });
    }

    #[tokio::test]
    async fn test_update_rejects_other_operators() {
        let store = seeded().await;
        let err = store
            .update_one("users", doc! { "username": "alice" }, doc! { "$inc": { "age": 1 } })
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::UnsupportedOperator(op) if op == "$inc"));
    }

    #[tokio::test]
    async fn test_find_one_and_update_returns_new_document() {
        let store = seeded().await;
        let updated = store
            .find_one_and_update("users", doc! { "username": "bob" }, doc! { "$set": { "age": 41 } })
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.get_i32("age").unwrap(), 41);
    }

    #[tokio::test]
    async fn test_find_by_ids() {
        let store = MemoryStore::new();
        let a = store.insert_one("things", doc! {}).await.unwrap();
        let b = store.insert_one("things", doc! {}).await.unwrap();
        store.insert_one("things", doc! {}).await.unwrap();

        let found = store.find_by_ids("things", vec![b, a, ObjectId::new()]).await.unwrap();
        assert_eq!(found.len(), 2);
    }

    #[tokio::test]
    async fn test_in_filter() {
        let store = seeded().await;
        let found = store
            .find_one("users", doc! { "username": { "$in": ["bob", "zed"] } })
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.get_str("username").unwrap(), "bob");
    }

    #[tokio::test]
    async fn test_find_one_and_delete_removes() {
        let store = seeded().await;
        let removed = store
            .find_one_and_delete("users", doc! { "username": "alice" })
            .await
            .unwrap()
            .unwrap();
        assert_eq!(removed.get_str("username").unwrap(), "alice");
        assert_eq!(store.count("users").await, 1);

        assert!(
            store
                .find_one_and_delete("users", doc! { "username": "alice" })
                .await
                .unwrap()
                .is_none()
        );
    }
}
