//! Document store abstraction.
//!
//! Every call addresses one collection by name and exchanges raw BSON
//! documents. Filters are equality matches on top-level fields, with `$in`
//! accepted on `_id`. Updates are `$set` documents. Update and delete calls
//! affect at most one document: the first match.

use core::fmt;
use std::future::Future;

use bson::Document;
use bson::oid::ObjectId;
use thiserror::Error;

/// Errors raised by a store backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Error from the MongoDB driver.
    #[error("mongodb error: {0}")]
    Mongo(#[from] mongodb::error::Error),

    /// The update used an operator the backend does not support.
    #[error("unsupported update operator: {0}")]
    UnsupportedOperator(String),

    /// A document with the same `_id` already exists.
    #[error("duplicate key: _id {0}")]
    DuplicateKey(ObjectId),

    /// The backend returned an `_id` that is not an `ObjectId`.
    #[error("unexpected inserted id: {0}")]
    UnexpectedId(String),
}

/// Outcome of an update call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UpdateSummary {
    /// Documents matching the filter (0 or 1).
    pub matched: u64,
    /// Documents whose contents changed (0 or 1).
    pub modified: u64,
}

impl fmt::Display for UpdateSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "matched {}, modified {}", self.matched, self.modified)
    }
}

impl From<mongodb::results::UpdateResult> for UpdateSummary {
    fn from(result: mongodb::results::UpdateResult) -> Self {
        Self {
            matched: result.matched_count,
            modified: result.modified_count,
        }
    }
}

/// A schema-less document store.
pub trait DocumentStore: Send + Sync {
    /// Human-readable backend name for logs.
    fn backend(&self) -> &'static str;

    /// Insert one document and return its `_id`. An `_id` is assigned when absent.
    fn insert_one(
        &self,
        collection: &str,
        document: Document,
    ) -> impl Future<Output = Result<ObjectId, StoreError>> + Send;

    /// First document matching `filter`.
    fn find_one(
        &self,
        collection: &str,
        filter: Document,
    ) -> impl Future<Output = Result<Option<Document>, StoreError>> + Send;

    /// All documents whose `_id` is in `ids`, in no particular order.
    fn find_by_ids(
        &self,
        collection: &str,
        ids: Vec<ObjectId>,
    ) -> impl Future<Output = Result<Vec<Document>, StoreError>> + Send;

    /// Apply `update` to the first document matching `filter`.
    fn update_one(
        &self,
        collection: &str,
        filter: Document,
        update: Document,
    ) -> impl Future<Output = Result<UpdateSummary, StoreError>> + Send;

    /// Apply `update` to the first match and return the updated document.
    fn find_one_and_update(
        &self,
        collection: &str,
        filter: Document,
        update: Document,
    ) -> impl Future<Output = Result<Option<Document>, StoreError>> + Send;

    /// Remove the first match and return it.
    fn find_one_and_delete(
        &self,
        collection: &str,
        filter: Document,
    ) -> impl Future<Output = Result<Option<Document>, StoreError>> + Send;

    /// Round trip to check the store is reachable.
    fn ping(&self) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Close the connection.
    fn shutdown(self) -> impl Future<Output = ()> + Send
    where
        Self: Sized;
}
