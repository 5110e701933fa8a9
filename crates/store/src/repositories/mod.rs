//! Per-model repositories.
//!
//! Each repository borrows a [`DocumentStore`] and performs one round trip
//! per call: no retries, no transactions. Inserts run the schema-validation
//! layer first and never reach the store with an invalid record.
//!
//! ## Collections
//!
//! - `users` - [`UserRepository`]
//! - `products` - [`ProductRepository`]
//! - `posts` - [`PostRepository`]
//! - `comments` - [`CommentRepository`]
//! - `orders` - [`OrderRepository`]

pub mod comments;
pub mod orders;
pub mod posts;
pub mod products;
pub mod users;

use std::marker::PhantomData;

use bson::{Document, doc};
use doc_records_core::{Insertable, Model, RecordId, ValidationError};
use thiserror::Error;
use tracing::debug;

use crate::backend::{DocumentStore, StoreError};

pub use comments::CommentRepository;
pub use orders::OrderRepository;
pub use posts::PostRepository;
pub use products::ProductRepository;
pub use users::UserRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Error from the store backend.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// The record failed schema validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The record could not be encoded as BSON.
    #[error("encode error: {0}")]
    Encode(#[from] bson::ser::Error),

    /// A stored document does not match its model.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// The update has no fields to set.
    #[error("update for {0} has no fields")]
    EmptyUpdate(&'static str),
}

impl RepositoryError {
    /// Whether this is a schema-validation failure.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

/// Typed access to one model's collection.
pub(crate) struct Records<'a, S, M> {
    store: &'a S,
    model: PhantomData<fn() -> M>,
}

impl<'a, S: DocumentStore, M: Model> Records<'a, S, M> {
    pub(crate) const fn new(store: &'a S) -> Self {
        Self {
            store,
            model: PhantomData,
        }
    }

    /// Validate, assign an ID and persist.
    pub(crate) async fn insert<D>(&self, draft: D) -> Result<M, RepositoryError>
    where
        D: Insertable<Record = M>,
    {
        let record = draft.into_record(M::Id::generate())?;
        let document = bson::to_document(&record)?;
        self.store.insert_one(M::COLLECTION, document).await?;
        debug!(model = M::NAME, id = %record.id(), "inserted record");
        Ok(record)
    }

    pub(crate) async fn find_one(&self, filter: Document) -> Result<Option<M>, RepositoryError> {
        self.store
            .find_one(M::COLLECTION, filter)
            .await?
            .map(decode)
            .transpose()
    }

    pub(crate) async fn find_by_id(&self, id: M::Id) -> Result<Option<M>, RepositoryError> {
        self.find_one(id_filter(id)).await
    }

    /// Records for `ids`, in the order of `ids`. Missing IDs are skipped;
    /// repeated IDs yield repeated records.
    pub(crate) async fn find_by_ids(&self, ids: &[M::Id]) -> Result<Vec<M>, RepositoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut unique: Vec<_> = ids.iter().map(|id| id.object_id()).collect();
        unique.sort_unstable();
        unique.dedup();

        let found = self
            .store
            .find_by_ids(M::COLLECTION, unique)
            .await?
            .into_iter()
            .map(decode::<M>)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ids
            .iter()
            .filter_map(|id| {
                found
                    .iter()
                    .find(|record| record.id().object_id() == id.object_id())
                    .cloned()
            })
            .collect())
    }

    pub(crate) async fn update_one(
        &self,
        filter: Document,
        set: Document,
    ) -> Result<crate::backend::UpdateSummary, RepositoryError> {
        Ok(self
            .store
            .update_one(M::COLLECTION, filter, doc! { "$set": set })
            .await?)
    }

    pub(crate) async fn find_one_and_update(
        &self,
        filter: Document,
        set: Document,
    ) -> Result<Option<M>, RepositoryError> {
        self.store
            .find_one_and_update(M::COLLECTION, filter, doc! { "$set": set })
            .await?
            .map(decode)
            .transpose()
    }

    pub(crate) async fn find_one_and_delete(
        &self,
        filter: Document,
    ) -> Result<Option<M>, RepositoryError> {
        self.store
            .find_one_and_delete(M::COLLECTION, filter)
            .await?
            .map(decode)
            .transpose()
    }
}

/// Filter matching a record by `_id`.
pub(crate) fn id_filter(id: impl RecordId) -> Document {
    doc! { "_id": id.object_id() }
}

/// Decode a stored document into `M`.
pub(crate) fn decode<M: Model>(document: Document) -> Result<M, RepositoryError> {
    bson::from_document(document).map_err(|e| {
        RepositoryError::DataCorruption(format!("invalid {} document: {e}", M::NAME))
    })
}
