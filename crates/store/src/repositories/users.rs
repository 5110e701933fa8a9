//! User repository.
//!
//! Four single-round-trip operations keyed by username or ID, plus the
//! find-one-and-update path that carries the soft-delete hook.

use bson::DateTime;
use doc_records_core::models::user::{stamp_deleted_at, username_filter};
use doc_records_core::models::{NewUser, User, UserUpdate};
use doc_records_core::{Model, UserId};
use tracing::debug;

use super::{Records, RepositoryError, id_filter};
use crate::backend::{DocumentStore, UpdateSummary};

/// Repository for user documents.
pub struct UserRepository<'a, S> {
    records: Records<'a, S, User>,
}

impl<'a, S: DocumentStore> UserRepository<'a, S> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(store: &'a S) -> Self {
        Self {
            records: Records::new(store),
        }
    }

    /// Validate and insert a new user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Validation` if username or email is missing,
    /// `RepositoryError::Store` if the write fails.
    pub async fn insert(&self, user: NewUser) -> Result<User, RepositoryError> {
        self.records.insert(user).await
    }

    /// Find the first user whose username is exactly `username`.
    ///
    /// A missing user is `Ok(None)`, not an error.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored document is invalid.
    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError> {
        self.records.find_one(username_filter(username)).await
    }

    /// Get a user by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored document is invalid.
    pub async fn find_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        self.records.find_by_id(id).await
    }

    /// Apply `update` to the first user matching `username`.
    ///
    /// Does not stamp `deletedAt`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::EmptyUpdate` if no field is set,
    /// `RepositoryError::Validation` if a provided value is invalid,
    /// `RepositoryError::Store` if the write fails.
    pub async fn update_by_username(
        &self,
        username: &str,
        update: UserUpdate,
    ) -> Result<UpdateSummary, RepositoryError> {
        let set = checked_set(update)?;
        self.records.update_one(username_filter(username), set).await
    }

    /// Apply `update` to the first user matching `username` and return the
    /// updated user.
    ///
    /// The pre-update hook stamps `deletedAt` with the current time, so the
    /// returned user reports [`User::is_deleted`]. This is the only write path
    /// that stamps it.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Validation` if a provided value is invalid,
    /// `RepositoryError::Store` if the write fails.
    pub async fn find_and_update_by_username(
        &self,
        username: &str,
        update: UserUpdate,
    ) -> Result<Option<User>, RepositoryError> {
        update.validate()?;
        let mut set = update.into_set_document();
        pre_find_one_and_update(&mut set);
        self.records
            .find_one_and_update(username_filter(username), set)
            .await
    }

    /// Remove a user by ID and return the removed document.
    ///
    /// This is a real removal; references to the user are left dangling.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` if the delete fails.
    pub async fn delete_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        self.records.find_one_and_delete(id_filter(id)).await
    }
}

fn checked_set(update: UserUpdate) -> Result<bson::Document, RepositoryError> {
    if update.is_empty() {
        return Err(RepositoryError::EmptyUpdate(User::NAME));
    }
    update.validate()?;
    Ok(update.into_set_document())
}

fn pre_find_one_and_update(set: &mut bson::Document) {
    let now = DateTime::now();
    stamp_deleted_at(set, now);
    debug!(model = User::NAME, deleted_at = %now, "stamped deletedAt");
}
