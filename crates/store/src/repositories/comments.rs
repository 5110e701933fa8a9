//! Comment repository.

use doc_records_core::CommentId;
use doc_records_core::models::{Comment, CommentWithPost, NewComment, Post};

use super::{Records, RepositoryError};
use crate::backend::DocumentStore;

/// Repository for comment documents.
pub struct CommentRepository<'a, S> {
    records: Records<'a, S, Comment>,
    posts: Records<'a, S, Post>,
}

impl<'a, S: DocumentStore> CommentRepository<'a, S> {
    /// Create a new comment repository.
    #[must_use]
    pub const fn new(store: &'a S) -> Self {
        Self {
            records: Records::new(store),
            posts: Records::new(store),
        }
    }

    /// Validate and insert a new comment.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Validation` if content is missing.
    pub async fn insert(&self, comment: NewComment) -> Result<Comment, RepositoryError> {
        self.records.insert(comment).await
    }

    /// Get a comment by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` if the query fails.
    pub async fn find_by_id(&self, id: CommentId) -> Result<Option<Comment>, RepositoryError> {
        self.records.find_by_id(id).await
    }

    /// Get a comment by ID with its post populated.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` if either query fails.
    pub async fn find_with_post(
        &self,
        id: CommentId,
    ) -> Result<Option<CommentWithPost>, RepositoryError> {
        let Some(comment) = self.records.find_by_id(id).await? else {
            return Ok(None);
        };
        let post = match comment.post {
            Some(post_id) => self.posts.find_by_id(post_id).await?,
            None => None,
        };
        Ok(Some(CommentWithPost { comment, post }))
    }
}
