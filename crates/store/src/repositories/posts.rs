//! Post repository.

use doc_records_core::PostId;
use doc_records_core::models::{NewPost, Post, PostWithAuthor, User};

use super::{Records, RepositoryError};
use crate::backend::DocumentStore;

/// Repository for post documents.
pub struct PostRepository<'a, S> {
    records: Records<'a, S, Post>,
    users: Records<'a, S, User>,
}

impl<'a, S: DocumentStore> PostRepository<'a, S> {
    /// Create a new post repository.
    #[must_use]
    pub const fn new(store: &'a S) -> Self {
        Self {
            records: Records::new(store),
            users: Records::new(store),
        }
    }

    /// Validate and insert a new post. The author is not checked.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Validation` if title or content is missing.
    pub async fn insert(&self, post: NewPost) -> Result<Post, RepositoryError> {
        self.records.insert(post).await
    }

    /// Get a post by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` if the query fails.
    pub async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, RepositoryError> {
        self.records.find_by_id(id).await
    }

    /// Get a post by ID with its author populated.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` if either query fails.
    pub async fn find_with_author(
        &self,
        id: PostId,
    ) -> Result<Option<PostWithAuthor>, RepositoryError> {
        let Some(post) = self.records.find_by_id(id).await? else {
            return Ok(None);
        };
        let author = match post.author {
            Some(author_id) => self.users.find_by_id(author_id).await?,
            None => None,
        };
        Ok(Some(PostWithAuthor { post, author }))
    }
}
