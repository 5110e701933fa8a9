//! Comments on posts.

use serde::{Deserialize, Serialize};

use crate::models::Post;
use crate::schema::{Insertable, Model, Reference, ValidationError, Validator};
use crate::types::{CommentId, PostId};

/// A stored comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// Document ID.
    #[serde(rename = "_id")]
    pub id: CommentId,
    /// Comment text.
    pub content: String,
    /// Post reference.
    #[serde(default)]
    pub post: Option<PostId>,
}

impl Model for Comment {
    const NAME: &'static str = "Comment";
    const COLLECTION: &'static str = "comments";
    const REQUIRED: &'static [&'static str] = &["content"];
    const REFERENCES: &'static [Reference] = &[Reference {
        path: "post",
        model: Post::NAME,
        many: false,
    }];

    type Id = CommentId;

    fn id(&self) -> CommentId {
        self.id
    }
}

/// Insert payload for a [`Comment`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewComment {
    /// Required.
    pub content: String,
    /// Optional post.
    pub post: Option<PostId>,
}

impl Insertable for NewComment {
    type Record = Comment;

    fn validate(&self) -> Result<(), ValidationError> {
        Validator::new(Comment::NAME)
            .required("content", &self.content)
            .finish()
    }

    fn into_record(self, id: CommentId) -> Result<Comment, ValidationError> {
        self.validate()?;
        Ok(Comment {
            id,
            content: self.content,
            post: self.post,
        })
    }
}

/// A comment with its post resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentWithPost {
    /// The comment.
    pub comment: Comment,
    /// The referenced post, `None` when unset or dangling.
    pub post: Option<Post>,
}
