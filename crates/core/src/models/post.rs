//! Posts written by users.

use serde::{Deserialize, Serialize};

use crate::models::User;
use crate::schema::{Insertable, Model, Reference, ValidationError, Validator};
use crate::types::{PostId, UserId};

/// A stored post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Document ID.
    #[serde(rename = "_id")]
    pub id: PostId,
    /// Headline.
    pub title: String,
    /// Body text.
    pub content: String,
    /// Author reference. Not checked against the users collection.
    #[serde(default)]
    pub author: Option<UserId>,
}

impl Model for Post {
    const NAME: &'static str = "Post";
    const COLLECTION: &'static str = "posts";
    const REQUIRED: &'static [&'static str] = &["title", "content"];
    const REFERENCES: &'static [Reference] = &[Reference {
        path: "author",
        model: User::NAME,
        many: false,
    }];

    type Id = PostId;

    fn id(&self) -> PostId {
        self.id
    }
}

/// Insert payload for a [`Post`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewPost {
    /// Required.
    pub title: String,
    /// Required.
    pub content: String,
    /// Optional author.
    pub author: Option<UserId>,
}

impl Insertable for NewPost {
    type Record = Post;

    fn validate(&self) -> Result<(), ValidationError> {
        Validator::new(Post::NAME)
            .required("title", &self.title)
            .required("content", &self.content)
            .finish()
    }

    fn into_record(self, id: PostId) -> Result<Post, ValidationError> {
        self.validate()?;
        Ok(Post {
            id,
            title: self.title,
            content: self.content,
            author: self.author,
        })
    }
}

/// A post with its author resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct PostWithAuthor {
    /// The post.
    pub post: Post,
    /// The referenced user, `None` when unset or dangling.
    pub author: Option<User>,
}
