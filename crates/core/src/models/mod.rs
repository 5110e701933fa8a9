//! Record types and their insert payloads.
//!
//! | Model | Collection | References |
//! |---|---|---|
//! | [`User`] | `users` | |
//! | [`Product`] | `products` | |
//! | [`Post`] | `posts` | `author` → `User` |
//! | [`Comment`] | `comments` | `post` → `Post` |
//! | [`Order`] | `orders` | `products` → `[Product]` |
//!
//! References are plain IDs. Nothing checks that the referenced record
//! exists, and removing a record leaves references to it dangling.

pub mod comment;
pub mod order;
pub mod post;
pub mod product;
pub mod user;

pub use comment::{Comment, CommentWithPost, NewComment};
pub use order::{NewOrder, Order, OrderWithProducts};
pub use post::{NewPost, Post, PostWithAuthor};
pub use product::{NewProduct, Product};
pub use user::{NewUser, User, UserUpdate};
