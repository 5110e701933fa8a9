//! Integration tests for doc-records.
//!
//! # Running Tests
//!
//! ```bash
//! # In-memory backend, no server needed
//! cargo test -p doc-records-integration-tests
//!
//! # Include tests against a live MongoDB
//! MONGODB_TEST_URI=mongodb://localhost:27017 \
//!     cargo test -p doc-records-integration-tests -- --ignored
//! ```
//!
//! # Test Files
//!
//! - `users` - User CRUD, validation and the soft-delete hook
//! - `relations` - Products, posts, comments, orders and population
//! - `mongo_live` - Connection failure, and the user flow against a real server (ignored by default)

use doc_records_core::models::{NewPost, NewProduct, NewUser};
use rust_decimal::Decimal;

/// A valid user payload.
#[must_use]
pub fn new_user(username: &str) -> NewUser {
    NewUser {
        username: username.to_owned(),
        email: format!("{username}@example.com"),
        age: Some(25.0),
        address: Some("123 Example Street, City, Country".to_owned()),
    }
}

/// A valid product payload priced in cents.
#[must_use]
pub fn new_product(name: &str, cents: i64) -> NewProduct {
    NewProduct {
        name: name.to_owned(),
        category: "Tools".to_owned(),
        price: Some(Decimal::new(cents, 2)),
    }
}

/// A valid post payload without an author.
#[must_use]
pub fn new_post(title: &str) -> NewPost {
    NewPost {
        title: title.to_owned(),
        content: format!("{title} body"),
        author: None,
    }
}
