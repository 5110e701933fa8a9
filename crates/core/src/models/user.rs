//! User profiles.
//!
//! Users carry a `deletedAt` timestamp for soft deletion. Only the
//! find-one-and-update path stamps it (see the store's user repository);
//! reads and deletes ignore it.

use bson::{Bson, DateTime, Document, doc};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::schema::{Insertable, Model, ValidationError, Validator};
use crate::types::UserId;

/// A stored user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Document ID.
    #[serde(rename = "_id")]
    pub id: UserId,
    /// Login name. Lookups match it exactly.
    pub username: String,
    /// Contact email. Stored as given.
    pub email: String,
    /// Age in years. Any numeric BSON value is accepted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<f64>,
    /// Free-form postal address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Soft-delete stamp. Absent until the first find-one-and-update.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime>,
}

impl User {
    /// Whether the user carries a soft-delete stamp.
    #[must_use]
    pub const fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// The soft-delete stamp as a `chrono` timestamp.
    #[must_use]
    pub fn deleted_at(&self) -> Option<chrono::DateTime<Utc>> {
        self.deleted_at.map(DateTime::to_chrono)
    }
}

impl Model for User {
    const NAME: &'static str = "User";
    const COLLECTION: &'static str = "users";
    const REQUIRED: &'static [&'static str] = &["username", "email"];

    type Id = UserId;

    fn id(&self) -> UserId {
        self.id
    }
}

/// Insert payload for a [`User`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewUser {
    /// Required.
    pub username: String,
    /// Required.
    pub email: String,
    /// Optional age.
    pub age: Option<f64>,
    /// Optional address.
    pub address: Option<String>,
}

impl Insertable for NewUser {
    type Record = User;

    fn validate(&self) -> Result<(), ValidationError> {
        Validator::new(User::NAME)
            .required("username", &self.username)
            .required("email", &self.email)
            .finish()
    }

    fn into_record(self, id: UserId) -> Result<User, ValidationError> {
        self.validate()?;
        Ok(User {
            id,
            username: self.username,
            email: self.email,
            age: self.age,
            address: self.address,
            deleted_at: None,
        })
    }
}

/// Partial update for a [`User`]. Only provided fields are written.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserUpdate {
    /// New username.
    pub username: Option<String>,
    /// New email.
    pub email: Option<String>,
    /// New age.
    pub age: Option<f64>,
    /// New address.
    pub address: Option<String>,
}

impl UserUpdate {
    /// Update that only changes the age.
    #[must_use]
    pub fn age(age: f64) -> Self {
        Self {
            age: Some(age),
            ..Self::default()
        }
    }

    /// Whether no field is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.username.is_none()
            && self.email.is_none()
            && self.age.is_none()
            && self.address.is_none()
    }

    /// Check provided values. Absent fields are not checked.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if a provided username or email is empty.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut validator = Validator::new(User::NAME);
        if let Some(username) = &self.username {
            validator = validator.required("username", username);
        }
        if let Some(email) = &self.email {
            validator = validator.required("email", email);
        }
        validator.finish()
    }

    /// The fields to `$set`.
    #[must_use]
    pub fn into_set_document(self) -> Document {
        let mut set = Document::new();
        if let Some(username) = self.username {
            set.insert("username", username);
        }
        if let Some(email) = self.email {
            set.insert("email", email);
        }
        if let Some(age) = self.age {
            set.insert("age", age);
        }
        if let Some(address) = self.address {
            set.insert("address", address);
        }
        set
    }
}

/// Stamp `deletedAt` into a `$set` document.
///
/// Runs before every find-one-and-update on users.
pub fn stamp_deleted_at(set: &mut Document, now: DateTime) {
    set.insert("deletedAt", Bson::DateTime(now));
}

/// Filter matching a user by exact username.
#[must_use]
pub fn username_filter(username: &str) -> Document {
    doc! { "username": username }
}
