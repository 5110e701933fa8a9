//! Newtype IDs for type-safe document references.
//!
//! Use the `define_id!` macro to create type-safe ID wrappers that prevent
//! accidentally mixing IDs from different record types. Every ID wraps a
//! BSON [`ObjectId`] and serializes as one, so it can be stored directly in
//! the `_id` field or in a reference field of another document.

use core::fmt;
use core::str::FromStr;

use bson::oid::ObjectId;

/// Common behaviour of all document IDs.
pub trait RecordId: Copy + fmt::Display + Into<ObjectId> + From<ObjectId> {
    /// Generate a fresh ID.
    #[must_use]
    fn generate() -> Self {
        Self::from(ObjectId::new())
    }

    /// Get the underlying `ObjectId`.
    #[must_use]
    fn object_id(self) -> ObjectId {
        self.into()
    }
}

/// Error returned when an ID string is not a 24-character hex `ObjectId`.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid id `{input}`: expected 24 hex characters")]
pub struct IdParseError {
    /// The rejected input.
    pub input: String,
}

/// Macro to define a type-safe ID wrapper.
///
/// Creates a newtype wrapper around [`ObjectId`] with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`
/// - `Display` and `FromStr` using the 24-character hex form
/// - `From<ObjectId>` and `Into<ObjectId>` implementations
/// - A [`RecordId`] implementation
///
/// # Example
///
/// ```rust
/// # use doc_records_core::{define_id, RecordId};
/// define_id!(UserId);
/// define_id!(OrderId);
///
/// let user_id = UserId::generate();
/// let parsed: UserId = user_id.to_string().parse().unwrap();
/// assert_eq!(parsed, user_id);
///
/// // These are different types, so this won't compile:
/// // let _: UserId = OrderId::generate();
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(::bson::oid::ObjectId);

        impl $name {
            /// Wrap an existing `ObjectId`.
            #[must_use]
            pub const fn new(id: ::bson::oid::ObjectId) -> Self {
                Self(id)
            }
        }

        impl $crate::types::id::RecordId for $name {}

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0.to_hex())
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = $crate::types::id::IdParseError;

            fn from_str(s: &str) -> ::core::result::Result<Self, Self::Err> {
                $crate::types::id::parse_object_id(s).map(Self)
            }
        }

        impl From<::bson::oid::ObjectId> for $name {
            fn from(id: ::bson::oid::ObjectId) -> Self {
                Self(id)
            }
        }

        impl From<$name> for ::bson::oid::ObjectId {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl From<$name> for ::bson::Bson {
            fn from(id: $name) -> Self {
                ::bson::Bson::ObjectId(id.0)
            }
        }
    };
}

/// Parse a 24-character hex string into an `ObjectId`.
///
/// # Errors
///
/// Returns `IdParseError` if the input is not valid hex of the right length.
pub fn parse_object_id(s: &str) -> Result<ObjectId, IdParseError> {
    ObjectId::from_str(s).map_err(|_| IdParseError {
        input: s.to_owned(),
    })
}

// Record IDs
define_id!(UserId);
define_id!(ProductId);
define_id!(PostId);
define_id!(CommentId);
define_id!(OrderId);
