//! Schema-validation layer.
//!
//! Every record type declares its collection, required paths and reference
//! paths through [`Model`]. Insert payloads implement [`Insertable`], which
//! runs field validation before a stored record is built. Validation collects
//! every failing path so a single error reports the whole payload, e.g.
//!
//! ```text
//! User validation failed: username: Path `username` is required., email: Path `email` is required.
//! ```

use core::fmt;

use rust_decimal::Decimal;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::types::RecordId;

/// A single failing field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    /// The field is missing or empty.
    Required {
        /// Field path.
        path: &'static str,
    },
    /// The value is below the allowed minimum.
    Min {
        /// Field path.
        path: &'static str,
        /// Minimum allowed value.
        min: Decimal,
        /// Rejected value.
        actual: Decimal,
    },
}

impl FieldError {
    /// The path of the failing field.
    #[must_use]
    pub const fn path(&self) -> &'static str {
        match self {
            Self::Required { path } | Self::Min { path, .. } => *path,
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Required { path } => write!(f, "Path `{path}` is required."),
            Self::Min { path, min, actual } => write!(
                f,
                "Path `{path}` ({actual}) is less than minimum allowed value ({min})."
            ),
        }
    }
}

/// All field failures for one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Model name, e.g. `User`.
    pub model: &'static str,
    /// Failing fields in declaration order. Never empty.
    pub errors: Vec<FieldError>,
}

impl ValidationError {
    /// Whether `path` is among the failing fields.
    #[must_use]
    pub fn has_path(&self, path: &str) -> bool {
        self.errors.iter().any(|e| e.path() == path)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} validation failed: ", self.model)?;
        for (i, error) in self.errors.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}: {error}", error.path())?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// Accumulates field failures for one record.
#[derive(Debug)]
#[must_use = "call `finish` to get the validation result"]
pub struct Validator {
    model: &'static str,
    errors: Vec<FieldError>,
}

impl Validator {
    /// Start validating a record of `model`.
    pub const fn new(model: &'static str) -> Self {
        Self {
            model,
            errors: Vec::new(),
        }
    }

    /// Strings are required to be non-empty.
    pub fn required(mut self, path: &'static str, value: &str) -> Self {
        if value.is_empty() {
            self.errors.push(FieldError::Required { path });
        }
        self
    }

    /// Optional values are required to be present.
    pub fn required_some<T>(mut self, path: &'static str, value: Option<&T>) -> Self {
        if value.is_none() {
            self.errors.push(FieldError::Required { path });
        }
        self
    }

    /// Numbers must not be below `min`. Absent values pass.
    pub fn min(mut self, path: &'static str, value: Option<Decimal>, min: Decimal) -> Self {
        if let Some(actual) = value.filter(|actual| *actual < min) {
            self.errors.push(FieldError::Min { path, min, actual });
        }
        self
    }

    /// Finish validation.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any field failed.
    pub fn finish(self) -> Result<(), ValidationError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationError {
                model: self.model,
                errors: self.errors,
            })
        }
    }
}

/// A reference from one model to another.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reference {
    /// Field holding the referenced ID (or list of IDs).
    pub path: &'static str,
    /// Name of the referenced model.
    pub model: &'static str,
    /// Whether the field holds a list of IDs.
    pub many: bool,
}

/// A stored record type.
pub trait Model: Clone + Serialize + DeserializeOwned + Send + Sync {
    /// Model name used in logs and validation messages.
    const NAME: &'static str;
    /// Collection the records live in.
    const COLLECTION: &'static str;
    /// Required field paths.
    const REQUIRED: &'static [&'static str];
    /// Reference fields to other models.
    const REFERENCES: &'static [Reference] = &[];

    /// ID type stored in `_id`.
    type Id: RecordId + Send + Sync;

    /// The record's ID.
    fn id(&self) -> Self::Id;

    /// Registration info for this model.
    #[must_use]
    fn info() -> ModelInfo {
        ModelInfo {
            name: Self::NAME,
            collection: Self::COLLECTION,
            required: Self::REQUIRED,
            references: Self::REFERENCES,
        }
    }
}

/// An insert payload for a [`Model`].
pub trait Insertable: Sized {
    /// Record produced on insert.
    type Record: Model;

    /// Check field constraints.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` listing every failing field.
    fn validate(&self) -> Result<(), ValidationError>;

    /// Validate and build the stored record under `id`.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` listing every failing field.
    fn into_record(
        self,
        id: <Self::Record as Model>::Id,
    ) -> Result<Self::Record, ValidationError>;
}

/// Registered model description.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelInfo {
    /// Model name.
    pub name: &'static str,
    /// Collection name.
    pub collection: &'static str,
    /// Required field paths.
    pub required: &'static [&'static str],
    /// Reference fields.
    pub references: &'static [Reference],
}

/// Every registered model, in registration order.
#[must_use]
pub fn registry() -> [ModelInfo; 5] {
    use crate::models::{Comment, Order, Post, Product, User};

    [
        User::info(),
        Product::info(),
        Post::info(),
        Comment::info(),
        Order::info(),
    ]
}
