//! Doc Records Core - Record types and schema validation.
//!
//! This crate provides the types shared by the store and the CLI:
//! - typed document IDs and prices
//! - the schema-validation layer applied before every insert
//! - the five record types (users, products, posts, comments, orders)
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O and no database
//! access. BSON is used as the data format, not as a connection.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for IDs and prices
//! - [`schema`] - Field validation and model registration
//! - [`models`] - Stored records, insert payloads and partial updates

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod models;
pub mod schema;
pub mod types;

pub use schema::{FieldError, Insertable, Model, ModelInfo, ValidationError, Validator};
pub use types::*;
