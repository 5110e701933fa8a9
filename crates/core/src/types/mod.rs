//! Value types shared by every record.
//!
//! This module provides type-safe wrappers for IDs and prices.

pub mod id;
pub mod price;

pub use id::*;
pub use price::{Price, PriceError};
