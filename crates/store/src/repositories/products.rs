//! Product repository.

use doc_records_core::ProductId;
use doc_records_core::models::{NewProduct, Product};

use super::{Records, RepositoryError};
use crate::backend::DocumentStore;

/// Repository for product documents.
pub struct ProductRepository<'a, S> {
    records: Records<'a, S, Product>,
}

impl<'a, S: DocumentStore> ProductRepository<'a, S> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(store: &'a S) -> Self {
        Self {
            records: Records::new(store),
        }
    }

    /// Validate and insert a new product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Validation` if name, category or price is
    /// missing or the price is negative.
    pub async fn insert(&self, product: NewProduct) -> Result<Product, RepositoryError> {
        self.records.insert(product).await
    }

    /// Get a product by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` if the query fails.
    pub async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        self.records.find_by_id(id).await
    }
}
