//! Order repository.

use doc_records_core::OrderId;
use doc_records_core::models::{NewOrder, Order, OrderWithProducts, Product};

use super::{Records, RepositoryError};
use crate::backend::DocumentStore;

/// Repository for order documents.
pub struct OrderRepository<'a, S> {
    records: Records<'a, S, Order>,
    products: Records<'a, S, Product>,
}

impl<'a, S: DocumentStore> OrderRepository<'a, S> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(store: &'a S) -> Self {
        Self {
            records: Records::new(store),
            products: Records::new(store),
        }
    }

    /// Validate and insert a new order. Product references are not checked.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Validation` if the total is missing or negative.
    pub async fn insert(&self, order: NewOrder) -> Result<Order, RepositoryError> {
        self.records.insert(order).await
    }

    /// Get an order by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` if the query fails.
    pub async fn find_by_id(&self, id: OrderId) -> Result<Option<Order>, RepositoryError> {
        self.records.find_by_id(id).await
    }

    /// Get an order by ID with its products populated.
    ///
    /// Products that no longer exist are left out.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` if either query fails.
    pub async fn find_with_products(
        &self,
        id: OrderId,
    ) -> Result<Option<OrderWithProducts>, RepositoryError> {
        let Some(order) = self.records.find_by_id(id).await? else {
            return Ok(None);
        };
        let products = self.products.find_by_ids(&order.products).await?;
        Ok(Some(OrderWithProducts { order, products }))
    }
}
