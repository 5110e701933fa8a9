//! Orders referencing a list of products.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::Product;
use crate::schema::{Insertable, Model, Reference, ValidationError, Validator};
use crate::types::{OrderId, ProductId};

/// A stored order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Document ID.
    #[serde(rename = "_id")]
    pub id: OrderId,
    /// Ordered products, in order. Duplicates are kept.
    #[serde(default)]
    pub products: Vec<ProductId>,
    /// Order total. Any number, stored as a BSON double.
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
}

impl Model for Order {
    const NAME: &'static str = "Order";
    const COLLECTION: &'static str = "orders";
    const REQUIRED: &'static [&'static str] = &["total"];
    const REFERENCES: &'static [Reference] = &[Reference {
        path: "products",
        model: Product::NAME,
        many: true,
    }];

    type Id = OrderId;

    fn id(&self) -> OrderId {
        self.id
    }
}

/// Insert payload for an [`Order`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewOrder {
    /// Product references.
    pub products: Vec<ProductId>,
    /// Required.
    pub total: Option<Decimal>,
}

impl Insertable for NewOrder {
    type Record = Order;

    fn validate(&self) -> Result<(), ValidationError> {
        Validator::new(Order::NAME)
            .required_some("total", self.total.as_ref())
            .finish()
    }

    fn into_record(self, id: OrderId) -> Result<Order, ValidationError> {
        self.validate()?;
        Ok(Order {
            id,
            products: self.products,
            total: self.total.unwrap_or_default(),
        })
    }
}

/// An order with its products resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderWithProducts {
    /// The order.
    pub order: Order,
    /// Referenced products that still exist, in reference order.
    pub products: Vec<Product>,
}
