//! Products with validated pricing.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::schema::{Insertable, Model, ValidationError, Validator};
use crate::types::{Price, ProductId};

/// A stored product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Document ID.
    #[serde(rename = "_id")]
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Category label.
    pub category: String,
    /// Unit price.
    pub price: Price,
}

impl Model for Product {
    const NAME: &'static str = "Product";
    const COLLECTION: &'static str = "products";
    const REQUIRED: &'static [&'static str] = &["name", "category", "price"];

    type Id = ProductId;

    fn id(&self) -> ProductId {
        self.id
    }
}

/// Insert payload for a [`Product`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewProduct {
    /// Required.
    pub name: String,
    /// Required.
    pub category: String,
    /// Required, at least 0.
    pub price: Option<Decimal>,
}

impl Insertable for NewProduct {
    type Record = Product;

    fn validate(&self) -> Result<(), ValidationError> {
        Validator::new(Product::NAME)
            .required("name", &self.name)
            .required("category", &self.category)
            .required_some("price", self.price.as_ref())
            .min("price", self.price, Price::MIN)
            .finish()
    }

    fn into_record(self, id: ProductId) -> Result<Product, ValidationError> {
        self.validate()?;
        let price = self
            .price
            .and_then(|amount| Price::new(amount).ok())
            .unwrap_or_default();

        Ok(Product {
            id,
            name: self.name,
            category: self.category,
            price,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::schema::FieldError;
    use crate::types::RecordId;

    fn widget(price: Option<Decimal>) -> NewProduct {
        NewProduct {
            name: "Widget".to_owned(),
            category: "Tools".to_owned(),
            price,
        }
    }

    #[test]
    fn test_valid_product() {
        let product = widget(Some(Decimal::new(1999, 2)))
            .into_record(ProductId::generate())
            .unwrap();
        assert_eq!(product.price.amount(), Decimal::new(1999, 2));
    }

    #[test]
    fn test_zero_price_is_allowed() {
        assert!(widget(Some(Decimal::ZERO)).validate().is_ok());
    }

    #[test]
    fn test_negative_price_rejected() {
        let err = widget(Some(Decimal::new(-5, 0))).validate().unwrap_err();
        assert_eq!(
            err.errors,
            vec![FieldError::Min {
                path: "price",
                min: Decimal::ZERO,
                actual: Decimal::new(-5, 0),
            }]
        );
    }

    #[test]
    fn test_missing_fields() {
        let err = NewProduct::default().validate().unwrap_err();
        assert!(err.has_path("name"));
        assert!(err.has_path("category"));
        assert!(err.has_path("price"));
    }
}
