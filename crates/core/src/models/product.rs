//! Shop catalog products.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::types::{Price, ProductId};
use crate::validation::{Schema, rule};

/// A product in the shop catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Price,
    /// Free-text tag such as `herbal-tea`; filtered by exact match.
    pub category: String,
    pub image_url: Option<String>,
    pub in_stock: bool,
}

/// Insert schema for [`Product`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    #[validate(length(min = 1, code = "too_small", message = "Name cannot be empty"))]
    pub name: String,
    pub description: String,
    #[validate(custom(function = "validate_price"))]
    pub price: Price,
    #[validate(length(min = 1, code = "too_small", message = "Category cannot be empty"))]
    pub category: String,
    #[serde(default)]
    pub image_url: Option<String>,
    /// Defaults to `true`.
    #[serde(default)]
    pub in_stock: Option<bool>,
}

impl NewProduct {
    /// Build the stored record, applying defaults for omitted fields.
    #[must_use]
    pub fn into_product(self, id: ProductId) -> Product {
        Product {
            id,
            name: self.name,
            description: self.description,
            price: self.price,
            category: self.category,
            image_url: self.image_url,
            in_stock: self.in_stock.unwrap_or(true),
        }
    }
}

impl Schema for NewProduct {
    const NAME: &'static str = "product";
    const REQUIRED: &'static [&'static str] = &["name", "description", "price", "category"];
}

fn validate_price(price: &Price) -> Result<(), ValidationError> {
    if price.is_valid() {
        Ok(())
    } else {
        Err(rule("too_small", "Price must be greater than or equal to 0"))
    }
}
