//! Shopping cart rows and the priced cart summary.

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::product::Product;
use crate::types::{CartItemId, ProductId, UserId, price::format_cents};
use crate::validation::Schema;

/// One add-to-cart action.
///
/// Adding the same product twice creates two rows; rows are never merged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: CartItemId,
    pub user_id: Option<UserId>,
    pub product_id: Option<ProductId>,
    pub quantity: i32,
}

/// Insert schema for [`CartItem`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewCartItem {
    #[serde(default)]
    pub user_id: Option<UserId>,
    pub product_id: Option<ProductId>,
    /// Defaults to 1.
    #[validate(range(min = 1, code = "too_small", message = "Quantity must be at least 1"))]
    #[serde(default)]
    pub quantity: Option<i32>,
}

impl NewCartItem {
    /// Build the stored record, applying defaults for omitted fields.
    #[must_use]
    pub fn into_cart_item(self, id: CartItemId) -> CartItem {
        CartItem {
            id,
            user_id: self.user_id,
            product_id: self.product_id,
            quantity: self.quantity.unwrap_or(1),
        }
    }
}

impl Schema for NewCartItem {
    const NAME: &'static str = "cart item";
    const REQUIRED: &'static [&'static str] = &["productId"];
}

/// A cart row joined with its product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub cart_item_id: CartItemId,
    pub quantity: i32,
    pub product: Product,
    /// `product.price * quantity`, in cents.
    pub line_total: i64,
}

/// The cart's subtotal doesn't fit in 64 bits.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Cart subtotal is out of range")]
pub struct SubtotalOverflow;

/// A user's cart with prices resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSummary {
    pub items: Vec<CartLine>,
    /// Sum of line totals, in cents.
    pub subtotal: i64,
    /// Subtotal formatted for display, e.g. `"$24.00"`.
    pub subtotal_display: String,
    /// Total units across all lines.
    pub item_count: i64,
}

impl CartSummary {
    /// Join cart rows with the catalog.
    ///
    /// Rows whose product is unset or no longer in `products` are dropped.
    ///
    /// # Errors
    ///
    /// Returns `SubtotalOverflow` if the totals don't fit in an `i64`.
    pub fn build(items: Vec<CartItem>, products: &[Product]) -> Result<Self, SubtotalOverflow> {
        let lines: Vec<CartLine> = items
            .into_iter()
            .filter_map(|item| {
                let product = products.iter().find(|p| Some(p.id) == item.product_id)?;
                Some(CartLine {
                    cart_item_id: item.id,
                    quantity: item.quantity,
                    line_total: product.price.times(item.quantity),
                    product: product.clone(),
                })
            })
            .collect();

        let (subtotal, item_count) = lines
            .iter()
            .try_fold((0_i64, 0_i64), |(sum, count), line| {
                Some((
                    sum.checked_add(line.line_total)?,
                    count.checked_add(i64::from(line.quantity))?,
                ))
            })
            .ok_or(SubtotalOverflow)?;

        Ok(Self {
            items: lines,
            subtotal,
            subtotal_display: format_cents(subtotal),
            item_count,
        })
    }

    /// An empty cart.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            subtotal: 0,
            subtotal_display: format_cents(0),
            item_count: 0,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::types::Price;
    use crate::validation::{IssueCode, parse};

    fn product(id: i32, cents: i32) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            description: String::new(),
            price: Price::from_cents(cents).unwrap(),
            category: "test".to_string(),
            image_url: None,
            in_stock: true,
        }
    }

    fn item(id: i32, product_id: i32, quantity: i32) -> CartItem {
        CartItem {
            id: CartItemId::new(id),
            user_id: Some(UserId::new(1)),
            product_id: Some(ProductId::new(product_id)),
            quantity,
        }
    }

    #[test]
    fn test_quantity_defaults_to_one() {
        let new: NewCartItem = parse(json!({ "userId": 1, "productId": 2 })).unwrap();
        let row = new.into_cart_item(CartItemId::new(1));
        assert_eq!(row.quantity, 1);
        assert_eq!(row.product_id, Some(ProductId::new(2)));
    }

    #[test]
    fn test_missing_product_id_is_an_issue() {
        let issues = parse::<NewCartItem>(json!({ "userId": 1, "quantity": 2 })).unwrap_err();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].path, vec!["productId"]);
    }

    #[test]
    fn test_zero_quantity_rejected() {
        let issues = parse::<NewCartItem>(json!({ "productId": 1, "quantity": 0 })).unwrap_err();
        assert_eq!(issues[0].code, IssueCode::TooSmall);
        assert_eq!(issues[0].path, vec!["quantity"]);
    }

    #[test]
    fn test_summary_totals() {
        let products = vec![product(1, 2400), product(2, 8900)];
        let summary = CartSummary::build(vec![item(1, 1, 2), item(2, 2, 1)], &products).unwrap();

        assert_eq!(summary.items.len(), 2);
        assert_eq!(summary.subtotal, 2 * 2400 + 8900);
        assert_eq!(summary.subtotal_display, "$137.00");
        assert_eq!(summary.item_count, 3);
    }

    #[test]
    fn test_summary_drops_orphaned_rows() {
        let products = vec![product(1, 2400)];
        let mut orphan = item(2, 99, 1);
        let summary = CartSummary::build(vec![item(1, 1, 1), orphan.clone()], &products).unwrap();
        assert_eq!(summary.items.len(), 1);
        assert_eq!(summary.subtotal, 2400);

        orphan.product_id = None;
        let summary = CartSummary::build(vec![orphan], &products).unwrap();
        assert!(summary.items.is_empty());
    }

    #[test]
    fn test_empty_summary() {
        let summary = CartSummary::empty();
        assert_eq!(summary.subtotal_display, "$0.00");
        assert_eq!(summary.item_count, 0);
        assert_eq!(summary, CartSummary::build(Vec::new(), &[]).unwrap());
    }

    #[test]
    fn test_summary_rejects_subtotal_overflow() {
        let products = vec![product(1, i32::MAX)];
        let rows = (1..=3).map(|id| item(id, 1, i32::MAX)).collect();
        assert_eq!(CartSummary::build(rows, &products), Err(SubtotalOverflow));

        let rows = (1..=2).map(|id| item(id, 1, i32::MAX)).collect();
        let summary = CartSummary::build(rows, &products).unwrap();
        assert_eq!(summary.subtotal, 2 * i64::from(i32::MAX) * i64::from(i32::MAX));
    }
}
