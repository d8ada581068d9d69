//! # Cart Types
//!
//! Cart items belong to a user (by email) and reference a product.
//! Product name and unit price are denormalized at add time so the cart
//! keeps displaying what the customer agreed to pay.

use crate::catalog::Product;
use crate::document::{DocumentId, Record};
use serde::{Deserialize, Serialize};

/// One item in a user's cart
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItem {
    /// Document id
    pub id: DocumentId,

    /// Owning user (verified token identity)
    pub email: String,

    /// Product this item references
    pub product_id: DocumentId,

    /// Product name (denormalized for display)
    pub product_name: String,

    /// Unit price in cents at add time
    pub unit_price: i64,

    /// Quantity (patchable)
    pub quantity: u32,
}

impl CartItem {
    /// Create a cart item from a product
    pub fn from_product(email: impl Into<String>, product: &Product, quantity: u32) -> Self {
        Self {
            id: DocumentId::new(),
            email: email.into(),
            product_id: product.id,
            product_name: product.name.clone(),
            unit_price: product.price,
            quantity,
        }
    }

    /// Line total in cents
    pub fn total(&self) -> i64 {
        self.unit_price * i64::from(self.quantity)
    }
}

impl Record for CartItem {
    fn id(&self) -> DocumentId {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cart_item_total() {
        let product = Product::new("Fiddle Leaf Fig", 45.00);
        let item = CartItem::from_product("shopper@example.com", &product, 3);

        assert_eq!(item.unit_price, 4500);
        assert_eq!(item.total(), 13500);
        assert_eq!(item.product_id, product.id);
    }
}
