//! # Order Types
//!
//! Orders capture a snapshot of cart lines at checkout time. Payment and
//! shipping progress is tracked with a status enum rather than loose flags.

use crate::cart::CartItem;
use crate::document::{DocumentId, Record};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A line in an order (denormalized from the cart at checkout)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLine {
    pub product_id: DocumentId,
    pub product_name: String,
    pub unit_price: i64,
    pub quantity: u32,
}

impl From<&CartItem> for OrderLine {
    fn from(item: &CartItem) -> Self {
        Self {
            product_id: item.product_id,
            product_name: item.product_name.clone(),
            unit_price: item.unit_price,
            quantity: item.quantity,
        }
    }
}

/// Order lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Placed, awaiting payment
    Pending,
    /// Payment recorded
    Paid,
    /// Shipped by an admin
    Shipped,
    /// Cancelled before shipment
    Cancelled,
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Pending
    }
}

/// A placed order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    /// Document id
    pub id: DocumentId,

    /// Owning user (verified token identity)
    pub email: String,

    /// Order lines
    pub items: Vec<OrderLine>,

    /// Total in cents
    pub total: i64,

    /// Lifecycle status
    #[serde(default)]
    pub status: OrderStatus,

    /// Payment provider transaction id, set when payment is recorded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,

    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Create a pending order from cart items
    pub fn from_cart(email: impl Into<String>, items: &[CartItem]) -> Self {
        let lines: Vec<OrderLine> = items.iter().map(OrderLine::from).collect();
        let total = items.iter().map(CartItem::total).sum();
        Self {
            id: DocumentId::new(),
            email: email.into(),
            items: lines,
            total,
            status: OrderStatus::Pending,
            transaction_id: None,
            created_at: Utc::now(),
        }
    }

    /// Record a successful payment
    pub fn mark_paid(&mut self, transaction_id: impl Into<String>) {
        self.transaction_id = Some(transaction_id.into());
        self.status = OrderStatus::Paid;
    }

    /// Mark the order as shipped
    pub fn mark_shipped(&mut self) {
        self.status = OrderStatus::Shipped;
    }
}

impl Record for Order {
    fn id(&self) -> DocumentId {
        self.id
    }
}
