//! # Product Types
//!
//! Product records and the seed catalog loaded from `config/products.toml`.
//! Prices are stored in minor units (cents); the storefront is USD-only.

use crate::document::{DocumentId, Record};
use serde::{Deserialize, Serialize};

/// Convert a decimal USD amount to cents, rounding to the nearest cent
pub fn usd_minor_units(amount: f64) -> i64 {
    (amount * 100.0).round() as i64
}

/// Convert cents back to a decimal USD amount
pub fn usd_from_minor_units(amount: i64) -> f64 {
    amount as f64 / 100.0
}

/// A product in the storefront
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Document id
    #[serde(default)]
    pub id: DocumentId,

    /// Display name
    pub name: String,

    /// Short description
    #[serde(default)]
    pub description: String,

    /// Price in cents (USD)
    pub price: i64,

    /// Units in stock
    #[serde(default)]
    pub stock: u32,

    /// Whether this product is available for purchase
    #[serde(default = "default_true")]
    pub active: bool,

    /// Optional image URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

fn default_true() -> bool {
    true
}

impl Product {
    /// Create a new active product priced in decimal USD
    pub fn new(name: impl Into<String>, price_usd: f64) -> Self {
        Self {
            id: DocumentId::new(),
            name: name.into(),
            description: String::new(),
            price: usd_minor_units(price_usd),
            stock: 0,
            active: true,
            image_url: None,
        }
    }

    /// Builder: set description
    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = desc.into();
        self
    }

    /// Builder: set stock level
    pub fn with_stock(mut self, stock: u32) -> Self {
        self.stock = stock;
        self
    }

    /// Builder: set image URL
    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }
}

impl Record for Product {
    fn id(&self) -> DocumentId {
        self.id
    }
}

/// Seed catalog (loaded from config at startup)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedCatalog {
    #[serde(default)]
    pub products: Vec<Product>,
}

impl SeedCatalog {
    /// Parse a seed catalog from TOML
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }
}
