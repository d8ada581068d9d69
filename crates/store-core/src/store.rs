//! # Document Store
//!
//! The store handle owns one collection per record type and an explicit
//! open/shutdown lifecycle. It is constructed once at startup, injected
//! into the HTTP layer through application state, and closed on shutdown.
//! After `shutdown()` every collection operation returns `StoreClosed`.

use crate::cart::CartItem;
use crate::catalog::{Product, SeedCatalog};
use crate::content::{Blog, Review};
use crate::document::Collection;
use crate::error::StoreResult;
use crate::order::Order;
use crate::user::User;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Handle to the storefront's document collections.
///
/// Cheap to clone; clones share the same collections and lifecycle flag.
#[derive(Clone)]
pub struct MemoryStore {
    closed: Arc<AtomicBool>,
    pub users: Collection<User>,
    pub products: Collection<Product>,
    pub carts: Collection<CartItem>,
    pub orders: Collection<Order>,
    pub blogs: Collection<Blog>,
    pub reviews: Collection<Review>,
}

impl MemoryStore {
    /// Open a fresh, empty store
    pub fn open() -> Self {
        let closed = Arc::new(AtomicBool::new(false));
        Self {
            users: Collection::new("users", Arc::clone(&closed)),
            products: Collection::new("products", Arc::clone(&closed)),
            carts: Collection::new("carts", Arc::clone(&closed)),
            orders: Collection::new("orders", Arc::clone(&closed)),
            blogs: Collection::new("blogs", Arc::clone(&closed)),
            reviews: Collection::new("reviews", Arc::clone(&closed)),
            closed,
        }
    }

    /// Load products from a seed catalog
    pub async fn seed(&self, catalog: SeedCatalog) -> StoreResult<usize> {
        let count = catalog.products.len();
        for product in catalog.products {
            self.products.insert_one(product).await?;
        }
        tracing::info!("Seeded {} products", count);
        Ok(count)
    }

    /// Whether the store is still accepting operations
    pub fn is_open(&self) -> bool {
        !self.closed.load(Ordering::SeqCst)
    }

    /// Close the store. Idempotent; all later operations fail with
    /// `StoreClosed`.
    pub fn shutdown(&self) {
        if !self.closed.swap(true, Ordering::SeqCst) {
            tracing::info!("Document store closed");
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::open()
    }
}
