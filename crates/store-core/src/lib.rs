//! # store-core
//!
//! Core types and the document store for the verdant-cart storefront.
//!
//! This crate provides:
//! - `User` and `Role` for the admin gate's role check
//! - `Product`, `CartItem`, `Order`, `Blog`, and `Review` records
//! - `Collection` and `MemoryStore` for filter-based document operations
//!   with an explicit open/shutdown lifecycle
//! - `StoreError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use store_core::{MemoryStore, Product, User};
//!
//! let store = MemoryStore::open();
//!
//! // Upsert a user keyed by email
//! let (user, inserted) = store
//!     .users
//!     .upsert(|u| u.email == email, |u| profile.apply_to(u), || User::new(&email))
//!     .await?;
//!
//! // Find a product
//! let product = store.products.find_one(id).await?;
//!
//! store.shutdown();
//! ```

pub mod cart;
pub mod catalog;
pub mod content;
pub mod document;
pub mod error;
pub mod order;
pub mod store;
pub mod user;

// Re-exports for convenience
pub use cart::CartItem;
pub use catalog::{usd_from_minor_units, usd_minor_units, Product, SeedCatalog};
pub use content::{Blog, Review};
pub use document::{Collection, DocumentId, Record};
pub use error::{StoreError, StoreResult};
pub use order::{Order, OrderLine, OrderStatus};
pub use store::MemoryStore;
pub use user::{Role, User, UserProfile};
