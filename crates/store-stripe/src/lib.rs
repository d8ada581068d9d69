//! # store-stripe
//!
//! Stripe payment-intent bridge for the verdant-cart storefront.
//!
//! The storefront only needs one provider operation: create a payment
//! intent for a decimal USD amount and hand the client secret back to the
//! frontend. Everything else about the provider is opaque.

pub mod config;
pub mod intent;

// Re-exports for convenience
pub use config::StripeConfig;
pub use intent::{BoxedPaymentGateway, PaymentGateway, PaymentIntent, StripeGateway};
