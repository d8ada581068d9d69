//! # Payment Intents
//!
//! The payment bridge: converts a decimal USD amount to minor units and
//! delegates to the provider's payment-intent API, relaying back the
//! client-usable secret. Currency is fixed to USD.

use crate::config::StripeConfig;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::sync::Arc;
use store_core::{usd_minor_units, StoreError, StoreResult};
use tracing::{debug, error, info, instrument};
use uuid::Uuid;

/// A created payment intent, ready for client-side confirmation
#[derive(Debug, Clone)]
pub struct PaymentIntent {
    /// Provider's intent id (pi_...)
    pub intent_id: String,

    /// Client secret the frontend uses to confirm the payment
    pub client_secret: String,

    /// Amount in cents
    pub amount: i64,

    /// Currency code (always "usd")
    pub currency: String,
}

/// Trait for payment providers that can create payment intents.
///
/// The storefront is written against this seam so tests can swap in a
/// mock provider.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Create a payment intent for the given decimal USD amount
    async fn create_intent(&self, amount_usd: f64) -> StoreResult<PaymentIntent>;

    /// Provider name (for logging)
    fn provider_name(&self) -> &'static str;
}

/// Type alias for a shared gateway (dynamic dispatch)
pub type BoxedPaymentGateway = Arc<dyn PaymentGateway>;

/// Stripe payment-intent gateway
pub struct StripeGateway {
    config: StripeConfig,
    client: Client,
}

impl StripeGateway {
    /// Create a new Stripe gateway
    pub fn new(config: StripeConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    /// Create from environment variables
    pub fn from_env() -> StoreResult<Self> {
        let config = StripeConfig::from_env()?;
        Ok(Self::new(config))
    }
}

#[async_trait]
impl PaymentGateway for StripeGateway {
    #[instrument(skip(self))]
    async fn create_intent(&self, amount_usd: f64) -> StoreResult<PaymentIntent> {
        if !amount_usd.is_finite() || amount_usd <= 0.0 {
            return Err(StoreError::InvalidRequest(
                "Payment amount must be positive".to_string(),
            ));
        }

        let amount = usd_minor_units(amount_usd);

        debug!("Creating payment intent: {} cents", amount);

        let form_params: Vec<(&str, String)> = vec![
            ("amount", amount.to_string()),
            ("currency", "usd".to_string()),
            ("payment_method_types[]", "card".to_string()),
        ];

        let url = format!("{}/v1/payment_intents", self.config.api_base_url);
        let idempotency_key = Uuid::new_v4().to_string();

        let response = self
            .client
            .post(&url)
            .header("Authorization", self.config.auth_header())
            .header("Stripe-Version", &self.config.api_version)
            .header("Idempotency-Key", &idempotency_key)
            .form(&form_params)
            .send()
            .await
            .map_err(|e| StoreError::NetworkError(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| StoreError::NetworkError(e.to_string()))?;

        if !status.is_success() {
            error!("Stripe API error: status={}, body={}", status, body);

            if let Ok(error_response) = serde_json::from_str::<StripeErrorResponse>(&body) {
                return Err(StoreError::ProviderError {
                    provider: "stripe".to_string(),
                    message: error_response.error.message,
                });
            }

            return Err(StoreError::ProviderError {
                provider: "stripe".to_string(),
                message: format!("HTTP {}: {}", status, body),
            });
        }

        let intent: StripeIntentResponse = serde_json::from_str(&body).map_err(|e| {
            StoreError::Serialization(format!("Failed to parse Stripe response: {}", e))
        })?;

        let client_secret = intent.client_secret.ok_or_else(|| {
            StoreError::ProviderError {
                provider: "stripe".to_string(),
                message: "Response missing client_secret".to_string(),
            }
        })?;

        info!("Created payment intent: id={}", intent.id);

        Ok(PaymentIntent {
            intent_id: intent.id,
            client_secret,
            amount,
            currency: "usd".to_string(),
        })
    }

    fn provider_name(&self) -> &'static str {
        "stripe"
    }
}

// =============================================================================
// Stripe API Types
// =============================================================================

#[derive(Debug, Deserialize)]
struct StripeIntentResponse {
    id: String,
    #[serde(default)]
    client_secret: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StripeErrorResponse {
    error: StripeError,
}

#[derive(Debug, Deserialize)]
struct StripeError {
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn gateway_for(server: &MockServer) -> StripeGateway {
        let config = StripeConfig::new("sk_test_abc123").with_api_base_url(server.uri());
        StripeGateway::new(config)
    }

    #[tokio::test]
    async fn test_create_intent_converts_to_minor_units() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/payment_intents"))
            .and(header("Authorization", "Bearer sk_test_abc123"))
            .and(body_string_contains("amount=1999"))
            .and(body_string_contains("currency=usd"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "pi_test_123",
                "client_secret": "pi_test_123_secret_xyz"
            })))
            .mount(&server)
            .await;

        let intent = gateway_for(&server).create_intent(19.99).await.unwrap();

        assert_eq!(intent.intent_id, "pi_test_123");
        assert_eq!(intent.client_secret, "pi_test_123_secret_xyz");
        assert_eq!(intent.amount, 1999);
        assert_eq!(intent.currency, "usd");
    }

    #[tokio::test]
    async fn test_provider_error_propagates() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/payment_intents"))
            .respond_with(ResponseTemplate::new(402).set_body_json(json!({
                "error": { "message": "Your card was declined." }
            })))
            .mount(&server)
            .await;

        let err = gateway_for(&server).create_intent(10.0).await.unwrap_err();
        match err {
            StoreError::ProviderError { provider, message } => {
                assert_eq!(provider, "stripe");
                assert_eq!(message, "Your card was declined.");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_non_positive_amount_rejected() {
        let server = MockServer::start().await;
        let gateway = gateway_for(&server);

        assert!(matches!(
            gateway.create_intent(0.0).await.unwrap_err(),
            StoreError::InvalidRequest(_)
        ));
        assert!(matches!(
            gateway.create_intent(-5.0).await.unwrap_err(),
            StoreError::InvalidRequest(_)
        ));
    }
}
