//! # Application State
//!
//! Shared state for the Axum application.
//! Contains the document store handle, the token signer, and the payment
//! gateway. Everything is constructed once at startup and injected; no
//! global mutable handles.

use std::sync::Arc;
use store_auth::{AuthConfig, TokenSigner};
use store_core::{MemoryStore, SeedCatalog};
use store_stripe::{BoxedPaymentGateway, StripeGateway};

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Environment (development, staging, production)
    pub environment: String,
}

impl AppConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
        }
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<std::net::SocketAddr> {
        Ok(format!("{}:{}", self.host, self.port).parse()?)
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Document store handle
    pub store: MemoryStore,
    /// Session token signer
    pub signer: TokenSigner,
    /// Auth configuration (token ttls)
    pub auth: AuthConfig,
    /// Payment gateway
    pub gateway: BoxedPaymentGateway,
    /// Application config
    pub config: AppConfig,
}

impl AppState {
    /// Create a new AppState from the environment, with the Stripe gateway
    pub async fn new() -> anyhow::Result<Self> {
        let config = AppConfig::from_env();

        let auth = AuthConfig::from_env()
            .map_err(|e| anyhow::anyhow!("Failed to load auth config: {}", e))?;
        let signer = TokenSigner::new(&auth);

        let gateway = StripeGateway::from_env()
            .map_err(|e| anyhow::anyhow!("Failed to initialize Stripe: {}", e))?;

        let store = MemoryStore::open();
        if let Some(catalog) = load_seed_catalog()? {
            store.seed(catalog).await?;
        }

        Ok(Self {
            store,
            signer,
            auth,
            gateway: Arc::new(gateway) as BoxedPaymentGateway,
            config,
        })
    }

    /// Assemble state from explicit parts (for testing)
    pub fn with_parts(store: MemoryStore, auth: AuthConfig, gateway: BoxedPaymentGateway) -> Self {
        let signer = TokenSigner::new(&auth);
        Self {
            store,
            signer,
            auth,
            gateway,
            config: AppConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                environment: "test".to_string(),
            },
        }
    }
}

/// Load the seed product catalog from a config file, if one exists
fn load_seed_catalog() -> anyhow::Result<Option<SeedCatalog>> {
    let config_paths = [
        "config/products.toml",
        "../config/products.toml",
        "../../config/products.toml",
    ];

    for path in config_paths {
        if let Ok(content) = std::fs::read_to_string(path) {
            let catalog = SeedCatalog::from_toml(&content)
                .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", path, e))?;
            tracing::info!("Loaded {} seed products from {}", catalog.products.len(), path);
            return Ok(Some(catalog));
        }
    }

    tracing::warn!("No seed catalog found, starting with an empty product collection");
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_config_defaults() {
        std::env::remove_var("HOST");
        std::env::remove_var("PORT");

        let config = AppConfig::from_env();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 5000);
    }

    #[test]
    fn test_socket_addr() {
        let config = AppConfig {
            host: "0.0.0.0".to_string(),
            port: 3000,
            environment: "test".to_string(),
        };

        let addr = config.socket_addr().unwrap();
        assert_eq!(addr.to_string(), "0.0.0.0:3000");
    }
}
