//! # Verdant Cart RS
//!
//! Storefront backend with a token-based authorization gate.
//!
//! ## Usage
//!
//! ```bash
//! # Set environment variables
//! export ACCESS_TOKEN_SECRET=change-me-32-bytes-minimum
//! export STRIPE_SECRET_KEY=sk_test_...
//!
//! # Run the server
//! verdant-cart
//! ```

use store_api::{routes, state::AppState};
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    // Print banner
    print_banner();

    // Initialize application state
    let state = AppState::new().await?;

    let addr = state.config.socket_addr()?;
    let is_prod = state.config.is_production();

    info!("Environment: {}", state.config.environment);
    info!(
        "Products loaded: {}",
        state.store.products.count().await.unwrap_or(0)
    );
    info!("Payment provider: {}", state.gateway.provider_name());

    // Keep a handle for shutdown; the router takes its own clone
    let store = state.store.clone();

    // Create router
    let app = routes::create_router(state);

    // Start server
    info!("🌿 Verdant-Cart starting on http://{}", addr);

    if !is_prod {
        info!("📝 Health: http://{}/health", addr);
        info!("🛒 Products: GET http://{}/api/v1/products", addr);
        info!("💳 Payment intent: POST http://{}/api/v1/payments/intent", addr);
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Release the store explicitly once the server stops accepting requests
    store.shutdown();

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    info!("Shutdown signal received");
}

fn print_banner() {
    println!(
        r#"
  🌿 Verdant-Cart RS 🌿
  ━━━━━━━━━━━━━━━━━━━━━━
  Storefront backend
  Version: {}

"#,
        env!("CARGO_PKG_VERSION")
    );
}
