//! # Routes
//!
//! Axum router configuration for the storefront API.
//! Protected routes compose the gate as an ordered pipeline:
//! `require_auth` runs first, then `require_admin` on elevated routes,
//! then the handler.

use crate::handlers;
use crate::middleware::{require_admin, require_auth};
use crate::state::AppState;
use axum::{
    middleware,
    routing::{delete, get, patch, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Create the main application router
///
/// Routes:
/// - Public:
///   - GET  /health
///   - GET  /api/v1/products, /api/v1/products/{id}
///   - GET  /api/v1/blogs, /api/v1/blogs/{id}
///   - GET  /api/v1/reviews
///   - PUT  /api/v1/users/{email} - profile upsert, mints a session token
///   - POST /api/v1/auth/login - login upsert, mints a long-lived token
///
/// - Authenticated:
///   - GET/POST /api/v1/carts, PATCH/DELETE /api/v1/carts/{id}
///   - GET/POST /api/v1/orders, GET /api/v1/orders/{id}
///   - PATCH /api/v1/orders/{id}/payment
///   - POST /api/v1/reviews
///   - POST /api/v1/payments/intent
///   - GET  /api/v1/users/{email}/admin
///
/// - Admin:
///   - GET  /api/v1/users
///   - PUT  /api/v1/users/{email}/admin
///   - POST /api/v1/products, DELETE /api/v1/products/{id}
///   - GET  /api/v1/orders/all, PATCH /api/v1/orders/{id}/status
///   - POST /api/v1/blogs
pub fn create_router(state: AppState) -> Router {
    // CORS configuration - allow all origins for now
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let public_routes = Router::new()
        .route("/products", get(handlers::list_products))
        .route("/products/{id}", get(handlers::get_product))
        .route("/blogs", get(handlers::list_blogs))
        .route("/blogs/{id}", get(handlers::get_blog))
        .route("/reviews", get(handlers::list_reviews))
        .route("/users/{email}", put(handlers::upsert_user))
        .route("/auth/login", post(handlers::login));

    // Token verification only
    let authed_routes = Router::new()
        .route("/carts", get(handlers::list_carts).post(handlers::add_to_cart))
        .route(
            "/carts/{id}",
            patch(handlers::update_cart_quantity).delete(handlers::remove_cart_item),
        )
        .route(
            "/orders",
            get(handlers::list_own_orders).post(handlers::create_order),
        )
        .route("/orders/{id}", get(handlers::get_order))
        .route("/orders/{id}/payment", patch(handlers::record_payment))
        .route("/reviews", post(handlers::create_review))
        .route("/payments/intent", post(handlers::create_payment_intent))
        .route("/users/{email}/admin", get(handlers::check_admin))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    // Token verification, then role check (strictly in that order)
    let admin_routes = Router::new()
        .route("/users", get(handlers::list_users))
        .route("/users/{email}/admin", put(handlers::grant_admin))
        .route("/products", post(handlers::create_product))
        .route("/products/{id}", delete(handlers::delete_product))
        .route("/orders/all", get(handlers::list_all_orders))
        .route("/orders/{id}/status", patch(handlers::ship_order))
        .route("/blogs", post(handlers::create_blog))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    let api_routes = Router::new()
        .merge(public_routes)
        .merge(authed_routes)
        .merge(admin_routes);

    Router::new()
        // Health check at root
        .route("/health", get(handlers::health))
        .route("/", get(handlers::health))
        // API v1
        .nest("/api/v1", api_routes)
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        // State
        .with_state(state)
}
