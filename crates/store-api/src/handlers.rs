//! # Request Handlers
//!
//! Axum request handlers for the storefront API. Each handler is a thin
//! translator: parse the request, run one or two store operations, and
//! serialize the result. The authorization gate runs before any handler
//! on protected routes (see `middleware`).

use crate::error::ApiError;
use crate::middleware::AuthedUser;
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};
use store_core::{
    Blog, CartItem, DocumentId, Order, Product, Review, StoreError, User, UserProfile,
};
use tracing::{info, instrument};

// =============================================================================
// Request/Response Types
// =============================================================================

/// Response for the profile upsert route (also mints a session token)
#[derive(Debug, Serialize)]
pub struct UpsertUserResponse {
    /// Whether a new user record was created
    pub upserted: bool,
    /// Fresh session token bound to the email
    pub token: String,
}

/// Login request (upsert-by-email)
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// Response carrying a freshly minted token
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Admin check response
#[derive(Debug, Serialize)]
pub struct AdminCheckResponse {
    pub admin: bool,
}

/// Create product request (price in decimal USD)
#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    #[serde(default)]
    pub stock: u32,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Add-to-cart request
#[derive(Debug, Deserialize)]
pub struct AddToCartRequest {
    pub product_id: String,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

/// Cart quantity patch
#[derive(Debug, Deserialize)]
pub struct UpdateQuantityRequest {
    pub quantity: u32,
}

/// Payment record patch for an order
#[derive(Debug, Deserialize)]
pub struct RecordPaymentRequest {
    pub transaction_id: String,
}

/// Create blog request
#[derive(Debug, Deserialize)]
pub struct CreateBlogRequest {
    pub title: String,
    pub body: String,
    pub author: String,
}

/// Create review request (reviewer identity comes from the token)
#[derive(Debug, Deserialize)]
pub struct CreateReviewRequest {
    pub reviewer_name: String,
    pub rating: u8,
    #[serde(default)]
    pub comment: String,
}

/// Payment intent request (amount in decimal USD)
#[derive(Debug, Deserialize)]
pub struct CreateIntentRequest {
    pub amount: f64,
}

/// Payment intent response
#[derive(Debug, Serialize)]
pub struct CreateIntentResponse {
    pub client_secret: String,
}

fn parse_id(id: &str) -> Result<DocumentId, ApiError> {
    Ok(id.parse::<DocumentId>()?)
}

// =============================================================================
// Health
// =============================================================================

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "verdant-cart",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

// =============================================================================
// Users & Auth
// =============================================================================

/// Upsert a user profile by email and mint a short-lived session token
#[instrument(skip(state, profile), fields(email = %email))]
pub async fn upsert_user(
    State(state): State<AppState>,
    Path(email): Path<String>,
    Json(profile): Json<UserProfile>,
) -> Result<Json<UpsertUserResponse>, ApiError> {
    let (_, upserted) = state
        .store
        .users
        .upsert(
            |u| u.email == email,
            |u| profile.apply_to(u),
            || {
                let mut user = User::new(&email);
                profile.apply_to(&mut user);
                user
            },
        )
        .await?;

    let token = state.signer.issue(&email, state.auth.session_ttl);
    info!("Upserted user (inserted={})", upserted);

    Ok(Json(UpsertUserResponse { upserted, token }))
}

/// Login: upsert the user record and mint a long-lived token
#[instrument(skip(state, request), fields(email = %request.email))]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let email = request.email.clone();
    state
        .store
        .users
        .upsert(
            |u| u.email == email,
            |u| {
                if let Some(name) = &request.name {
                    u.name = name.clone();
                }
            },
            || {
                let mut user = User::new(&email);
                if let Some(name) = &request.name {
                    user.name = name.clone();
                }
                user
            },
        )
        .await?;

    let token = state.signer.issue(&request.email, state.auth.login_ttl);
    Ok(Json(TokenResponse { token }))
}

/// List all users (admin)
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, ApiError> {
    Ok(Json(state.store.users.find_all().await?))
}

/// Grant the admin role to an existing user (admin). Idempotent.
#[instrument(skip(state), fields(email = %email))]
pub async fn grant_admin(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<User>, ApiError> {
    let user = state
        .store
        .users
        .find_first(|u| u.email == email)
        .await?
        .ok_or_else(|| StoreError::NotFound {
            collection: "users",
            id: email.clone(),
        })?;

    let updated = state
        .store
        .users
        .update_one(user.id, |u| u.role = store_core::Role::Admin)
        .await?;

    info!("Granted admin role");
    Ok(Json(updated))
}

/// Check whether an email belongs to an admin (authenticated)
pub async fn check_admin(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<AdminCheckResponse>, ApiError> {
    let admin = state
        .store
        .users
        .find_first(|u| u.email == email)
        .await?
        .map(|u| u.is_admin())
        .unwrap_or(false);

    Ok(Json(AdminCheckResponse { admin }))
}

// =============================================================================
// Products
// =============================================================================

/// List all products
pub async fn list_products(
    State(state): State<AppState>,
) -> Result<Json<Vec<Product>>, ApiError> {
    Ok(Json(state.store.products.find_all().await?))
}

/// Get a single product
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Product>, ApiError> {
    let id = parse_id(&id)?;
    let product = state
        .store
        .products
        .find_one(id)
        .await?
        .ok_or_else(|| StoreError::ProductNotFound {
            product_id: id.to_string(),
        })?;

    Ok(Json(product))
}

/// Add a product to the catalog (admin)
#[instrument(skip(state, request), fields(name = %request.name))]
pub async fn create_product(
    State(state): State<AppState>,
    Json(request): Json<CreateProductRequest>,
) -> Result<Json<Product>, ApiError> {
    if request.name.trim().is_empty() {
        return Err(StoreError::InvalidRequest("Product name is required".to_string()).into());
    }
    if !request.price.is_finite() || request.price <= 0.0 {
        return Err(StoreError::InvalidRequest("Price must be positive".to_string()).into());
    }

    let mut product = Product::new(&request.name, request.price)
        .with_description(&request.description)
        .with_stock(request.stock);
    if let Some(url) = request.image_url {
        product = product.with_image(url);
    }

    let product = state.store.products.insert_one(product).await?;
    info!("Created product {}", product.id);
    Ok(Json(product))
}

/// Remove a product from the catalog (admin)
#[instrument(skip(state), fields(product_id = %id))]
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Product>, ApiError> {
    let id = parse_id(&id)?;
    let product = state.store.products.delete_one(id).await?;
    info!("Deleted product");
    Ok(Json(product))
}

// =============================================================================
// Carts
// =============================================================================

/// List the caller's cart items
pub async fn list_carts(
    State(state): State<AppState>,
    Extension(authed): Extension<AuthedUser>,
) -> Result<Json<Vec<CartItem>>, ApiError> {
    let items = state
        .store
        .carts
        .find(|c| c.email == authed.email)
        .await?;
    Ok(Json(items))
}

/// Add a product to the caller's cart
#[instrument(skip(state, authed, request), fields(email = %authed.email))]
pub async fn add_to_cart(
    State(state): State<AppState>,
    Extension(authed): Extension<AuthedUser>,
    Json(request): Json<AddToCartRequest>,
) -> Result<Json<CartItem>, ApiError> {
    if request.quantity == 0 {
        return Err(StoreError::InvalidRequest("Quantity must be at least 1".to_string()).into());
    }

    let product_id = parse_id(&request.product_id)?;
    let product = state
        .store
        .products
        .find_one(product_id)
        .await?
        .ok_or_else(|| StoreError::ProductNotFound {
            product_id: product_id.to_string(),
        })?;

    if !product.active {
        return Err(StoreError::InvalidRequest(format!(
            "Product is not available: {}",
            product.name
        ))
        .into());
    }

    let item = CartItem::from_product(&authed.email, &product, request.quantity);
    let item = state.store.carts.insert_one(item).await?;
    info!("Added {} x{} to cart", item.product_name, item.quantity);
    Ok(Json(item))
}

/// Patch the quantity of one of the caller's cart items
pub async fn update_cart_quantity(
    State(state): State<AppState>,
    Extension(authed): Extension<AuthedUser>,
    Path(id): Path<String>,
    Json(request): Json<UpdateQuantityRequest>,
) -> Result<Json<CartItem>, ApiError> {
    if request.quantity == 0 {
        return Err(StoreError::InvalidRequest("Quantity must be at least 1".to_string()).into());
    }

    let id = parse_id(&id)?;
    owned_cart_item(&state, &authed, id).await?;

    let updated = state
        .store
        .carts
        .update_one(id, |item| item.quantity = request.quantity)
        .await?;
    Ok(Json(updated))
}

/// Remove one of the caller's cart items
pub async fn remove_cart_item(
    State(state): State<AppState>,
    Extension(authed): Extension<AuthedUser>,
    Path(id): Path<String>,
) -> Result<Json<CartItem>, ApiError> {
    let id = parse_id(&id)?;
    owned_cart_item(&state, &authed, id).await?;

    let removed = state.store.carts.delete_one(id).await?;
    Ok(Json(removed))
}

/// Resolve a cart item only if it belongs to the caller. Foreign items are
/// reported as missing rather than forbidden to avoid leaking ids.
async fn owned_cart_item(
    state: &AppState,
    authed: &AuthedUser,
    id: DocumentId,
) -> Result<CartItem, ApiError> {
    let item = state.store.carts.find_one(id).await?;
    match item {
        Some(item) if item.email == authed.email => Ok(item),
        _ => Err(StoreError::NotFound {
            collection: "carts",
            id: id.to_string(),
        }
        .into()),
    }
}

// =============================================================================
// Orders
// =============================================================================

/// Place an order from the caller's cart, emptying the cart
#[instrument(skip(state, authed), fields(email = %authed.email))]
pub async fn create_order(
    State(state): State<AppState>,
    Extension(authed): Extension<AuthedUser>,
) -> Result<Json<Order>, ApiError> {
    let items = state
        .store
        .carts
        .find(|c| c.email == authed.email)
        .await?;

    if items.is_empty() {
        return Err(StoreError::InvalidRequest("Cart is empty".to_string()).into());
    }

    let order = Order::from_cart(&authed.email, &items);
    let order = state.store.orders.insert_one(order).await?;

    for item in &items {
        state.store.carts.delete_one(item.id).await?;
    }

    info!("Placed order {} ({} cents)", order.id, order.total);
    Ok(Json(order))
}

/// List the caller's orders
pub async fn list_own_orders(
    State(state): State<AppState>,
    Extension(authed): Extension<AuthedUser>,
) -> Result<Json<Vec<Order>>, ApiError> {
    let orders = state
        .store
        .orders
        .find(|o| o.email == authed.email)
        .await?;
    Ok(Json(orders))
}

/// Get one of the caller's orders
pub async fn get_order(
    State(state): State<AppState>,
    Extension(authed): Extension<AuthedUser>,
    Path(id): Path<String>,
) -> Result<Json<Order>, ApiError> {
    let id = parse_id(&id)?;
    let order = state.store.orders.find_one(id).await?;
    match order {
        Some(order) if order.email == authed.email => Ok(Json(order)),
        _ => Err(StoreError::NotFound {
            collection: "orders",
            id: id.to_string(),
        }
        .into()),
    }
}

/// Record a completed payment against one of the caller's orders
#[instrument(skip(state, authed, request), fields(order_id = %id))]
pub async fn record_payment(
    State(state): State<AppState>,
    Extension(authed): Extension<AuthedUser>,
    Path(id): Path<String>,
    Json(request): Json<RecordPaymentRequest>,
) -> Result<Json<Order>, ApiError> {
    let id = parse_id(&id)?;
    let order = state.store.orders.find_one(id).await?;
    let order = match order {
        Some(order) if order.email == authed.email => order,
        _ => {
            return Err(StoreError::NotFound {
                collection: "orders",
                id: id.to_string(),
            }
            .into())
        }
    };

    let updated = state
        .store
        .orders
        .update_one(order.id, |o| o.mark_paid(&request.transaction_id))
        .await?;

    info!("Recorded payment {}", request.transaction_id);
    Ok(Json(updated))
}

/// List every order (admin)
pub async fn list_all_orders(
    State(state): State<AppState>,
) -> Result<Json<Vec<Order>>, ApiError> {
    Ok(Json(state.store.orders.find_all().await?))
}

/// Mark an order as shipped (admin)
#[instrument(skip(state), fields(order_id = %id))]
pub async fn ship_order(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Order>, ApiError> {
    let id = parse_id(&id)?;
    let updated = state
        .store
        .orders
        .update_one(id, |o| o.mark_shipped())
        .await?;

    info!("Shipped order");
    Ok(Json(updated))
}

// =============================================================================
// Blogs
// =============================================================================

/// List all blog posts
pub async fn list_blogs(State(state): State<AppState>) -> Result<Json<Vec<Blog>>, ApiError> {
    Ok(Json(state.store.blogs.find_all().await?))
}

/// Get a single blog post
pub async fn get_blog(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Blog>, ApiError> {
    let id = parse_id(&id)?;
    let blog = state
        .store
        .blogs
        .find_one(id)
        .await?
        .ok_or_else(|| StoreError::NotFound {
            collection: "blogs",
            id: id.to_string(),
        })?;
    Ok(Json(blog))
}

/// Publish a blog post (admin)
#[instrument(skip(state, request), fields(title = %request.title))]
pub async fn create_blog(
    State(state): State<AppState>,
    Json(request): Json<CreateBlogRequest>,
) -> Result<Json<Blog>, ApiError> {
    if request.title.trim().is_empty() {
        return Err(StoreError::InvalidRequest("Blog title is required".to_string()).into());
    }

    let blog = Blog::new(&request.title, &request.body, &request.author);
    let blog = state.store.blogs.insert_one(blog).await?;
    info!("Published blog {}", blog.id);
    Ok(Json(blog))
}

// =============================================================================
// Reviews
// =============================================================================

/// List all reviews
pub async fn list_reviews(
    State(state): State<AppState>,
) -> Result<Json<Vec<Review>>, ApiError> {
    Ok(Json(state.store.reviews.find_all().await?))
}

/// Leave a review (authenticated; identity comes from the token)
#[instrument(skip(state, authed, request), fields(email = %authed.email))]
pub async fn create_review(
    State(state): State<AppState>,
    Extension(authed): Extension<AuthedUser>,
    Json(request): Json<CreateReviewRequest>,
) -> Result<Json<Review>, ApiError> {
    let review = Review::new(
        &authed.email,
        &request.reviewer_name,
        request.rating,
        &request.comment,
    );
    let review = state.store.reviews.insert_one(review).await?;
    Ok(Json(review))
}

// =============================================================================
// Payments
// =============================================================================

/// Create a payment intent and relay the client secret
#[instrument(skip(state, authed, request), fields(email = %authed.email, amount = request.amount))]
pub async fn create_payment_intent(
    State(state): State<AppState>,
    Extension(authed): Extension<AuthedUser>,
    Json(request): Json<CreateIntentRequest>,
) -> Result<Json<CreateIntentResponse>, ApiError> {
    let intent = state.gateway.create_intent(request.amount).await?;
    info!("Created payment intent {}", intent.intent_id);

    Ok(Json(CreateIntentResponse {
        client_secret: intent.client_secret,
    }))
}
