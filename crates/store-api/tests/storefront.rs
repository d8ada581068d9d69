//! End-to-end storefront flows: catalog management, cart, checkout, and
//! the payment bridge.

use axum_test::TestServer;
use serde_json::{json, Value};
use std::sync::Arc;
use std::sync::Mutex;
use store_api::{routes, AppState};
use store_auth::AuthConfig;
use store_core::{MemoryStore, Role, StoreResult, User};
use store_stripe::{PaymentGateway, PaymentIntent};

/// Gateway double that records requested amounts
struct RecordingGateway {
    amounts: Mutex<Vec<f64>>,
}

impl RecordingGateway {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            amounts: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait::async_trait]
impl PaymentGateway for RecordingGateway {
    async fn create_intent(&self, amount_usd: f64) -> StoreResult<PaymentIntent> {
        self.amounts.lock().unwrap().push(amount_usd);
        Ok(PaymentIntent {
            intent_id: "pi_recorded".to_string(),
            client_secret: "pi_recorded_secret".to_string(),
            amount: (amount_usd * 100.0).round() as i64,
            currency: "usd".to_string(),
        })
    }

    fn provider_name(&self) -> &'static str {
        "recording"
    }
}

fn test_state(gateway: Arc<RecordingGateway>) -> AppState {
    AppState::with_parts(
        MemoryStore::open(),
        AuthConfig::new("integration-test-signing-secret"),
        gateway,
    )
}

async fn seed_admin(state: &AppState, email: &str) {
    let mut user = User::new(email);
    user.role = Role::Admin;
    state.store.users.insert_one(user).await.unwrap();
}

fn token_for(state: &AppState, email: &str) -> String {
    state.signer.issue(email, state.auth.session_ttl)
}

#[tokio::test]
async fn full_shopping_flow() {
    let state = test_state(RecordingGateway::new());
    seed_admin(&state, "admin@example.com").await;
    let server = TestServer::new(routes::create_router(state.clone())).unwrap();

    let admin_token = token_for(&state, "admin@example.com");

    // Admin stocks the catalog
    let res = server
        .post("/api/v1/products")
        .authorization_bearer(&admin_token)
        .json(&json!({
            "name": "Monstera Deliciosa",
            "description": "Split-leaf, 6in pot",
            "price": 24.99,
            "stock": 10
        }))
        .await;
    assert_eq!(res.status_code(), 200);
    let product = res.json::<Value>();
    let product_id = product["id"].as_str().unwrap().to_string();
    assert_eq!(product["price"], json!(2499));

    // A shopper registers and shops with the minted token
    let res = server
        .put("/api/v1/users/shopper@example.com")
        .json(&json!({ "name": "Shopper" }))
        .await;
    let shopper_token = res.json::<Value>()["token"].as_str().unwrap().to_string();

    let res = server
        .post("/api/v1/carts")
        .authorization_bearer(&shopper_token)
        .json(&json!({ "product_id": product_id, "quantity": 2 }))
        .await;
    assert_eq!(res.status_code(), 200);
    let cart_item = res.json::<Value>();
    let cart_item_id = cart_item["id"].as_str().unwrap().to_string();

    // Bump the quantity
    let res = server
        .patch(&format!("/api/v1/carts/{cart_item_id}"))
        .authorization_bearer(&shopper_token)
        .json(&json!({ "quantity": 3 }))
        .await;
    assert_eq!(res.status_code(), 200);
    assert_eq!(res.json::<Value>()["quantity"], json!(3));

    // Place the order; cart empties
    let res = server
        .post("/api/v1/orders")
        .authorization_bearer(&shopper_token)
        .await;
    assert_eq!(res.status_code(), 200);
    let order = res.json::<Value>();
    let order_id = order["id"].as_str().unwrap().to_string();
    assert_eq!(order["total"], json!(3 * 2499));
    assert_eq!(order["status"], json!("pending"));

    let res = server
        .get("/api/v1/carts")
        .authorization_bearer(&shopper_token)
        .await;
    assert_eq!(res.json::<Value>().as_array().unwrap().len(), 0);

    // Record the payment
    let res = server
        .patch(&format!("/api/v1/orders/{order_id}/payment"))
        .authorization_bearer(&shopper_token)
        .json(&json!({ "transaction_id": "pi_recorded" }))
        .await;
    assert_eq!(res.status_code(), 200);
    assert_eq!(res.json::<Value>()["status"], json!("paid"));

    // Admin ships it
    let res = server
        .patch(&format!("/api/v1/orders/{order_id}/status"))
        .authorization_bearer(&admin_token)
        .await;
    assert_eq!(res.status_code(), 200);
    assert_eq!(res.json::<Value>()["status"], json!("shipped"));

    // Admin sees every order; the shopper sees their own
    let res = server
        .get("/api/v1/orders/all")
        .authorization_bearer(&admin_token)
        .await;
    assert_eq!(res.json::<Value>().as_array().unwrap().len(), 1);

    let res = server
        .get("/api/v1/orders")
        .authorization_bearer(&shopper_token)
        .await;
    assert_eq!(res.json::<Value>().as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn payment_intent_relays_client_secret() {
    let gateway = RecordingGateway::new();
    let state = test_state(Arc::clone(&gateway));
    let server = TestServer::new(routes::create_router(state.clone())).unwrap();

    let token = token_for(&state, "shopper@example.com");
    let res = server
        .post("/api/v1/payments/intent")
        .authorization_bearer(&token)
        .json(&json!({ "amount": 49.99 }))
        .await;

    assert_eq!(res.status_code(), 200);
    assert_eq!(
        res.json::<Value>(),
        json!({ "client_secret": "pi_recorded_secret" })
    );
    assert_eq!(*gateway.amounts.lock().unwrap(), vec![49.99]);
}

#[tokio::test]
async fn cart_items_are_scoped_to_the_token_identity() {
    let state = test_state(RecordingGateway::new());
    let server = TestServer::new(routes::create_router(state.clone())).unwrap();

    // Seed a product directly
    let product = store_core::Product::new("Boston Fern", 18.00);
    let product = state.store.products.insert_one(product).await.unwrap();

    let alice = token_for(&state, "alice@example.com");
    let bob = token_for(&state, "bob@example.com");

    let res = server
        .post("/api/v1/carts")
        .authorization_bearer(&alice)
        .json(&json!({ "product_id": product.id.to_string() }))
        .await;
    let item_id = res.json::<Value>()["id"].as_str().unwrap().to_string();

    // Bob sees an empty cart and cannot touch Alice's item
    let res = server.get("/api/v1/carts").authorization_bearer(&bob).await;
    assert_eq!(res.json::<Value>().as_array().unwrap().len(), 0);

    let res = server
        .delete(&format!("/api/v1/carts/{item_id}"))
        .authorization_bearer(&bob)
        .await;
    assert_eq!(res.status_code(), 404);

    // Alice still has her item
    let res = server
        .get("/api/v1/carts")
        .authorization_bearer(&alice)
        .await;
    assert_eq!(res.json::<Value>().as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn public_catalog_and_content_routes() {
    let state = test_state(RecordingGateway::new());
    seed_admin(&state, "admin@example.com").await;
    let server = TestServer::new(routes::create_router(state.clone())).unwrap();

    let admin_token = token_for(&state, "admin@example.com");

    let res = server
        .post("/api/v1/blogs")
        .authorization_bearer(&admin_token)
        .json(&json!({
            "title": "Caring for your Monstera",
            "body": "Bright indirect light and weekly watering.",
            "author": "The Verdant Team"
        }))
        .await;
    assert_eq!(res.status_code(), 200);
    let blog_id = res.json::<Value>()["id"].as_str().unwrap().to_string();

    // Blogs and reviews read without a token
    let res = server.get("/api/v1/blogs").await;
    assert_eq!(res.status_code(), 200);
    assert_eq!(res.json::<Value>().as_array().unwrap().len(), 1);

    let res = server.get(&format!("/api/v1/blogs/{blog_id}")).await;
    assert_eq!(res.status_code(), 200);

    // Reviews require a token to write, none to read
    let shopper = token_for(&state, "shopper@example.com");
    let res = server
        .post("/api/v1/reviews")
        .authorization_bearer(&shopper)
        .json(&json!({ "reviewer_name": "Shopper", "rating": 5, "comment": "Lovely plants" }))
        .await;
    assert_eq!(res.status_code(), 200);
    assert_eq!(res.json::<Value>()["email"], json!("shopper@example.com"));

    let res = server.get("/api/v1/reviews").await;
    assert_eq!(res.json::<Value>().as_array().unwrap().len(), 1);

    let res = server.post("/api/v1/reviews").json(&json!({})).await;
    assert_eq!(res.status_code(), 401);
}

#[tokio::test]
async fn unknown_product_is_not_found() {
    let state = test_state(RecordingGateway::new());
    let server = TestServer::new(routes::create_router(state.clone())).unwrap();

    let res = server
        .get(&format!("/api/v1/products/{}", store_core::DocumentId::new()))
        .await;
    assert_eq!(res.status_code(), 404);

    // Malformed ids are a client error, not a server crash
    let res = server.get("/api/v1/products/not-a-uuid").await;
    assert_eq!(res.status_code(), 400);
}

#[tokio::test]
async fn admin_check_reflects_role() {
    let state = test_state(RecordingGateway::new());
    seed_admin(&state, "admin@example.com").await;
    let server = TestServer::new(routes::create_router(state.clone())).unwrap();

    let token = token_for(&state, "shopper@example.com");

    let res = server
        .get("/api/v1/users/admin@example.com/admin")
        .authorization_bearer(&token)
        .await;
    assert_eq!(res.json::<Value>(), json!({ "admin": true }));

    // Unknown emails resolve to an explicit non-admin answer
    let res = server
        .get("/api/v1/users/nobody@example.com/admin")
        .authorization_bearer(&token)
        .await;
    assert_eq!(res.json::<Value>(), json!({ "admin": false }));
}
