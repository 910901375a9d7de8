//! End-to-end API tests
//!
//! Each test builds the full router over an in-memory database and
//! drives it with `tower::ServiceExt::oneshot`, covering the paths a
//! client actually takes: register, login, browse, order, reserve.

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use bistro_server::auth::JwtConfig;
use bistro_server::{Config, ServerState};

const ADMIN_EMAIL: &str = "admin@bistro.test";
const ADMIN_PASSWORD: &str = "admin-password-123";

async fn test_app() -> Router {
    test_app_with_env("test").await
}

async fn test_app_with_env(environment: &str) -> Router {
    let config = Config {
        http_port: 0,
        database_path: "memory".into(),
        jwt: JwtConfig {
            secret: "integration-test-secret-0123456789abcdef".into(),
            expiration_minutes: 60,
            issuer: "bistro-server".into(),
            audience: "bistro-clients".into(),
        },
        environment: environment.into(),
        admin_email: Some(ADMIN_EMAIL.into()),
        admin_password: Some(ADMIN_PASSWORD.into()),
    };
    let state = ServerState::initialize(&config).await.unwrap();
    bistro_server::api::router(state)
}

fn request(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body)
}

async fn register_and_login(app: &Router, name: &str, email: &str, password: &str) -> String {
    let (status, _) = send(
        app,
        request(
            "POST",
            "/api/auth/register",
            None,
            Some(json!({ "name": name, "email": email, "password": password })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    login(app, email, password).await
}

async fn login(app: &Router, email: &str, password: &str) -> String {
    let (status, body) = send(
        app,
        request(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({ "email": email, "password": password })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["token"].as_str().unwrap().to_string()
}

async fn admin_token(app: &Router) -> String {
    login(app, ADMIN_EMAIL, ADMIN_PASSWORD).await
}

async fn create_menu_item(app: &Router, admin: &str, name: &str, price: f64) -> String {
    let (status, body) = send(
        app,
        request(
            "POST",
            "/api/menu",
            Some(admin),
            Some(json!({ "name": name, "price": price, "category": "Main course" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn register_login_order_flow() {
    let app = test_app().await;
    let admin = admin_token(&app).await;
    let burger = create_menu_item(&app, &admin, "Burger", 10.00).await;
    let salad = create_menu_item(&app, &admin, "Salad", 15.00).await;

    let token = register_and_login(&app, "Anna", "anna@example.com", "a-long-password").await;

    let (status, order) = send(
        &app,
        request(
            "POST",
            "/api/orders/create",
            Some(&token),
            Some(json!({
                "items": [
                    { "menu_item_id": burger, "quantity": 2 },
                    { "menu_item_id": salad, "quantity": 1 },
                ],
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(order["total_price"], json!(35.0));
    assert_eq!(order["status"], json!("pending"));

    let (status, orders) = send(&app, request("GET", "/api/orders/user", Some(&token), None)).await;
    assert_eq!(status, StatusCode::OK);
    let orders = orders.as_array().unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0]["total_price"], json!(35.0));
}

#[tokio::test]
async fn admin_status_update_shows_in_filtered_listing() {
    let app = test_app().await;
    let admin = admin_token(&app).await;
    let burger = create_menu_item(&app, &admin, "Burger", 10.00).await;

    let token = register_and_login(&app, "Anna", "anna@example.com", "a-long-password").await;
    let (_, order) = send(
        &app,
        request(
            "POST",
            "/api/orders/create",
            Some(&token),
            Some(json!({ "items": [{ "menu_item_id": burger, "quantity": 1 }] })),
        ),
    )
    .await;
    let order_id = order["id"].as_str().unwrap();

    let (status, _) = send(
        &app,
        request(
            "PATCH",
            &format!("/api/orders/update/{order_id}"),
            Some(&admin),
            Some(json!({ "status": "completed" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, all) = send(
        &app,
        request("GET", "/api/orders/all?status=completed", Some(&admin), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let all = all.as_array().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0]["id"].as_str().unwrap(), order_id);
}

#[tokio::test]
async fn order_mutations_respect_ownership() {
    let app = test_app().await;
    let admin = admin_token(&app).await;
    let burger = create_menu_item(&app, &admin, "Burger", 10.00).await;

    let alice = register_and_login(&app, "Alice", "alice@example.com", "a-long-password").await;
    let bob = register_and_login(&app, "Bob", "bob@example.com", "a-long-password").await;

    let (_, order) = send(
        &app,
        request(
            "POST",
            "/api/orders/create",
            Some(&alice),
            Some(json!({ "items": [{ "menu_item_id": burger.clone(), "quantity": 1 }] })),
        ),
    )
    .await;
    let order_id = order["id"].as_str().unwrap().to_string();

    // Bob cannot touch Alice's order
    let (status, _) = send(
        &app,
        request(
            "POST",
            &format!("/api/orders/{order_id}/items"),
            Some(&bob),
            Some(json!({ "menu_item_id": burger.clone(), "quantity": 1 })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(
        &app,
        request("DELETE", &format!("/api/orders/{order_id}"), Some(&bob), None),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // Owner add merges quantities instead of appending a second line
    let (status, updated) = send(
        &app,
        request(
            "POST",
            &format!("/api/orders/{order_id}/items"),
            Some(&alice),
            Some(json!({ "menu_item_id": burger.clone(), "quantity": 2 })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["items"].as_array().unwrap().len(), 1);
    assert_eq!(updated["items"][0]["quantity"], json!(3));
    assert_eq!(updated["total_price"], json!(30.0));

    // Removing an item that is not in the order is 404
    let (status, _) = send(
        &app,
        request(
            "DELETE",
            &format!("/api/orders/{order_id}/items"),
            Some(&alice),
            Some(json!({ "menu_item_id": "menu_item:ghost" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Removing the only line leaves an empty, zero-total order
    let (status, emptied) = send(
        &app,
        request(
            "DELETE",
            &format!("/api/orders/{order_id}/items"),
            Some(&alice),
            Some(json!({ "menu_item_id": burger })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(emptied["items"].as_array().unwrap().is_empty());
    assert_eq!(emptied["total_price"], json!(0.0));
}

#[tokio::test]
async fn create_order_input_validation() {
    let app = test_app().await;
    let token = register_and_login(&app, "Anna", "anna@example.com", "a-long-password").await;

    // Empty items are rejected before touching the database
    let (status, body) = send(
        &app,
        request(
            "POST",
            "/api/orders/create",
            Some(&token),
            Some(json!({ "items": [] })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].is_string());

    // Unknown menu item fails the whole order with 404
    let (status, _) = send(
        &app,
        request(
            "POST",
            "/api/orders/create",
            Some(&token),
            Some(json!({ "items": [{ "menu_item_id": "menu_item:ghost", "quantity": 1 }] })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Quantities are capped per line
    let (status, _) = send(
        &app,
        request(
            "POST",
            "/api/orders/create",
            Some(&token),
            Some(json!({ "items": [{ "menu_item_id": "menu_item:ghost", "quantity": 5000 }] })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn invalid_status_is_rejected() {
    let app = test_app().await;
    let admin = admin_token(&app).await;
    let burger = create_menu_item(&app, &admin, "Burger", 10.00).await;
    let token = register_and_login(&app, "Anna", "anna@example.com", "a-long-password").await;

    let (_, order) = send(
        &app,
        request(
            "POST",
            "/api/orders/create",
            Some(&token),
            Some(json!({ "items": [{ "menu_item_id": burger, "quantity": 1 }] })),
        ),
    )
    .await;
    let order_id = order["id"].as_str().unwrap();

    let (status, _) = send(
        &app,
        request(
            "PATCH",
            &format!("/api/orders/update/{order_id}"),
            Some(&admin),
            Some(json!({ "status": "done" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Order is unchanged
    let (_, orders) = send(&app, request("GET", "/api/orders/user", Some(&token), None)).await;
    assert_eq!(orders[0]["status"], json!("pending"));
}

#[tokio::test]
async fn auth_error_taxonomy() {
    let app = test_app().await;
    register_and_login(&app, "Anna", "anna@example.com", "a-long-password").await;

    // Duplicate email
    let (status, _) = send(
        &app,
        request(
            "POST",
            "/api/auth/register",
            None,
            Some(json!({
                "name": "Other",
                "email": "anna@example.com",
                "password": "a-long-password",
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    // Unknown email is 404, wrong password is 401
    let (status, _) = send(
        &app,
        request(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({ "email": "ghost@example.com", "password": "whatever-long" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        request(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({ "email": "anna@example.com", "password": "wrong-password" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Protected route without a token
    let (status, _) = send(&app, request("GET", "/api/orders/user", None, None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Admin route with a customer token
    let token = login(&app, "anna@example.com", "a-long-password").await;
    let (status, _) = send(&app, request("GET", "/api/orders/all", Some(&token), None)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn menu_listing_is_public_and_filtered() {
    let app = test_app().await;
    let admin = admin_token(&app).await;
    create_menu_item(&app, &admin, "Burger", 10.00).await;
    create_menu_item(&app, &admin, "Salad", 8.00).await;

    let (status, items) = send(&app, request("GET", "/api/menu/list", None, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(items.as_array().unwrap().len(), 2);

    let (status, items) = send(
        &app,
        request("GET", "/api/menu/list?search=burg", None, None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let items = items.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["name"], json!("Burger"));

    // Search matches descriptions too
    let (status, _) = send(
        &app,
        request(
            "POST",
            "/api/menu",
            Some(&admin),
            Some(json!({
                "name": "House Special",
                "description": "Slow-cooked brisket with smoked paprika",
                "price": 18.0,
                "category": "Main course"
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, items) = send(
        &app,
        request("GET", "/api/menu/list?search=brisket", None, None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let items = items.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["name"], json!("House Special"));

    // Duplicate name is a conflict
    let (status, _) = send(
        &app,
        request(
            "POST",
            "/api/menu",
            Some(&admin),
            Some(json!({ "name": "Burger", "price": 11.0, "category": "Main course" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    // Customers cannot manage the menu
    let token = register_and_login(&app, "Anna", "anna@example.com", "a-long-password").await;
    let (status, _) = send(
        &app,
        request(
            "POST",
            "/api/menu",
            Some(&token),
            Some(json!({ "name": "Cake", "price": 5.0, "category": "Desserts" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn reservation_slot_conflicts() {
    let app = test_app().await;
    let alice = register_and_login(&app, "Alice", "alice@example.com", "a-long-password").await;
    let bob = register_and_login(&app, "Bob", "bob@example.com", "a-long-password").await;

    let slot = json!({ "date": "2026-09-01", "time": "19:00", "number_of_guests": 4 });

    let (status, reservation) = send(
        &app,
        request("POST", "/api/reservations", Some(&alice), Some(slot.clone())),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(reservation["status"], json!("pending"));
    let reservation_id = reservation["id"].as_str().unwrap().to_string();

    // Same slot is taken
    let (status, _) = send(
        &app,
        request("POST", "/api/reservations", Some(&bob), Some(slot.clone())),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    // Cancelling frees the slot
    let admin = admin_token(&app).await;
    let (status, _) = send(
        &app,
        request(
            "PATCH",
            &format!("/api/reservations/update/{reservation_id}"),
            Some(&admin),
            Some(json!({ "status": "cancelled" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        &app,
        request("POST", "/api/reservations", Some(&bob), Some(slot)),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    // Guests outside 1..=20 is a validation failure
    let (status, _) = send(
        &app,
        request(
            "POST",
            "/api/reservations",
            Some(&alice),
            Some(json!({ "date": "2026-09-02", "time": "20:00", "number_of_guests": 0 })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn feedback_access_rules() {
    let app = test_app().await;
    let alice = register_and_login(&app, "Alice", "alice@example.com", "a-long-password").await;
    let bob = register_and_login(&app, "Bob", "bob@example.com", "a-long-password").await;
    let admin = admin_token(&app).await;

    let (status, feedback) = send(
        &app,
        request(
            "POST",
            "/api/feedback",
            Some(&alice),
            Some(json!({ "rating": 5, "comment": "Great burgers" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let feedback_id = feedback["id"].as_str().unwrap().to_string();

    // Rating outside 1..=5 is rejected
    let (status, _) = send(
        &app,
        request("POST", "/api/feedback", Some(&alice), Some(json!({ "rating": 6 }))),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Owner and admin can view, another customer cannot
    let (status, _) = send(
        &app,
        request("GET", &format!("/api/feedback/{feedback_id}"), Some(&alice), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        &app,
        request("GET", &format!("/api/feedback/{feedback_id}"), Some(&bob), None),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, all) = send(&app, request("GET", "/api/feedback", Some(&admin), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all.as_array().unwrap().len(), 1);

    // Customers cannot list all feedback
    let (status, _) = send(&app, request("GET", "/api/feedback", Some(&bob), None)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn health_and_unknown_routes() {
    let app = test_app().await;

    let (status, body) = send(&app, request("GET", "/api/health", None, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], json!("ok"));

    let (status, body) = send(&app, request("GET", "/nothing/here", None, None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], json!("Route not found"));
}

#[tokio::test]
async fn cors_is_permissive_outside_production_only() {
    fn cross_origin_health() -> Request<Body> {
        Request::builder()
            .method("GET")
            .uri("/api/health")
            .header(header::ORIGIN, "https://example.com")
            .body(Body::empty())
            .unwrap()
    }

    let app = test_app().await;
    let response = app.oneshot(cross_origin_health()).await.unwrap();
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .map(|v| v.to_str().unwrap()),
        Some("*")
    );

    let app = test_app_with_env("production").await;
    let response = app.oneshot(cross_origin_health()).await.unwrap();
    assert!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .is_none()
    );
}
