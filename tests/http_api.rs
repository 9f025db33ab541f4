mod common;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode, header},
};
use common::setup_state;
use ezelectronics::routes::create_router;
use serde_json::{Value, json};
use tower::ServiceExt;

async fn app() -> anyhow::Result<Router> {
    Ok(create_router(setup_state().await?))
}

async fn read(response: axum::response::Response) -> anyhow::Result<(StatusCode, Value)> {
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)?
    };
    Ok((status, body))
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> anyhow::Result<(StatusCode, Value)> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, token);
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))?,
        None => builder.body(Body::empty())?,
    };
    read(app.clone().oneshot(request).await?).await
}

/// Register through the API and return the bearer token from the login.
async fn sign_up(app: &Router, username: &str, role: &str) -> anyhow::Result<String> {
    let (status, _) = send(
        app,
        Method::POST,
        "/ezelectronics/users",
        None,
        Some(json!({
            "username": username,
            "name": "Test",
            "surname": "User",
            "password": "pw",
            "role": role,
        })),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        app,
        Method::POST,
        "/ezelectronics/sessions",
        None,
        Some(json!({ "username": username, "password": "pw" })),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    let token = body["data"]["token"]
        .as_str()
        .ok_or_else(|| anyhow::anyhow!("login returned no token"))?;
    Ok(token.to_string())
}

#[tokio::test]
async fn sessions_and_bearer_errors() -> anyhow::Result<()> {
    let app = app().await?;
    let token = sign_up(&app, "ann", "Customer").await?;

    let (status, body) = send(&app, Method::GET, "/ezelectronics/sessions/current", Some(&token), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["username"], "ann");
    assert_eq!(body["data"]["role"], "Customer");

    let (status, body) = send(&app, Method::GET, "/ezelectronics/carts", None, None).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({ "error": "Unauthenticated user", "status": 401 }));

    let (status, body) = send(&app, Method::GET, "/ezelectronics/carts", Some("Bearer garbage"), None).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["status"], 401);

    let (status, body) = send(
        &app,
        Method::POST,
        "/ezelectronics/sessions",
        None,
        Some(json!({ "username": "ann", "password": "wrong" })),
    )
    .await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Incorrect username and/or password");

    let (status, _) = send(&app, Method::DELETE, "/ezelectronics/sessions/current", Some(&token), None).await?;
    assert_eq!(status, StatusCode::OK);

    Ok(())
}

#[tokio::test]
async fn malformed_requests_are_unprocessable() -> anyhow::Result<()> {
    let app = app().await?;
    let manager = sign_up(&app, "max", "Manager").await?;

    let request = Request::builder()
        .method(Method::POST)
        .uri("/ezelectronics/users")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"username\": "))?;
    let (status, body) = read(app.clone().oneshot(request).await?).await?;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["status"], 422);
    assert!(body["error"].is_string());

    let (status, body) = send(
        &app,
        Method::POST,
        "/ezelectronics/products",
        Some(&manager),
        Some(json!({ "model": "X", "category": "Tablet", "quantity": 1, "sellingPrice": 10.0 })),
    )
    .await?;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["status"], 422);

    let (status, _) = send(
        &app,
        Method::GET,
        "/ezelectronics/products?grouping=model&category=Laptop",
        Some(&manager),
        None,
    )
    .await?;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    Ok(())
}

#[tokio::test]
async fn unknown_routes_get_a_json_404() -> anyhow::Result<()> {
    let app = app().await?;

    let (status, body) = send(&app, Method::GET, "/ezelectronics/nowhere", None, None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], 404);
    assert_eq!(body["error"], "No route for /ezelectronics/nowhere");

    let (status, body) = send(&app, Method::GET, "/health", None, None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["database"], "ok");

    Ok(())
}

#[tokio::test]
async fn cart_and_product_routes() -> anyhow::Result<()> {
    let app = app().await?;
    let manager = sign_up(&app, "max", "Manager").await?;
    let customer = sign_up(&app, "ann", "Customer").await?;

    let (status, _) = send(
        &app,
        Method::POST,
        "/ezelectronics/products",
        Some(&manager),
        Some(json!({ "model": "X", "category": "Smartphone", "quantity": 10, "sellingPrice": 100.0 })),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);

    for _ in 0..2 {
        let (status, _) = send(
            &app,
            Method::POST,
            "/ezelectronics/carts",
            Some(&customer),
            Some(json!({ "model": "X" })),
        )
        .await?;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, body) = send(&app, Method::GET, "/ezelectronics/carts", Some(&customer), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total"], 200.0);
    assert_eq!(body["data"]["products"][0]["quantity"], 2);

    let (status, body) = send(&app, Method::GET, "/ezelectronics/carts", Some(&manager), None).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "User is not a customer");

    let (status, _) = send(&app, Method::PATCH, "/ezelectronics/carts", Some(&customer), None).await?;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, Method::GET, "/ezelectronics/carts/history", Some(&customer), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"]["total"], 1);
    assert_eq!(body["data"][0]["paid"], true);

    let (status, body) = send(
        &app,
        Method::DELETE,
        "/ezelectronics/carts/products/X",
        Some(&customer),
        None,
    )
    .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Cart not found", "status": 404 }));

    let (status, body) = send(&app, Method::GET, "/ezelectronics/carts/all", Some(&manager), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"]["total"], 1);

    let (status, body) = send(&app, Method::GET, "/ezelectronics/carts/all", Some(&customer), None).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "User is not an admin or manager");

    let (status, body) = send(
        &app,
        Method::GET,
        "/ezelectronics/products/available?grouping=model&model=X",
        Some(&customer),
        None,
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["quantity"], 8);

    let (status, body) = send(
        &app,
        Method::PATCH,
        "/ezelectronics/products/X/sell",
        Some(&manager),
        Some(json!({ "quantity": 9 })),
    )
    .await?;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["status"], 409);

    let (status, body) = send(
        &app,
        Method::PATCH,
        "/ezelectronics/products/X",
        Some(&manager),
        Some(json!({ "quantity": 2 })),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["quantity"], 10);

    let (status, _) = send(&app, Method::DELETE, "/ezelectronics/carts", Some(&manager), None).await?;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, Method::DELETE, "/ezelectronics/products/X", Some(&manager), None).await?;
    assert_eq!(status, StatusCode::OK);
    let (status, body) = send(&app, Method::DELETE, "/ezelectronics/products/X", Some(&manager), None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Product not found");

    Ok(())
}

#[tokio::test]
async fn review_and_user_routes() -> anyhow::Result<()> {
    let app = app().await?;
    let admin = sign_up(&app, "root", "Admin").await?;
    let manager = sign_up(&app, "max", "Manager").await?;
    let customer = sign_up(&app, "ann", "Customer").await?;

    let (status, _) = send(
        &app,
        Method::POST,
        "/ezelectronics/products",
        Some(&manager),
        Some(json!({ "model": "X", "category": "Laptop", "quantity": 1, "sellingPrice": 10.5 })),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);

    let review = json!({ "score": 4, "comment": "Solid" });
    let (status, _) = send(&app, Method::POST, "/ezelectronics/reviews/X", Some(&customer), Some(review.clone())).await?;
    assert_eq!(status, StatusCode::OK);
    let (status, body) = send(&app, Method::POST, "/ezelectronics/reviews/X", Some(&customer), Some(review)).await?;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "You have already reviewed this product");

    let (status, body) = send(&app, Method::GET, "/ezelectronics/reviews/X", Some(&manager), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["user"], "ann");

    let (status, _) = send(&app, Method::DELETE, "/ezelectronics/reviews/X/all", Some(&customer), None).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let (status, _) = send(&app, Method::DELETE, "/ezelectronics/reviews", Some(&manager), None).await?;
    assert_eq!(status, StatusCode::OK);
    let (_, body) = send(&app, Method::GET, "/ezelectronics/reviews/X", Some(&manager), None).await?;
    assert_eq!(body["meta"]["total"], 0);

    let (status, body) = send(&app, Method::GET, "/ezelectronics/users/roles/Manager", Some(&admin), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["username"], "max");

    let (status, body) = send(&app, Method::GET, "/ezelectronics/users/max", Some(&customer), None).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["status"], 401);

    let (status, body) = send(
        &app,
        Method::PATCH,
        "/ezelectronics/users/ann",
        Some(&customer),
        Some(json!({ "name": "Ann", "surname": "Lee", "address": "Main St 1", "birthdate": "1990-01-02" })),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["birthdate"], "1990-01-02");

    let (status, _) = send(&app, Method::DELETE, "/ezelectronics/users/ann", Some(&customer), None).await?;
    assert_eq!(status, StatusCode::OK);

    // The deleted customer's token no longer authenticates.
    let (status, body) = send(
        &app,
        Method::POST,
        "/ezelectronics/carts",
        Some(&customer),
        Some(json!({ "model": "X" })),
    )
    .await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Unauthenticated user");

    let (status, _) = send(&app, Method::DELETE, "/ezelectronics/users", Some(&admin), None).await?;
    assert_eq!(status, StatusCode::OK);
    let (_, body) = send(&app, Method::GET, "/ezelectronics/users", Some(&admin), None).await?;
    assert_eq!(body["meta"]["total"], 1);

    Ok(())
}
