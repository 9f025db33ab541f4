use axum::{
    Json, Router,
    extract::OriginalUri,
    http::StatusCode,
    routing::get,
};

use crate::{error::ErrorBody, state::AppState};

pub mod auth;
pub mod cart;
pub mod doc;
pub mod health;
pub mod products;
pub mod reviews;
pub mod users;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/sessions", auth::router())
        .nest("/users", users::router())
        .nest("/products", products::router())
        .nest("/carts", cart::router())
        .nest("/reviews", reviews::router())
}

/// The whole application: health check, API under `/ezelectronics`, docs and
/// a JSON 404 for anything else. Server-wide layers are added by the binary.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .nest("/ezelectronics", create_api_router())
        .merge(doc::scalar_docs())
        .fallback(not_found)
        .with_state(state)
}

async fn not_found(OriginalUri(uri): OriginalUri) -> (StatusCode, Json<ErrorBody>) {
    let body = ErrorBody {
        error: format!("No route for {}", uri.path()),
        status: StatusCode::NOT_FOUND.as_u16(),
    };
    (StatusCode::NOT_FOUND, Json(body))
}
