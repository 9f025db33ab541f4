use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    routing::{delete, get},
};

use crate::{
    dto::cart::AddToCartRequest,
    error::AppResult,
    middleware::auth::AuthUser,
    models::Cart,
    response::ApiResponse,
    services::cart_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(get_cart)
                .post(add_to_cart)
                .patch(checkout_cart)
                .delete(delete_all_carts),
        )
        .route("/history", get(cart_history))
        .route("/products/{model}", delete(remove_from_cart))
        .route("/current", delete(clear_cart))
        .route("/all", get(list_all_carts))
}

#[utoipa::path(
    get,
    path = "/ezelectronics/carts",
    responses(
        (status = 200, description = "Current cart, empty when none exists", body = ApiResponse<Cart>),
        (status = 401, description = "Not a customer")
    ),
    security(("bearer_auth" = [])),
    tag = "Carts"
)]
pub async fn get_cart(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<Cart>>> {
    let resp = cart_service::get_cart(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/ezelectronics/carts",
    request_body = AddToCartRequest,
    responses(
        (status = 200, description = "Added to cart", body = ApiResponse<serde_json::Value>),
        (status = 401, description = "Not a customer"),
        (status = 404, description = "Product not found"),
        (status = 409, description = "Product sold out"),
        (status = 422, description = "Invalid body")
    ),
    security(("bearer_auth" = [])),
    tag = "Carts"
)]
pub async fn add_to_cart(
    State(state): State<AppState>,
    user: AuthUser,
    payload: Result<Json<AddToCartRequest>, JsonRejection>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let Json(payload) = payload?;
    let resp = cart_service::add_to_cart(&state, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/ezelectronics/carts",
    responses(
        (status = 200, description = "Cart paid", body = ApiResponse<serde_json::Value>),
        (status = 400, description = "Cart is empty"),
        (status = 401, description = "Not a customer"),
        (status = 404, description = "No current cart"),
        (status = 409, description = "Not enough stock")
    ),
    security(("bearer_auth" = [])),
    tag = "Carts"
)]
pub async fn checkout_cart(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = cart_service::checkout_cart(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/ezelectronics/carts/history",
    responses(
        (status = 200, description = "Paid carts of the caller", body = ApiResponse<Vec<Cart>>),
        (status = 401, description = "Not a customer")
    ),
    security(("bearer_auth" = [])),
    tag = "Carts"
)]
pub async fn cart_history(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<Vec<Cart>>>> {
    let resp = cart_service::get_customer_carts(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/ezelectronics/carts/products/{model}",
    params(
        ("model" = String, Path, description = "Product model")
    ),
    responses(
        (status = 200, description = "One unit removed", body = ApiResponse<serde_json::Value>),
        (status = 400, description = "Cart is empty"),
        (status = 401, description = "Not a customer"),
        (status = 404, description = "Product, cart or line not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Carts"
)]
pub async fn remove_from_cart(
    State(state): State<AppState>,
    user: AuthUser,
    Path(model): Path<String>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = cart_service::remove_product_from_cart(&state, &user, &model).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/ezelectronics/carts/current",
    responses(
        (status = 200, description = "Cart emptied", body = ApiResponse<serde_json::Value>),
        (status = 401, description = "Not a customer"),
        (status = 404, description = "No current cart")
    ),
    security(("bearer_auth" = [])),
    tag = "Carts"
)]
pub async fn clear_cart(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = cart_service::clear_cart(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/ezelectronics/carts/all",
    responses(
        (status = 200, description = "Every cart, paid or not", body = ApiResponse<Vec<Cart>>),
        (status = 401, description = "Not an admin or manager")
    ),
    security(("bearer_auth" = [])),
    tag = "Carts"
)]
pub async fn list_all_carts(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<Vec<Cart>>>> {
    let resp = cart_service::get_all_carts(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/ezelectronics/carts",
    responses(
        (status = 200, description = "Deleted every cart", body = ApiResponse<serde_json::Value>),
        (status = 401, description = "Not an admin or manager")
    ),
    security(("bearer_auth" = [])),
    tag = "Carts"
)]
pub async fn delete_all_carts(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = cart_service::delete_all_carts(&state, &user).await?;
    Ok(Json(resp))
}
