use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    routing::{get, patch},
};

use crate::{
    dto::products::{
        ChangeQuantityRequest, CreateProductRequest, ProductQuery, QuantityResponse,
        SellProductRequest,
    },
    error::AppResult,
    middleware::auth::AuthUser,
    models::Product,
    response::ApiResponse,
    services::product_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(list_products)
                .post(create_product)
                .delete(delete_all_products),
        )
        .route("/available", get(list_available_products))
        .route("/{model}", patch(change_quantity).delete(delete_product))
        .route("/{model}/sell", patch(sell_product))
}

#[utoipa::path(
    post,
    path = "/ezelectronics/products",
    request_body = CreateProductRequest,
    responses(
        (status = 200, description = "Product registered", body = ApiResponse<serde_json::Value>),
        (status = 400, description = "Arrival date in the future"),
        (status = 401, description = "Not an admin or manager"),
        (status = 409, description = "Model already exists"),
        (status = 422, description = "Invalid body")
    ),
    security(("bearer_auth" = [])),
    tag = "Products"
)]
pub async fn create_product(
    State(state): State<AppState>,
    user: AuthUser,
    payload: Result<Json<CreateProductRequest>, JsonRejection>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let Json(payload) = payload?;
    let resp = product_service::register_products(&state, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/ezelectronics/products",
    params(ProductQuery),
    responses(
        (status = 200, description = "List products", body = ApiResponse<Vec<Product>>),
        (status = 401, description = "Not an admin or manager"),
        (status = 404, description = "Model not found"),
        (status = 422, description = "Invalid grouping")
    ),
    security(("bearer_auth" = [])),
    tag = "Products"
)]
pub async fn list_products(
    State(state): State<AppState>,
    user: AuthUser,
    query: Result<Query<ProductQuery>, QueryRejection>,
) -> AppResult<Json<ApiResponse<Vec<Product>>>> {
    let Query(query) = query?;
    let resp = product_service::get_products(&state, &user, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/ezelectronics/products/available",
    params(ProductQuery),
    responses(
        (status = 200, description = "List products in stock", body = ApiResponse<Vec<Product>>),
        (status = 401, description = "Unauthenticated"),
        (status = 404, description = "Model not found"),
        (status = 422, description = "Invalid grouping")
    ),
    security(("bearer_auth" = [])),
    tag = "Products"
)]
pub async fn list_available_products(
    State(state): State<AppState>,
    user: AuthUser,
    query: Result<Query<ProductQuery>, QueryRejection>,
) -> AppResult<Json<ApiResponse<Vec<Product>>>> {
    let Query(query) = query?;
    let resp = product_service::get_available_products(&state, &user, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/ezelectronics/products/{model}",
    params(
        ("model" = String, Path, description = "Product model")
    ),
    request_body = ChangeQuantityRequest,
    responses(
        (status = 200, description = "New stock level", body = ApiResponse<QuantityResponse>),
        (status = 400, description = "Invalid change date"),
        (status = 401, description = "Not an admin or manager"),
        (status = 404, description = "Product not found"),
        (status = 422, description = "Invalid body")
    ),
    security(("bearer_auth" = [])),
    tag = "Products"
)]
pub async fn change_quantity(
    State(state): State<AppState>,
    user: AuthUser,
    Path(model): Path<String>,
    payload: Result<Json<ChangeQuantityRequest>, JsonRejection>,
) -> AppResult<Json<ApiResponse<QuantityResponse>>> {
    let Json(payload) = payload?;
    let resp = product_service::change_product_quantity(&state, &user, &model, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/ezelectronics/products/{model}/sell",
    params(
        ("model" = String, Path, description = "Product model")
    ),
    request_body = SellProductRequest,
    responses(
        (status = 200, description = "Stock left after the sale", body = ApiResponse<QuantityResponse>),
        (status = 400, description = "Invalid selling date"),
        (status = 401, description = "Not an admin or manager"),
        (status = 404, description = "Product not found"),
        (status = 409, description = "Not enough stock"),
        (status = 422, description = "Invalid body")
    ),
    security(("bearer_auth" = [])),
    tag = "Products"
)]
pub async fn sell_product(
    State(state): State<AppState>,
    user: AuthUser,
    Path(model): Path<String>,
    payload: Result<Json<SellProductRequest>, JsonRejection>,
) -> AppResult<Json<ApiResponse<QuantityResponse>>> {
    let Json(payload) = payload?;
    let resp = product_service::sell_product(&state, &user, &model, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/ezelectronics/products/{model}",
    params(
        ("model" = String, Path, description = "Product model")
    ),
    responses(
        (status = 200, description = "Deleted", body = ApiResponse<serde_json::Value>),
        (status = 401, description = "Not an admin or manager"),
        (status = 404, description = "Product not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Products"
)]
pub async fn delete_product(
    State(state): State<AppState>,
    user: AuthUser,
    Path(model): Path<String>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = product_service::delete_product(&state, &user, &model).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/ezelectronics/products",
    responses(
        (status = 200, description = "Deleted every product", body = ApiResponse<serde_json::Value>),
        (status = 401, description = "Not an admin or manager")
    ),
    security(("bearer_auth" = [])),
    tag = "Products"
)]
pub async fn delete_all_products(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = product_service::delete_all_products(&state, &user).await?;
    Ok(Json(resp))
}
