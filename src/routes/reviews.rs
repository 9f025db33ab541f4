use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    routing::{delete, post},
};

use crate::{
    dto::reviews::AddReviewRequest,
    error::AppResult,
    middleware::auth::AuthUser,
    models::ProductReview,
    response::ApiResponse,
    services::review_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", delete(delete_all_reviews))
        .route(
            "/{model}",
            post(add_review)
                .get(list_reviews)
                .delete(delete_review),
        )
        .route("/{model}/all", delete(delete_reviews_of_product))
}

#[utoipa::path(
    post,
    path = "/ezelectronics/reviews/{model}",
    params(
        ("model" = String, Path, description = "Product model")
    ),
    request_body = AddReviewRequest,
    responses(
        (status = 200, description = "Review added", body = ApiResponse<serde_json::Value>),
        (status = 401, description = "Not a customer"),
        (status = 404, description = "Product not found"),
        (status = 409, description = "Already reviewed"),
        (status = 422, description = "Invalid body")
    ),
    security(("bearer_auth" = [])),
    tag = "Reviews"
)]
pub async fn add_review(
    State(state): State<AppState>,
    user: AuthUser,
    Path(model): Path<String>,
    payload: Result<Json<AddReviewRequest>, JsonRejection>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let Json(payload) = payload?;
    let resp = review_service::add_review(&state, &user, &model, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/ezelectronics/reviews/{model}",
    params(
        ("model" = String, Path, description = "Product model")
    ),
    responses(
        (status = 200, description = "Reviews of the product", body = ApiResponse<Vec<ProductReview>>),
        (status = 401, description = "Unauthenticated")
    ),
    security(("bearer_auth" = [])),
    tag = "Reviews"
)]
pub async fn list_reviews(
    State(state): State<AppState>,
    user: AuthUser,
    Path(model): Path<String>,
) -> AppResult<Json<ApiResponse<Vec<ProductReview>>>> {
    let resp = review_service::get_product_reviews(&state, &user, &model).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/ezelectronics/reviews/{model}",
    params(
        ("model" = String, Path, description = "Product model")
    ),
    responses(
        (status = 200, description = "Own review deleted", body = ApiResponse<serde_json::Value>),
        (status = 401, description = "Not a customer"),
        (status = 404, description = "Product or review not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Reviews"
)]
pub async fn delete_review(
    State(state): State<AppState>,
    user: AuthUser,
    Path(model): Path<String>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = review_service::delete_review(&state, &user, &model).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/ezelectronics/reviews/{model}/all",
    params(
        ("model" = String, Path, description = "Product model")
    ),
    responses(
        (status = 200, description = "Every review of the product deleted", body = ApiResponse<serde_json::Value>),
        (status = 401, description = "Not an admin or manager"),
        (status = 404, description = "Product not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Reviews"
)]
pub async fn delete_reviews_of_product(
    State(state): State<AppState>,
    user: AuthUser,
    Path(model): Path<String>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = review_service::delete_reviews_of_product(&state, &user, &model).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/ezelectronics/reviews",
    responses(
        (status = 200, description = "Every review deleted", body = ApiResponse<serde_json::Value>),
        (status = 401, description = "Not an admin or manager")
    ),
    security(("bearer_auth" = [])),
    tag = "Reviews"
)]
pub async fn delete_all_reviews(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = review_service::delete_all_reviews(&state, &user).await?;
    Ok(Json(resp))
}
