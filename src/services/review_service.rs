use crate::{
    dao::{product_dao, review_dao},
    dates::today,
    dto::reviews::AddReviewRequest,
    error::AppResult,
    middleware::auth::{AuthUser, ensure_admin_or_manager, ensure_customer},
    models::ProductReview,
    response::{ApiResponse, Meta},
    state::AppState,
};

pub async fn add_review(
    state: &AppState,
    user: &AuthUser,
    model: &str,
    payload: AddReviewRequest,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_customer(user)?;
    payload.validate()?;

    let product = product_dao::get_product(&state.orm, model).await?;
    review_dao::create_review(
        &state.orm,
        &product.model,
        &user.username,
        payload.score,
        &payload.comment,
        today(),
    )
    .await?;

    tracing::info!(user = %user.username, model, score = payload.score, "review added");

    Ok(ApiResponse::success(
        "Review added",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

pub async fn get_product_reviews(
    state: &AppState,
    _user: &AuthUser,
    model: &str,
) -> AppResult<ApiResponse<Vec<ProductReview>>> {
    let reviews = review_dao::get_reviews_for_product(&state.orm, model).await?;
    Ok(ApiResponse::list("Reviews", reviews))
}

pub async fn delete_review(
    state: &AppState,
    user: &AuthUser,
    model: &str,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_customer(user)?;

    let product = product_dao::get_product(&state.orm, model).await?;
    review_dao::delete_user_review(&state.orm, &product.model, &user.username).await?;

    tracing::info!(user = %user.username, model, "review deleted");

    Ok(ApiResponse::success(
        "Deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

pub async fn delete_reviews_of_product(
    state: &AppState,
    user: &AuthUser,
    model: &str,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_admin_or_manager(user)?;

    let product = product_dao::get_product(&state.orm, model).await?;
    let deleted = review_dao::delete_reviews(&state.orm, &product.model).await?;

    tracing::info!(user = %user.username, model, deleted, "product reviews deleted");

    Ok(ApiResponse::success(
        "Deleted",
        serde_json::json!({ "deleted": deleted }),
        Some(Meta::empty()),
    ))
}

pub async fn delete_all_reviews(
    state: &AppState,
    user: &AuthUser,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_admin_or_manager(user)?;
    let deleted = review_dao::delete_all_reviews(&state.orm).await?;

    tracing::info!(user = %user.username, deleted, "all reviews deleted");

    Ok(ApiResponse::success(
        "Deleted",
        serde_json::json!({ "deleted": deleted }),
        Some(Meta::empty()),
    ))
}
