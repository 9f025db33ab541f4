use sea_orm::TransactionTrait;

use crate::{
    dao::{cart_dao, product_dao},
    dates::today,
    dto::cart::AddToCartRequest,
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin_or_manager, ensure_customer},
    models::Cart,
    response::{ApiResponse, Meta},
    services::product_service::sell_units,
    state::AppState,
};

pub async fn get_cart(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<Cart>> {
    ensure_customer(user)?;
    let cart = cart_dao::get_current_cart(&state.orm, &user.username).await?;
    Ok(ApiResponse::success("OK", cart, None))
}

pub async fn add_to_cart(
    state: &AppState,
    user: &AuthUser,
    payload: AddToCartRequest,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_customer(user)?;
    payload.validate()?;

    let txn = state.orm.begin().await?;

    let product = product_dao::get_product(&txn, &payload.model).await?;
    if product.quantity < 1 {
        return Err(AppError::ProductSold);
    }
    cart_dao::add_to_cart(&txn, &user.username, &product).await?;

    txn.commit().await?;

    tracing::info!(user = %user.username, model = %product.model, price = product.selling_price, "cart_update");

    Ok(ApiResponse::success(
        "Added to cart",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

/// Pay the current cart: every line item is sold at today's date and the
/// cart is marked paid. Any failure rolls the whole checkout back.
pub async fn checkout_cart(
    state: &AppState,
    user: &AuthUser,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_customer(user)?;
    let payment_date = today();

    let txn = state.orm.begin().await?;

    let cart = cart_dao::find_current_cart(&txn, &user.username)
        .await?
        .ok_or(AppError::CartNotFound)?;
    let items = cart_dao::get_line_items(&txn, cart.id).await?;
    if items.is_empty() {
        return Err(AppError::EmptyCart);
    }

    for item in &items {
        sell_units(&txn, &item.model, item.quantity, Some(payment_date)).await?;
    }
    let total = cart.total;
    cart_dao::checkout_cart(&txn, cart, payment_date).await?;

    txn.commit().await?;

    tracing::info!(user = %user.username, total, items = items.len(), "checkout");

    Ok(ApiResponse::success(
        "Checkout success",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

pub async fn get_customer_carts(
    state: &AppState,
    user: &AuthUser,
) -> AppResult<ApiResponse<Vec<Cart>>> {
    ensure_customer(user)?;
    let carts = cart_dao::get_history_carts(&state.orm, &user.username).await?;
    Ok(ApiResponse::list("OK", carts))
}

pub async fn remove_product_from_cart(
    state: &AppState,
    user: &AuthUser,
    model: &str,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_customer(user)?;

    let txn = state.orm.begin().await?;

    product_dao::get_product(&txn, model).await?;
    let cart = cart_dao::find_current_cart(&txn, &user.username)
        .await?
        .ok_or(AppError::CartNotFound)?;
    if cart_dao::get_line_items(&txn, cart.id).await?.is_empty() {
        return Err(AppError::EmptyCart);
    }
    cart_dao::remove_from_cart(&txn, &cart, model).await?;

    txn.commit().await?;

    tracing::info!(user = %user.username, model, "cart_remove");

    Ok(ApiResponse::success(
        "Removed from cart",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

pub async fn clear_cart(
    state: &AppState,
    user: &AuthUser,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_customer(user)?;

    let txn = state.orm.begin().await?;

    let cart = cart_dao::find_current_cart(&txn, &user.username)
        .await?
        .ok_or(AppError::CartNotFound)?;
    cart_dao::clear_cart(&txn, &cart).await?;

    txn.commit().await?;

    tracing::info!(user = %user.username, "cart_clear");

    Ok(ApiResponse::success(
        "Cart cleared",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

pub async fn get_all_carts(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<Vec<Cart>>> {
    ensure_admin_or_manager(user)?;
    let carts = cart_dao::get_all_carts(&state.orm).await?;
    Ok(ApiResponse::list("OK", carts))
}

pub async fn delete_all_carts(
    state: &AppState,
    user: &AuthUser,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_admin_or_manager(user)?;
    let deleted = cart_dao::delete_all_carts(&state.orm).await?;

    tracing::info!(user = %user.username, deleted, "all carts deleted");

    Ok(ApiResponse::success(
        "Deleted",
        serde_json::json!({ "deleted": deleted }),
        Some(Meta::empty()),
    ))
}
