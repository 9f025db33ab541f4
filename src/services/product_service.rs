use chrono::NaiveDate;
use sea_orm::ConnectionTrait;

use crate::{
    dao::product_dao::{self, NewProduct, ProductFilter, QuantityChange},
    dates::today,
    dto::products::{
        ChangeQuantityRequest, CreateProductRequest, ProductQuery, QuantityResponse,
        SellProductRequest,
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin_or_manager},
    models::Product,
    response::{ApiResponse, Meta},
    state::AppState,
};

pub async fn register_products(
    state: &AppState,
    user: &AuthUser,
    payload: CreateProductRequest,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_admin_or_manager(user)?;
    let (category, arrival_date) = payload.validate()?;

    let today = today();
    let arrival_date = match arrival_date {
        Some(date) if date > today => return Err(AppError::DateError),
        Some(date) => date,
        None => today,
    };

    product_dao::create_product(
        &state.orm,
        NewProduct {
            model: &payload.model,
            category,
            quantity: payload.quantity,
            details: payload.details.as_deref(),
            selling_price: payload.selling_price,
            arrival_date,
        },
    )
    .await?;

    tracing::info!(user = %user.username, model = %payload.model, "product registered");

    Ok(ApiResponse::success(
        "Product created",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

pub async fn change_product_quantity(
    state: &AppState,
    user: &AuthUser,
    model: &str,
    payload: ChangeQuantityRequest,
) -> AppResult<ApiResponse<QuantityResponse>> {
    ensure_admin_or_manager(user)?;
    let change_date = payload.validate()?;

    let product = product_dao::get_product(&state.orm, model).await?;
    check_date(change_date, product.arrival_date)?;

    let quantity =
        product_dao::update_quantity(&state.orm, model, payload.quantity, QuantityChange::Add)
            .await?;

    tracing::info!(user = %user.username, model, added = payload.quantity, quantity, "product restocked");

    Ok(ApiResponse::success(
        "Quantity updated",
        QuantityResponse { quantity },
        Some(Meta::empty()),
    ))
}

pub async fn sell_product(
    state: &AppState,
    user: &AuthUser,
    model: &str,
    payload: SellProductRequest,
) -> AppResult<ApiResponse<QuantityResponse>> {
    ensure_admin_or_manager(user)?;
    let selling_date = payload.validate()?;

    let quantity = sell_units(&state.orm, model, payload.quantity, selling_date).await?;

    tracing::info!(user = %user.username, model, sold = payload.quantity, quantity, "product sold");

    Ok(ApiResponse::success(
        "Product sold",
        QuantityResponse { quantity },
        Some(Meta::empty()),
    ))
}

/// Re-validate stock and the sale date against the stored product, then take
/// `quantity` units out of stock. Returns the stock left.
pub(crate) async fn sell_units<C: ConnectionTrait>(
    db: &C,
    model: &str,
    quantity: i32,
    selling_date: Option<NaiveDate>,
) -> AppResult<i32> {
    let product = product_dao::get_product(db, model).await?;
    if product.quantity == 0 {
        return Err(AppError::EmptyProductStock);
    }
    if product.quantity < quantity {
        return Err(AppError::LowProductStock);
    }
    check_date(selling_date, product.arrival_date)?;

    product_dao::update_quantity(db, model, quantity, QuantityChange::Subtract).await
}

/// A stock movement cannot be dated in the future or before the product arrived.
fn check_date(date: Option<NaiveDate>, arrival_date: NaiveDate) -> AppResult<()> {
    if let Some(date) = date {
        if date > today() || date < arrival_date {
            return Err(AppError::DateError);
        }
    }
    Ok(())
}

pub async fn get_products(
    state: &AppState,
    user: &AuthUser,
    query: ProductQuery,
) -> AppResult<ApiResponse<Vec<Product>>> {
    ensure_admin_or_manager(user)?;
    let filter = query.validate()?;

    let products = product_dao::get_products(&state.orm, &filter).await?;
    if matches!(filter, ProductFilter::Model(_)) && products.is_empty() {
        return Err(AppError::ProductNotFound);
    }

    Ok(ApiResponse::list("Products", products))
}

pub async fn get_available_products(
    state: &AppState,
    _user: &AuthUser,
    query: ProductQuery,
) -> AppResult<ApiResponse<Vec<Product>>> {
    let filter = query.validate()?;

    if let ProductFilter::Model(model) = &filter {
        product_dao::get_product(&state.orm, model).await?;
    }
    let products = product_dao::get_available_products(&state.orm, &filter).await?;

    Ok(ApiResponse::list("Available products", products))
}

pub async fn delete_product(
    state: &AppState,
    user: &AuthUser,
    model: &str,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_admin_or_manager(user)?;
    product_dao::delete_product(&state.orm, model).await?;

    tracing::info!(user = %user.username, model, "product deleted");

    Ok(ApiResponse::success(
        "Deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

pub async fn delete_all_products(
    state: &AppState,
    user: &AuthUser,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_admin_or_manager(user)?;
    let deleted = product_dao::delete_all(&state.orm).await?;

    tracing::info!(user = %user.username, deleted, "all products deleted");

    Ok(ApiResponse::success(
        "Deleted",
        serde_json::json!({ "deleted": deleted }),
        Some(Meta::empty()),
    ))
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    #[test]
    fn stock_dates_must_fall_between_arrival_and_today() {
        let arrival = today() - Duration::days(10);
        assert!(check_date(None, arrival).is_ok());
        assert!(check_date(Some(arrival), arrival).is_ok());
        assert!(check_date(Some(today()), arrival).is_ok());
        assert!(check_date(Some(arrival - Duration::days(1)), arrival).is_err());
        assert!(check_date(Some(today() + Duration::days(1)), arrival).is_err());
    }
}
