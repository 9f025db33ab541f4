mod common;

use chrono::Duration;
use common::{customer, days_ago, manager, seed_product, seed_product_in, setup_state};
use ezelectronics::{
    dates::today,
    dto::products::{ChangeQuantityRequest, CreateProductRequest, ProductQuery, SellProductRequest},
    error::AppError,
    models::Category,
    services::product_service,
};

fn new_product(model: &str, arrival_date: Option<String>) -> CreateProductRequest {
    CreateProductRequest {
        model: model.to_string(),
        category: "Laptop".to_string(),
        quantity: 4,
        details: Some("14 inch".to_string()),
        selling_price: 1200.0,
        arrival_date,
    }
}

fn sell(quantity: i32, selling_date: Option<String>) -> SellProductRequest {
    SellProductRequest {
        quantity,
        selling_date,
    }
}

fn query(grouping: Option<&str>, category: Option<&str>, model: Option<&str>) -> ProductQuery {
    ProductQuery {
        grouping: grouping.map(str::to_string),
        category: category.map(str::to_string),
        model: model.map(str::to_string),
    }
}

#[tokio::test]
async fn register_and_list_products() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let boss = manager("boss");

    product_service::register_products(&state, &boss, new_product("XPS", None)).await?;

    let listed = product_service::get_products(&state, &boss, query(None, None, None))
        .await?
        .data
        .expect("products");
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].model, "XPS");
    assert_eq!(listed[0].category, Category::Laptop);
    assert_eq!(listed[0].arrival_date, today());

    let err = product_service::register_products(&state, &boss, new_product("XPS", None))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::ProductAlreadyExists));

    let tomorrow = (today() + Duration::days(1)).format("%Y-%m-%d").to_string();
    let err = product_service::register_products(&state, &boss, new_product("Z", Some(tomorrow)))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::DateError));

    let mut bad = new_product("Bad", None);
    bad.category = "Tablet".to_string();
    let err = product_service::register_products(&state, &boss, bad)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let err = product_service::register_products(&state, &customer("c"), new_product("C", None))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::RoleRequired(_)));

    Ok(())
}

#[tokio::test]
async fn selling_and_restocking() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let boss = manager("boss");
    seed_product(&state, "X", 10, 100.0).await?;

    let left = product_service::sell_product(&state, &boss, "X", sell(3, None))
        .await?
        .data
        .expect("quantity");
    assert_eq!(left.quantity, 7);

    let err = product_service::sell_product(&state, &boss, "X", sell(8, None))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::LowProductStock));

    let before_arrival = days_ago(31).format("%Y-%m-%d").to_string();
    let err = product_service::sell_product(&state, &boss, "X", sell(1, Some(before_arrival)))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::DateError));

    product_service::sell_product(&state, &boss, "X", sell(7, None)).await?;
    let err = product_service::sell_product(&state, &boss, "X", sell(1, None))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::EmptyProductStock));

    let restocked = product_service::change_product_quantity(
        &state,
        &boss,
        "X",
        ChangeQuantityRequest {
            quantity: 5,
            change_date: Some(days_ago(1).format("%Y-%m-%d").to_string()),
        },
    )
    .await?
    .data
    .expect("quantity");
    assert_eq!(restocked.quantity, 5);

    let err = product_service::sell_product(&state, &boss, "Nope", sell(1, None))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::ProductNotFound));

    Ok(())
}

#[tokio::test]
async fn listing_filters() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let boss = manager("boss");
    let buyer = customer("buyer");
    seed_product_in(&state, "Phone", Category::Smartphone, 3, 500.0).await?;
    seed_product_in(&state, "Fridge", Category::Appliance, 0, 900.0).await?;
    seed_product_in(&state, "Oven", Category::Appliance, 2, 400.0).await?;

    let appliances = product_service::get_products(
        &state,
        &boss,
        query(Some("category"), Some("Appliance"), None),
    )
    .await?
    .data
    .expect("products");
    let models: Vec<_> = appliances.iter().map(|p| p.model.as_str()).collect();
    assert_eq!(models, ["Fridge", "Oven"]);

    let available = product_service::get_available_products(
        &state,
        &buyer,
        query(Some("category"), Some("Appliance"), None),
    )
    .await?
    .data
    .expect("products");
    assert_eq!(available.len(), 1);
    assert_eq!(available[0].model, "Oven");

    // A sold out model exists, so it is an empty list rather than a 404.
    let fridge = product_service::get_available_products(
        &state,
        &buyer,
        query(Some("model"), None, Some("Fridge")),
    )
    .await?
    .data
    .expect("products");
    assert!(fridge.is_empty());

    let err = product_service::get_available_products(
        &state,
        &buyer,
        query(Some("model"), None, Some("Toaster")),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::ProductNotFound));

    let err = product_service::get_products(&state, &boss, query(Some("model"), None, Some("Toaster")))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::ProductNotFound));

    let err = product_service::get_products(&state, &boss, query(Some("model"), Some("Appliance"), None))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let err = product_service::get_products(&state, &buyer, query(None, None, None))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::RoleRequired(_)));

    Ok(())
}

#[tokio::test]
async fn deleting_products() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let boss = manager("boss");
    seed_product(&state, "A", 1, 1.0).await?;
    seed_product(&state, "B", 1, 1.0).await?;

    product_service::delete_product(&state, &boss, "A").await?;
    let err = product_service::delete_product(&state, &boss, "A")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::ProductNotFound));

    product_service::delete_all_products(&state, &boss).await?;
    let listed = product_service::get_products(&state, &boss, query(None, None, None))
        .await?
        .data
        .expect("products");
    assert!(listed.is_empty());

    Ok(())
}
