#![allow(dead_code)]

use chrono::{Duration, NaiveDate};
use ezelectronics::{
    dao::{
        product_dao::{self, NewProduct},
        user_dao,
    },
    dates::today,
    db::{create_pool, run_migrations},
    middleware::auth::AuthUser,
    models::{Category, Role},
    state::AppState,
};

/// A fresh in-memory database with the schema applied.
pub async fn setup_state() -> anyhow::Result<AppState> {
    setup_state_at("sqlite::memory:").await
}

pub async fn setup_state_at(database_url: &str) -> anyhow::Result<AppState> {
    let pool = create_pool(database_url).await?;
    run_migrations(&pool).await?;
    Ok(AppState::new(pool, "test-secret", 1))
}

pub fn as_user(username: &str, role: Role) -> AuthUser {
    AuthUser {
        username: username.to_string(),
        role,
    }
}

pub fn customer(username: &str) -> AuthUser {
    as_user(username, Role::Customer)
}

pub fn manager(username: &str) -> AuthUser {
    as_user(username, Role::Manager)
}

pub fn admin(username: &str) -> AuthUser {
    as_user(username, Role::Admin)
}

pub async fn seed_user(state: &AppState, username: &str, role: Role) -> anyhow::Result<AuthUser> {
    user_dao::create_user(&state.orm, username, "Test", "User", "secret", role)
        .await
        .map_err(|e| anyhow::anyhow!(e.to_string()))?;
    Ok(as_user(username, role))
}

pub fn days_ago(days: i64) -> NaiveDate {
    today() - Duration::days(days)
}

/// Insert a smartphone that arrived a month ago.
pub async fn seed_product(
    state: &AppState,
    model: &str,
    quantity: i32,
    selling_price: f64,
) -> anyhow::Result<()> {
    seed_product_in(state, model, Category::Smartphone, quantity, selling_price).await
}

pub async fn seed_product_in(
    state: &AppState,
    model: &str,
    category: Category,
    quantity: i32,
    selling_price: f64,
) -> anyhow::Result<()> {
    product_dao::create_product(
        &state.orm,
        NewProduct {
            model,
            category,
            quantity,
            details: None,
            selling_price,
            arrival_date: days_ago(30),
        },
    )
    .await
    .map_err(|e| anyhow::anyhow!(e.to_string()))
}
