use chrono::NaiveDate;
use ezelectronics::{
    config::database_url_from_env,
    dao::{
        product_dao::{self, NewProduct},
        user_dao,
    },
    db::{create_orm_conn, create_pool, run_migrations},
    error::AppError,
    models::{Category, Role},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let pool = create_pool(&database_url_from_env()).await?;
    // Ensure migrations are applied.
    run_migrations(&pool).await?;
    let orm = create_orm_conn(&pool);

    for (username, role) in [
        ("admin", Role::Admin),
        ("manager", Role::Manager),
        ("customer", Role::Customer),
    ] {
        match user_dao::create_user(&orm, username, username, "Seed", "password", role).await {
            Ok(()) => println!("Created user {username} (role={role})"),
            Err(AppError::UserAlreadyExists) => println!("User {username} already exists"),
            Err(e) => return Err(anyhow::anyhow!(e.to_string())),
        }
    }

    let products = [
        ("iPhone 13", Category::Smartphone, 20, "Apple smartphone", 899.0),
        ("Pixel 8", Category::Smartphone, 15, "Google smartphone", 699.0),
        ("ThinkPad X1", Category::Laptop, 8, "Business laptop", 1599.0),
        ("Bosch Serie 6", Category::Appliance, 5, "Washing machine", 749.0),
    ];
    let arrival_date = NaiveDate::from_ymd_opt(2024, 1, 15)
        .ok_or_else(|| anyhow::anyhow!("invalid seed date"))?;

    for (model, category, quantity, details, selling_price) in products {
        let result = product_dao::create_product(
            &orm,
            NewProduct {
                model,
                category,
                quantity,
                details: Some(details),
                selling_price,
                arrival_date,
            },
        )
        .await;
        match result {
            Ok(()) => {}
            Err(AppError::ProductAlreadyExists) => println!("Product {model} already exists"),
            Err(e) => return Err(anyhow::anyhow!(e.to_string())),
        }
    }

    println!("Seed completed");
    Ok(())
}
