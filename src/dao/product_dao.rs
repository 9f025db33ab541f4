use chrono::NaiveDate;
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, Condition, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::{
    dao::is_unique_violation,
    entity::products::{ActiveModel, Column, Entity as Products, Model as ProductModel},
    error::{AppError, AppResult},
    models::{Category, Product},
};

/// Which slice of the catalog a listing returns.
#[derive(Debug, Clone, PartialEq)]
pub enum ProductFilter {
    All,
    Category(Category),
    Model(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityChange {
    Add,
    Subtract,
}

pub struct NewProduct<'a> {
    pub model: &'a str,
    pub category: Category,
    pub quantity: i32,
    pub details: Option<&'a str>,
    pub selling_price: f64,
    pub arrival_date: NaiveDate,
}

pub async fn create_product<C: ConnectionTrait>(db: &C, product: NewProduct<'_>) -> AppResult<()> {
    if Products::find_by_id(product.model).one(db).await?.is_some() {
        return Err(AppError::ProductAlreadyExists);
    }

    let active = ActiveModel {
        model: Set(product.model.to_string()),
        category: Set(product.category.as_str().to_string()),
        quantity: Set(product.quantity),
        details: Set(product.details.map(str::to_string)),
        selling_price: Set(product.selling_price),
        arrival_date: Set(product.arrival_date),
    };
    match Products::insert(active).exec_without_returning(db).await {
        Ok(_) => Ok(()),
        Err(err) if is_unique_violation(&err) => Err(AppError::ProductAlreadyExists),
        Err(err) => Err(err.into()),
    }
}

pub async fn find_product<C: ConnectionTrait>(db: &C, model: &str) -> AppResult<Option<Product>> {
    Products::find_by_id(model)
        .one(db)
        .await?
        .map(product_from_entity)
        .transpose()
}

pub async fn get_product<C: ConnectionTrait>(db: &C, model: &str) -> AppResult<Product> {
    find_product(db, model).await?.ok_or(AppError::ProductNotFound)
}

/// Apply `quantity = quantity ± amount` in one statement and return the
/// quantity read back afterwards.
pub async fn update_quantity<C: ConnectionTrait>(
    db: &C,
    model: &str,
    amount: i32,
    change: QuantityChange,
) -> AppResult<i32> {
    let expr = match change {
        QuantityChange::Add => Expr::col(Column::Quantity).add(amount),
        QuantityChange::Subtract => Expr::col(Column::Quantity).sub(amount),
    };
    let result = Products::update_many()
        .col_expr(Column::Quantity, expr)
        .filter(Column::Model.eq(model))
        .exec(db)
        .await?;
    if result.rows_affected == 0 {
        return Err(AppError::ProductNotFound);
    }

    let product = get_product(db, model).await?;
    Ok(product.quantity)
}

pub async fn get_products<C: ConnectionTrait>(
    db: &C,
    filter: &ProductFilter,
) -> AppResult<Vec<Product>> {
    list(db, filter, false).await
}

/// Same as [`get_products`] restricted to products with stock left.
pub async fn get_available_products<C: ConnectionTrait>(
    db: &C,
    filter: &ProductFilter,
) -> AppResult<Vec<Product>> {
    list(db, filter, true).await
}

async fn list<C: ConnectionTrait>(
    db: &C,
    filter: &ProductFilter,
    only_available: bool,
) -> AppResult<Vec<Product>> {
    let mut condition = Condition::all();
    match filter {
        ProductFilter::All => {}
        ProductFilter::Category(category) => {
            condition = condition.add(Column::Category.eq(category.as_str()));
        }
        ProductFilter::Model(model) => {
            condition = condition.add(Column::Model.eq(model.as_str()));
        }
    }
    if only_available {
        condition = condition.add(Column::Quantity.gt(0));
    }

    Products::find()
        .filter(condition)
        .order_by_asc(Column::Model)
        .all(db)
        .await?
        .into_iter()
        .map(product_from_entity)
        .collect()
}

pub async fn delete_product<C: ConnectionTrait>(db: &C, model: &str) -> AppResult<()> {
    let result = Products::delete_by_id(model).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(AppError::ProductNotFound);
    }
    Ok(())
}

pub async fn delete_all<C: ConnectionTrait>(db: &C) -> AppResult<u64> {
    let result = Products::delete_many().exec(db).await?;
    Ok(result.rows_affected)
}

fn product_from_entity(model: ProductModel) -> AppResult<Product> {
    let category = model
        .category
        .parse::<Category>()
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e)))?;
    Ok(Product {
        model: model.model,
        category,
        quantity: model.quantity,
        details: model.details,
        selling_price: model.selling_price,
        arrival_date: model.arrival_date,
    })
}
