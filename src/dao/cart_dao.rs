use chrono::NaiveDate;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use sea_orm::ActiveValue::NotSet;

use crate::{
    entity::{
        carts::{self, ActiveModel as CartActive, Entity as Carts, Model as CartModel},
        products_in_carts::{
            self, ActiveModel as LineItemActive, Entity as ProductsInCarts,
            Model as LineItemModel,
        },
    },
    error::{AppError, AppResult},
    models::{Cart, Category, Product, ProductInCart},
};

/// The customer's unpaid cart, if any.
pub async fn find_current_cart<C: ConnectionTrait>(
    db: &C,
    username: &str,
) -> AppResult<Option<CartModel>> {
    let cart = Carts::find()
        .filter(
            Condition::all()
                .add(carts::Column::Customer.eq(username))
                .add(carts::Column::Paid.eq(false)),
        )
        .one(db)
        .await?;
    Ok(cart)
}

async fn create_cart<C: ConnectionTrait>(db: &C, username: &str) -> AppResult<CartModel> {
    let cart = CartActive {
        id: NotSet,
        customer: Set(username.to_string()),
        paid: Set(false),
        payment_date: Set(None),
        total: Set(0.0),
    }
    .insert(db)
    .await?;
    Ok(cart)
}

pub async fn get_line_items<C: ConnectionTrait>(
    db: &C,
    cart_id: i32,
) -> AppResult<Vec<ProductInCart>> {
    ProductsInCarts::find()
        .filter(products_in_carts::Column::CartId.eq(cart_id))
        .order_by_asc(products_in_carts::Column::Model)
        .all(db)
        .await?
        .into_iter()
        .map(line_item_from_entity)
        .collect()
}

/// The current cart with its items, or an empty cart when there is none.
pub async fn get_current_cart<C: ConnectionTrait>(db: &C, username: &str) -> AppResult<Cart> {
    match find_current_cart(db, username).await? {
        Some(cart) => {
            let products = get_line_items(db, cart.id).await?;
            Ok(cart_from_entity(cart, products))
        }
        None => Ok(Cart::empty(username)),
    }
}

/// Add one unit of `product` to the current cart, creating the cart first if
/// the customer has none.
pub async fn add_to_cart<C: ConnectionTrait>(
    db: &C,
    username: &str,
    product: &Product,
) -> AppResult<()> {
    let cart = match find_current_cart(db, username).await? {
        Some(cart) => cart,
        None => create_cart(db, username).await?,
    };

    let existing = ProductsInCarts::find_by_id((cart.id, product.model.clone()))
        .one(db)
        .await?;
    if existing.is_some() {
        change_line_quantity(db, cart.id, &product.model, 1).await?;
    } else {
        let line = LineItemActive {
            cart_id: Set(cart.id),
            model: Set(product.model.clone()),
            quantity: Set(1),
            category: Set(product.category.as_str().to_string()),
            price: Set(product.selling_price),
        };
        ProductsInCarts::insert(line).exec_without_returning(db).await?;
    }

    add_to_total(db, cart.id, product.selling_price).await
}

/// Take one unit of `model` out of `cart`; the line item goes away with its
/// last unit.
pub async fn remove_from_cart<C: ConnectionTrait>(
    db: &C,
    cart: &CartModel,
    model: &str,
) -> AppResult<()> {
    let line = ProductsInCarts::find_by_id((cart.id, model.to_string()))
        .one(db)
        .await?
        .ok_or(AppError::ProductNotInCart)?;

    add_to_total(db, cart.id, -line.price).await?;
    if line.quantity == 1 {
        ProductsInCarts::delete_by_id((cart.id, model.to_string()))
            .exec(db)
            .await?;
    } else {
        change_line_quantity(db, cart.id, model, -1).await?;
    }
    Ok(())
}

pub async fn checkout_cart<C: ConnectionTrait>(
    db: &C,
    cart: CartModel,
    payment_date: NaiveDate,
) -> AppResult<()> {
    let mut active: CartActive = cart.into();
    active.paid = Set(true);
    active.payment_date = Set(Some(payment_date));
    active.update(db).await?;
    Ok(())
}

/// Drop the current cart with its items and open a fresh empty one.
pub async fn clear_cart<C: ConnectionTrait>(db: &C, cart: &CartModel) -> AppResult<()> {
    ProductsInCarts::delete_many()
        .filter(products_in_carts::Column::CartId.eq(cart.id))
        .exec(db)
        .await?;
    Carts::delete_by_id(cart.id).exec(db).await?;
    create_cart(db, &cart.customer).await?;
    Ok(())
}

/// Paid carts of one customer, oldest first.
pub async fn get_history_carts<C: ConnectionTrait>(db: &C, username: &str) -> AppResult<Vec<Cart>> {
    let condition = Condition::all()
        .add(carts::Column::Customer.eq(username))
        .add(carts::Column::Paid.eq(true));
    carts_with_items(db, condition).await
}

/// Every cart of every customer, paid or not.
pub async fn get_all_carts<C: ConnectionTrait>(db: &C) -> AppResult<Vec<Cart>> {
    carts_with_items(db, Condition::all()).await
}

pub async fn delete_all_carts<C: ConnectionTrait>(db: &C) -> AppResult<u64> {
    ProductsInCarts::delete_many().exec(db).await?;
    let result = Carts::delete_many().exec(db).await?;
    Ok(result.rows_affected)
}

async fn carts_with_items<C: ConnectionTrait>(
    db: &C,
    condition: Condition,
) -> AppResult<Vec<Cart>> {
    let rows = Carts::find()
        .filter(condition)
        .order_by_asc(carts::Column::Id)
        .find_with_related(ProductsInCarts)
        .all(db)
        .await?;

    rows.into_iter()
        .map(|(cart, lines)| {
            let products = lines
                .into_iter()
                .map(line_item_from_entity)
                .collect::<AppResult<Vec<_>>>()?;
            Ok(cart_from_entity(cart, products))
        })
        .collect()
}

async fn change_line_quantity<C: ConnectionTrait>(
    db: &C,
    cart_id: i32,
    model: &str,
    delta: i32,
) -> AppResult<()> {
    ProductsInCarts::update_many()
        .col_expr(
            products_in_carts::Column::Quantity,
            Expr::col(products_in_carts::Column::Quantity).add(delta),
        )
        .filter(
            Condition::all()
                .add(products_in_carts::Column::CartId.eq(cart_id))
                .add(products_in_carts::Column::Model.eq(model)),
        )
        .exec(db)
        .await?;
    Ok(())
}

/// Totals are kept in whole cents so repeated adds and removes of fractional
/// prices return exactly to zero.
async fn add_to_total<C: ConnectionTrait>(db: &C, cart_id: i32, amount: f64) -> AppResult<()> {
    Carts::update_many()
        .col_expr(
            carts::Column::Total,
            Expr::cust_with_values("ROUND(total + ?, 2)", [amount]),
        )
        .filter(carts::Column::Id.eq(cart_id))
        .exec(db)
        .await?;
    Ok(())
}

fn cart_from_entity(cart: CartModel, products: Vec<ProductInCart>) -> Cart {
    Cart {
        customer: cart.customer,
        paid: cart.paid,
        payment_date: cart.payment_date,
        total: cart.total,
        products,
    }
}

fn line_item_from_entity(line: LineItemModel) -> AppResult<ProductInCart> {
    let category = line
        .category
        .parse::<Category>()
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e)))?;
    Ok(ProductInCart {
        model: line.model,
        quantity: line.quantity,
        category,
        price: line.price,
    })
}
