use chrono::NaiveDate;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::{
    dao::is_unique_violation,
    entity::reviews::{ActiveModel, Column, Entity as Reviews, Model as ReviewModel},
    error::{AppError, AppResult},
    models::ProductReview,
};

pub async fn create_review<C: ConnectionTrait>(
    db: &C,
    model: &str,
    username: &str,
    score: i32,
    comment: &str,
    date: NaiveDate,
) -> AppResult<()> {
    let existing = Reviews::find_by_id((model.to_string(), username.to_string()))
        .one(db)
        .await?;
    if existing.is_some() {
        return Err(AppError::ExistingReview);
    }

    let active = ActiveModel {
        model: Set(model.to_string()),
        username: Set(username.to_string()),
        score: Set(score),
        date: Set(date),
        comment: Set(comment.to_string()),
    };
    match Reviews::insert(active).exec_without_returning(db).await {
        Ok(_) => Ok(()),
        Err(err) if is_unique_violation(&err) => Err(AppError::ExistingReview),
        Err(err) => Err(err.into()),
    }
}

pub async fn get_reviews_for_product<C: ConnectionTrait>(
    db: &C,
    model: &str,
) -> AppResult<Vec<ProductReview>> {
    let reviews = Reviews::find()
        .filter(Column::Model.eq(model))
        .order_by_asc(Column::Date)
        .order_by_asc(Column::Username)
        .all(db)
        .await?
        .into_iter()
        .map(review_from_entity)
        .collect();
    Ok(reviews)
}

pub async fn delete_user_review<C: ConnectionTrait>(
    db: &C,
    model: &str,
    username: &str,
) -> AppResult<()> {
    let result = Reviews::delete_by_id((model.to_string(), username.to_string()))
        .exec(db)
        .await?;
    if result.rows_affected == 0 {
        return Err(AppError::NoReviewProduct);
    }
    Ok(())
}

pub async fn delete_reviews<C: ConnectionTrait>(db: &C, model: &str) -> AppResult<u64> {
    let result = Reviews::delete_many()
        .filter(Column::Model.eq(model))
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}

pub async fn delete_all_reviews<C: ConnectionTrait>(db: &C) -> AppResult<u64> {
    let result = Reviews::delete_many().exec(db).await?;
    Ok(result.rows_affected)
}

fn review_from_entity(model: ReviewModel) -> ProductReview {
    ProductReview {
        model: model.model,
        user: model.username,
        score: model.score,
        date: model.date,
        comment: model.comment,
    }
}
