use argon2::{
    Argon2, PasswordHasher,
    password_hash::{PasswordHash, PasswordVerifier, SaltString},
};
use chrono::NaiveDate;
use password_hash::rand_core::OsRng;
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::{
    dao::is_unique_violation,
    entity::users::{ActiveModel, Column, Entity as Users, Model as UserModel},
    error::{AppError, AppResult},
    models::{Role, User},
};

pub async fn create_user<C: ConnectionTrait>(
    db: &C,
    username: &str,
    name: &str,
    surname: &str,
    password: &str,
    role: Role,
) -> AppResult<()> {
    if Users::find_by_id(username).one(db).await?.is_some() {
        return Err(AppError::UserAlreadyExists);
    }

    let active = ActiveModel {
        username: Set(username.to_string()),
        name: Set(name.to_string()),
        surname: Set(surname.to_string()),
        role: Set(role.as_str().to_string()),
        password_hash: Set(hash_password(password)?),
        address: Set(None),
        birthdate: Set(None),
    };
    match Users::insert(active).exec_without_returning(db).await {
        Ok(_) => Ok(()),
        Err(err) if is_unique_violation(&err) => Err(AppError::UserAlreadyExists),
        Err(err) => Err(err.into()),
    }
}

/// Look up a user and check the password against the stored hash.
/// Returns `None` for an unknown username or a wrong password alike.
pub async fn authenticate<C: ConnectionTrait>(
    db: &C,
    username: &str,
    password: &str,
) -> AppResult<Option<User>> {
    let Some(model) = Users::find_by_id(username).one(db).await? else {
        return Ok(None);
    };

    let parsed_hash = PasswordHash::new(&model.password_hash)
        .map_err(|_| AppError::Internal(anyhow::anyhow!("Invalid password hash")))?;
    if Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_err()
    {
        return Ok(None);
    }

    user_from_entity(model).map(Some)
}

pub async fn get_users<C: ConnectionTrait>(db: &C) -> AppResult<Vec<User>> {
    Users::find()
        .order_by_asc(Column::Username)
        .all(db)
        .await?
        .into_iter()
        .map(user_from_entity)
        .collect()
}

pub async fn get_users_by_role<C: ConnectionTrait>(db: &C, role: Role) -> AppResult<Vec<User>> {
    Users::find()
        .filter(Column::Role.eq(role.as_str()))
        .order_by_asc(Column::Username)
        .all(db)
        .await?
        .into_iter()
        .map(user_from_entity)
        .collect()
}

pub async fn get_user_by_username<C: ConnectionTrait>(db: &C, username: &str) -> AppResult<User> {
    match Users::find_by_id(username).one(db).await? {
        Some(model) => user_from_entity(model),
        None => Err(AppError::UserNotFound),
    }
}

pub async fn delete_user<C: ConnectionTrait>(db: &C, username: &str) -> AppResult<()> {
    let result = Users::delete_by_id(username).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(AppError::UserNotFound);
    }
    Ok(())
}

/// Delete every user except administrators.
pub async fn delete_all<C: ConnectionTrait>(db: &C) -> AppResult<u64> {
    let result = Users::delete_many()
        .filter(Column::Role.ne(Role::Admin.as_str()))
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}

pub async fn update_user<C: ConnectionTrait>(
    db: &C,
    username: &str,
    name: &str,
    surname: &str,
    address: &str,
    birthdate: NaiveDate,
) -> AppResult<User> {
    let existing = Users::find_by_id(username)
        .one(db)
        .await?
        .ok_or(AppError::UserNotFound)?;

    let mut active: ActiveModel = existing.into();
    active.name = Set(name.to_string());
    active.surname = Set(surname.to_string());
    active.address = Set(Some(address.to_string()));
    active.birthdate = Set(Some(birthdate));
    let updated = active.update(db).await?;

    user_from_entity(updated)
}

pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))?
        .to_string();
    Ok(hash)
}

fn user_from_entity(model: UserModel) -> AppResult<User> {
    let role = model
        .role
        .parse::<Role>()
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e)))?;
    Ok(User {
        username: model.username,
        name: model.name,
        surname: model.surname,
        role,
        address: model.address,
        birthdate: model.birthdate,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashes_are_salted() {
        let first = hash_password("secret").unwrap();
        let second = hash_password("secret").unwrap();
        assert_ne!(first, second);
        assert!(first.starts_with("$argon2"));
    }
}
