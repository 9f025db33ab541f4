use crate::{
    dao::user_dao,
    dates::today,
    dto::users::{CreateUserRequest, UpdateUserRequest, parse_role},
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::{Role, User},
    response::{ApiResponse, Meta},
    state::AppState,
};

pub async fn create_user(
    state: &AppState,
    payload: CreateUserRequest,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let role = payload.validate()?;

    user_dao::create_user(
        &state.orm,
        &payload.username,
        &payload.name,
        &payload.surname,
        &payload.password,
        role,
    )
    .await?;

    tracing::info!(username = %payload.username, %role, "user registered");

    Ok(ApiResponse::success(
        "User created",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

pub async fn get_users(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<Vec<User>>> {
    ensure_admin(user)?;
    let users = user_dao::get_users(&state.orm).await?;
    Ok(ApiResponse::list("Users", users))
}

pub async fn get_users_by_role(
    state: &AppState,
    user: &AuthUser,
    role: &str,
) -> AppResult<ApiResponse<Vec<User>>> {
    ensure_admin(user)?;
    let role = parse_role(role)?;
    let users = user_dao::get_users_by_role(&state.orm, role).await?;
    Ok(ApiResponse::list("Users", users))
}

/// Anyone may read their own record; only an Admin may read others.
pub async fn get_user_by_username(
    state: &AppState,
    user: &AuthUser,
    username: &str,
) -> AppResult<ApiResponse<User>> {
    if !user.is_admin() && user.username != username {
        return Err(AppError::UnauthorizedUser);
    }
    let found = user_dao::get_user_by_username(&state.orm, username).await?;
    Ok(ApiResponse::success("User", found, None))
}

pub async fn delete_user(
    state: &AppState,
    user: &AuthUser,
    username: &str,
) -> AppResult<ApiResponse<serde_json::Value>> {
    if !user.is_admin() && user.username != username {
        return Err(AppError::UnauthorizedUser);
    }
    let target = user_dao::get_user_by_username(&state.orm, username).await?;
    if user.is_admin() && target.role == Role::Admin && target.username != user.username {
        return Err(AppError::UserIsAdmin);
    }

    user_dao::delete_user(&state.orm, username).await?;

    tracing::info!(user = %user.username, deleted = username, "user deleted");

    Ok(ApiResponse::success(
        "Deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

/// Delete every non-Admin user.
pub async fn delete_all(
    state: &AppState,
    user: &AuthUser,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_admin(user)?;
    let deleted = user_dao::delete_all(&state.orm).await?;

    tracing::info!(user = %user.username, deleted, "non-admin users deleted");

    Ok(ApiResponse::success(
        "Deleted",
        serde_json::json!({ "deleted": deleted }),
        Some(Meta::empty()),
    ))
}

pub async fn update_user_info(
    state: &AppState,
    user: &AuthUser,
    username: &str,
    payload: UpdateUserRequest,
) -> AppResult<ApiResponse<User>> {
    let birthdate = payload.validate()?;

    if !user.is_admin() && user.username != username {
        return Err(AppError::UnauthorizedUser);
    }
    let target = user_dao::get_user_by_username(&state.orm, username).await?;
    if user.is_admin() && target.role == Role::Admin && target.username != user.username {
        return Err(AppError::UnauthorizedUser);
    }
    if birthdate > today() {
        return Err(AppError::DateError);
    }

    let updated = user_dao::update_user(
        &state.orm,
        username,
        &payload.name,
        &payload.surname,
        &payload.address,
        birthdate,
    )
    .await?;

    tracing::info!(user = %user.username, updated = username, "user updated");

    Ok(ApiResponse::success("Updated", updated, Some(Meta::empty())))
}
