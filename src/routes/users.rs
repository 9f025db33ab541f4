use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    routing::get,
};

use crate::{
    dto::users::{CreateUserRequest, UpdateUserRequest},
    error::AppResult,
    middleware::auth::AuthUser,
    models::User,
    response::ApiResponse,
    services::user_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user).delete(delete_all_users))
        .route("/roles/{role}", get(list_users_by_role))
        .route(
            "/{username}",
            get(get_user).patch(update_user).delete(delete_user),
        )
}

#[utoipa::path(
    post,
    path = "/ezelectronics/users",
    request_body = CreateUserRequest,
    responses(
        (status = 200, description = "User created", body = ApiResponse<serde_json::Value>),
        (status = 409, description = "Username already taken"),
        (status = 422, description = "Invalid body")
    ),
    tag = "Users"
)]
pub async fn create_user(
    State(state): State<AppState>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let Json(payload) = payload?;
    let resp = user_service::create_user(&state, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/ezelectronics/users",
    responses(
        (status = 200, description = "All users (admin only)", body = ApiResponse<Vec<User>>),
        (status = 401, description = "Not an admin")
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn list_users(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<Vec<User>>>> {
    let resp = user_service::get_users(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/ezelectronics/users/roles/{role}",
    params(
        ("role" = String, Path, description = "Customer, Manager or Admin")
    ),
    responses(
        (status = 200, description = "Users with the role", body = ApiResponse<Vec<User>>),
        (status = 401, description = "Not an admin"),
        (status = 422, description = "Unknown role")
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn list_users_by_role(
    State(state): State<AppState>,
    user: AuthUser,
    Path(role): Path<String>,
) -> AppResult<Json<ApiResponse<Vec<User>>>> {
    let resp = user_service::get_users_by_role(&state, &user, &role).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/ezelectronics/users/{username}",
    params(
        ("username" = String, Path, description = "Username")
    ),
    responses(
        (status = 200, description = "User", body = ApiResponse<User>),
        (status = 401, description = "Not allowed to read this user"),
        (status = 404, description = "User not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn get_user(
    State(state): State<AppState>,
    user: AuthUser,
    Path(username): Path<String>,
) -> AppResult<Json<ApiResponse<User>>> {
    let resp = user_service::get_user_by_username(&state, &user, &username).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/ezelectronics/users/{username}",
    params(
        ("username" = String, Path, description = "Username")
    ),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "Updated user", body = ApiResponse<User>),
        (status = 400, description = "Birthdate in the future"),
        (status = 401, description = "Not allowed to update this user"),
        (status = 404, description = "User not found"),
        (status = 422, description = "Invalid body")
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn update_user(
    State(state): State<AppState>,
    user: AuthUser,
    Path(username): Path<String>,
    payload: Result<Json<UpdateUserRequest>, JsonRejection>,
) -> AppResult<Json<ApiResponse<User>>> {
    let Json(payload) = payload?;
    let resp = user_service::update_user_info(&state, &user, &username, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/ezelectronics/users/{username}",
    params(
        ("username" = String, Path, description = "Username")
    ),
    responses(
        (status = 200, description = "Deleted", body = ApiResponse<serde_json::Value>),
        (status = 401, description = "Not allowed to delete this user"),
        (status = 404, description = "User not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn delete_user(
    State(state): State<AppState>,
    user: AuthUser,
    Path(username): Path<String>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = user_service::delete_user(&state, &user, &username).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/ezelectronics/users",
    responses(
        (status = 200, description = "Deleted every non-admin user", body = ApiResponse<serde_json::Value>),
        (status = 401, description = "Not an admin")
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn delete_all_users(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = user_service::delete_all(&state, &user).await?;
    Ok(Json(resp))
}
