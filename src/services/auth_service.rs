use chrono::{Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};

use crate::{
    dao::user_dao,
    dto::auth::{Claims, LoginRequest, LoginResponse},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::User,
    response::{ApiResponse, Meta},
    state::AppState,
};

pub async fn login(
    state: &AppState,
    payload: LoginRequest,
) -> AppResult<ApiResponse<LoginResponse>> {
    payload.validate()?;
    let LoginRequest { username, password } = payload;

    let user = match user_dao::authenticate(&state.orm, &username, &password).await? {
        Some(u) => u,
        None => {
            tracing::warn!(username = %username, "login rejected");
            return Err(AppError::InvalidCredentials);
        }
    };

    let token = issue_token(state, &user)?;

    tracing::info!(username = %user.username, role = %user.role, "user_login");

    Ok(ApiResponse::success(
        "Logged in",
        LoginResponse {
            token: format!("Bearer {}", token),
            user,
        },
        Some(Meta::empty()),
    ))
}

/// The caller's record as currently stored, so role or profile changes made
/// after login are visible.
pub async fn current_user(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<User>> {
    let found = user_dao::get_user_by_username(&state.orm, &user.username)
        .await
        .map_err(|err| match err {
            AppError::UserNotFound => AppError::Unauthenticated,
            other => other,
        })?;
    Ok(ApiResponse::success("Current user", found, None))
}

/// Tokens are not stored server side; logging out only has to be acknowledged.
pub async fn logout(user: &AuthUser) -> AppResult<ApiResponse<serde_json::Value>> {
    tracing::info!(username = %user.username, "user_logout");
    Ok(ApiResponse::success(
        "Logged out",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

fn issue_token(state: &AppState, user: &User) -> AppResult<String> {
    let expiration = Utc::now()
        .checked_add_signed(Duration::hours(state.auth.jwt_ttl_hours))
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to set expiration")))?;
    let exp = u64::try_from(expiration.timestamp())
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Invalid expiration: {e}")))?;

    let claims = Claims {
        sub: user.username.clone(),
        role: user.role.as_str().to_string(),
        exp,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(state.auth.jwt_secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))
}
