use axum::{extract::FromRequestParts, http::header};
use jsonwebtoken::{DecodingKey, Validation, decode};

use crate::{
    dao::user_dao, dto::auth::Claims, error::AppError, models::Role, state::AppState,
};

/// The caller identified by the bearer token, as currently stored.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub username: String,
    pub role: Role,
}

impl AuthUser {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

pub fn ensure_role(user: &AuthUser, allowed: &[Role], message: &'static str) -> Result<(), AppError> {
    if !allowed.contains(&user.role) {
        return Err(AppError::RoleRequired(message));
    }
    Ok(())
}

pub fn ensure_admin(user: &AuthUser) -> Result<(), AppError> {
    ensure_role(user, &[Role::Admin], "User is not an admin")
}

pub fn ensure_customer(user: &AuthUser) -> Result<(), AppError> {
    ensure_role(user, &[Role::Customer], "User is not a customer")
}

pub fn ensure_admin_or_manager(user: &AuthUser) -> Result<(), AppError> {
    ensure_role(
        user,
        &[Role::Admin, Role::Manager],
        "User is not an admin or manager",
    )
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .ok_or(AppError::Unauthenticated)?;

        let auth_str = auth_header
            .to_str()
            .map_err(|_| AppError::Unauthenticated)?;

        let Some(token) = auth_str.strip_prefix("Bearer ") else {
            return Err(AppError::Unauthenticated);
        };

        let decoded = decode::<Claims>(
            token.trim(),
            &DecodingKey::from_secret(state.auth.jwt_secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|err| {
            tracing::warn!(error = %err, "rejected bearer token");
            AppError::Unauthenticated
        })?;

        // The account may have been deleted or changed since the token was issued.
        let user = user_dao::get_user_by_username(&state.orm, &decoded.claims.sub)
            .await
            .map_err(|err| match err {
                AppError::UserNotFound => {
                    tracing::warn!(username = %decoded.claims.sub, "token for a deleted user");
                    AppError::Unauthenticated
                }
                other => other,
            })?;

        Ok(AuthUser {
            username: user.username,
            role: user.role,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: Role) -> AuthUser {
        AuthUser {
            username: "someone".into(),
            role,
        }
    }

    #[test]
    fn guards_follow_roles() {
        assert!(ensure_admin(&user(Role::Admin)).is_ok());
        assert!(ensure_admin(&user(Role::Manager)).is_err());
        assert!(ensure_customer(&user(Role::Customer)).is_ok());
        assert!(ensure_customer(&user(Role::Admin)).is_err());
        assert!(ensure_admin_or_manager(&user(Role::Manager)).is_ok());
        assert!(ensure_admin_or_manager(&user(Role::Customer)).is_err());
    }
}
