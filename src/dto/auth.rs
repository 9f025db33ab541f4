use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    dto::validation::require_non_empty,
    error::AppResult,
    models::User,
};

#[derive(Deserialize, Debug, ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl LoginRequest {
    pub fn validate(&self) -> AppResult<()> {
        require_non_empty("username", &self.username)?;
        require_non_empty("password", &self.password)
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct Claims {
    /// Username of the session owner.
    pub sub: String,
    pub role: String,
    pub exp: u64,
}
