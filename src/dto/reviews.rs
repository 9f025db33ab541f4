use serde::Deserialize;
use utoipa::ToSchema;

use crate::{
    dto::validation::require_non_empty,
    error::{AppError, AppResult},
};

#[derive(Debug, Deserialize, ToSchema)]
pub struct AddReviewRequest {
    pub score: i32,
    pub comment: String,
}

impl AddReviewRequest {
    pub fn validate(&self) -> AppResult<()> {
        if !(1..=5).contains(&self.score) {
            return Err(AppError::Validation("score must be between 1 and 5".into()));
        }
        require_non_empty("comment", &self.comment)
    }
}
