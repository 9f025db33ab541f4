use serde::Deserialize;
use utoipa::ToSchema;

use crate::{dto::validation::require_non_empty, error::AppResult};

#[derive(Debug, Deserialize, ToSchema)]
pub struct AddToCartRequest {
    pub model: String,
}

impl AddToCartRequest {
    pub fn validate(&self) -> AppResult<()> {
        require_non_empty("model", &self.model)
    }
}
