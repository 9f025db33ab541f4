use crate::error::{AppError, AppResult};

pub fn require_non_empty(field: &str, value: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{field} must not be empty")));
    }
    Ok(())
}

pub fn require_positive(field: &str, value: i32) -> AppResult<()> {
    if value <= 0 {
        return Err(AppError::Validation(format!(
            "{field} must be greater than 0"
        )));
    }
    Ok(())
}
