use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Cart not found")]
    CartNotFound,

    #[error("Cart is empty")]
    EmptyCart,

    #[error("Product not in cart")]
    ProductNotInCart,

    #[error("Product already sold")]
    ProductSold,

    #[error("Product not found")]
    ProductNotFound,

    #[error("The product already exists")]
    ProductAlreadyExists,

    #[error("Product stock is empty")]
    EmptyProductStock,

    #[error("Product stock cannot satisfy the requested quantity")]
    LowProductStock,

    #[error("You have already reviewed this product")]
    ExistingReview,

    #[error("You have not reviewed this product")]
    NoReviewProduct,

    #[error("The username already exists")]
    UserAlreadyExists,

    #[error("The user does not exist")]
    UserNotFound,

    #[error("You cannot access the information of other users")]
    UnauthorizedUser,

    #[error("You cannot modify or delete another administrator")]
    UserIsAdmin,

    #[error("Input date is not compatible with the current date")]
    DateError,

    #[error("Unauthenticated user")]
    Unauthenticated,

    #[error("Incorrect username and/or password")]
    InvalidCredentials,

    #[error("{0}")]
    RoleRequired(&'static str),

    #[error("{0}")]
    Validation(String),

    #[error("ORM error")]
    OrmError(#[from] sea_orm::DbErr),

    #[error("Internal Server Error")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::CartNotFound
            | AppError::ProductNotInCart
            | AppError::ProductNotFound
            | AppError::NoReviewProduct
            | AppError::UserNotFound => StatusCode::NOT_FOUND,
            AppError::EmptyCart | AppError::DateError => StatusCode::BAD_REQUEST,
            AppError::ProductSold
            | AppError::ProductAlreadyExists
            | AppError::EmptyProductStock
            | AppError::LowProductStock
            | AppError::ExistingReview
            | AppError::UserAlreadyExists => StatusCode::CONFLICT,
            AppError::UnauthorizedUser
            | AppError::UserIsAdmin
            | AppError::Unauthenticated
            | AppError::InvalidCredentials
            | AppError::RoleRequired(_) => StatusCode::UNAUTHORIZED,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::OrmError(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
    pub status: u16,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            AppError::OrmError(err) => tracing::error!(error = %err, "orm error"),
            AppError::Internal(err) => tracing::error!(error = %err, "internal error"),
            _ => {}
        }

        let body = ErrorBody {
            error: self.to_string(),
            status: status.as_u16(),
        };

        (status, axum::Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
