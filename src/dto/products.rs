use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::{
    dao::product_dao::ProductFilter,
    dates::parse_date,
    dto::validation::{require_non_empty, require_positive},
    error::{AppError, AppResult},
    models::Category,
};

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    pub model: String,
    pub category: String,
    pub quantity: i32,
    pub details: Option<String>,
    pub selling_price: f64,
    pub arrival_date: Option<String>,
}

impl CreateProductRequest {
    /// Returns the parsed category and arrival date.
    pub fn validate(&self) -> AppResult<(Category, Option<NaiveDate>)> {
        require_non_empty("model", &self.model)?;
        let category = self
            .category
            .parse::<Category>()
            .map_err(AppError::Validation)?;
        require_positive("quantity", self.quantity)?;
        if !(self.selling_price > 0.0) {
            return Err(AppError::Validation(
                "sellingPrice must be greater than 0".into(),
            ));
        }
        let arrival_date = self
            .arrival_date
            .as_deref()
            .map(|date| parse_date("arrivalDate", date))
            .transpose()?;
        Ok((category, arrival_date))
    }
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChangeQuantityRequest {
    pub quantity: i32,
    pub change_date: Option<String>,
}

impl ChangeQuantityRequest {
    pub fn validate(&self) -> AppResult<Option<NaiveDate>> {
        require_positive("quantity", self.quantity)?;
        self.change_date
            .as_deref()
            .map(|date| parse_date("changeDate", date))
            .transpose()
    }
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SellProductRequest {
    pub quantity: i32,
    pub selling_date: Option<String>,
}

impl SellProductRequest {
    pub fn validate(&self) -> AppResult<Option<NaiveDate>> {
        require_positive("quantity", self.quantity)?;
        self.selling_date
            .as_deref()
            .map(|date| parse_date("sellingDate", date))
            .transpose()
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct QuantityResponse {
    pub quantity: i32,
}

/// Listing filters: `grouping` picks which of `category` / `model` must be set.
#[derive(Debug, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProductQuery {
    pub grouping: Option<String>,
    pub category: Option<String>,
    pub model: Option<String>,
}

impl ProductQuery {
    pub fn validate(&self) -> AppResult<ProductFilter> {
        match (
            self.grouping.as_deref(),
            self.category.as_deref(),
            self.model.as_deref(),
        ) {
            (None, None, None) => Ok(ProductFilter::All),
            (Some("category"), Some(category), None) => category
                .parse::<Category>()
                .map(ProductFilter::Category)
                .map_err(AppError::Validation),
            (Some("model"), None, Some(model)) if !model.trim().is_empty() => {
                Ok(ProductFilter::Model(model.to_string()))
            }
            _ => Err(AppError::Validation(
                "grouping must be 'category' with a category or 'model' with a model".into(),
            )),
        }
    }
}
