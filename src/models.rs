use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum Role {
    Customer,
    Manager,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Customer => "Customer",
            Role::Manager => "Manager",
            Role::Admin => "Admin",
        }
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Customer" => Ok(Role::Customer),
            "Manager" => Ok(Role::Manager),
            "Admin" => Ok(Role::Admin),
            other => Err(format!("invalid role: {other}")),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum Category {
    Smartphone,
    Laptop,
    Appliance,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Smartphone => "Smartphone",
            Category::Laptop => "Laptop",
            Category::Appliance => "Appliance",
        }
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Smartphone" => Ok(Category::Smartphone),
            "Laptop" => Ok(Category::Laptop),
            "Appliance" => Ok(Category::Appliance),
            other => Err(format!("invalid category: {other}")),
        }
    }
}

/// A user as exposed by the API. The password hash never leaves the DAO.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub username: String,
    pub name: String,
    pub surname: String,
    pub role: Role,
    pub address: Option<String>,
    pub birthdate: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub model: String,
    pub category: Category,
    pub quantity: i32,
    pub details: Option<String>,
    pub selling_price: f64,
    pub arrival_date: NaiveDate,
}

/// A line item: the category and price are the values at the time the
/// product was added, not a live view of the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductInCart {
    pub model: String,
    pub quantity: i32,
    pub category: Category,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    pub customer: String,
    pub paid: bool,
    pub payment_date: Option<NaiveDate>,
    pub total: f64,
    pub products: Vec<ProductInCart>,
}

impl Cart {
    /// The cart reported to a customer who has no current cart yet.
    pub fn empty(customer: impl Into<String>) -> Self {
        Self {
            customer: customer.into(),
            paid: false,
            payment_date: None,
            total: 0.0,
            products: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductReview {
    pub model: String,
    pub user: String,
    pub score: i32,
    pub date: NaiveDate,
    pub comment: String,
}
