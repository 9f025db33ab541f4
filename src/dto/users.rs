use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::ToSchema;

use crate::{
    dates::parse_date,
    dto::validation::require_non_empty,
    error::{AppError, AppResult},
    models::Role,
};

#[derive(Deserialize, Debug, ToSchema)]
pub struct CreateUserRequest {
    pub username: String,
    pub name: String,
    pub surname: String,
    pub password: String,
    pub role: String,
}

impl CreateUserRequest {
    pub fn validate(&self) -> AppResult<Role> {
        require_non_empty("username", &self.username)?;
        require_non_empty("name", &self.name)?;
        require_non_empty("surname", &self.surname)?;
        require_non_empty("password", &self.password)?;
        parse_role(&self.role)
    }
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct UpdateUserRequest {
    pub name: String,
    pub surname: String,
    pub address: String,
    pub birthdate: String,
}

impl UpdateUserRequest {
    pub fn validate(&self) -> AppResult<NaiveDate> {
        require_non_empty("name", &self.name)?;
        require_non_empty("surname", &self.surname)?;
        require_non_empty("address", &self.address)?;
        parse_date("birthdate", &self.birthdate)
    }
}

pub fn parse_role(value: &str) -> AppResult<Role> {
    value.parse::<Role>().map_err(AppError::Validation)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(role: &str) -> CreateUserRequest {
        CreateUserRequest {
            username: "u1".into(),
            name: "n".into(),
            surname: "s".into(),
            password: "p".into(),
            role: role.into(),
        }
    }

    #[test]
    fn create_user_checks_role_and_fields() {
        assert_eq!(request("Manager").validate().unwrap(), Role::Manager);
        assert!(request("WrongRole").validate().is_err());
        assert!(request("").validate().is_err());

        let mut missing_name = request("Customer");
        missing_name.name = String::new();
        assert!(missing_name.validate().is_err());
    }

    #[test]
    fn update_user_requires_iso_birthdate() {
        let mut update = UpdateUserRequest {
            name: "n".into(),
            surname: "s".into(),
            address: "a".into(),
            birthdate: "2000-01-01".into(),
        };
        assert!(update.validate().is_ok());
        update.birthdate = "01-01-2000".into();
        assert!(update.validate().is_err());
    }
}
