//! Data access: one module per table group, every function generic over the
//! connection so services can run them inside a transaction.

use sea_orm::{DbErr, RuntimeErr};

pub mod cart_dao;
pub mod product_dao;
pub mod review_dao;
pub mod user_dao;

/// True when the statement failed on a UNIQUE or PRIMARY KEY constraint.
pub(crate) fn is_unique_violation(err: &DbErr) -> bool {
    match err {
        DbErr::Exec(RuntimeErr::SqlxError(e)) | DbErr::Query(RuntimeErr::SqlxError(e)) => e
            .as_database_error()
            .is_some_and(|db_err| db_err.is_unique_violation()),
        _ => false,
    }
}
