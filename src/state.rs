use std::sync::Arc;

use crate::db::{DbPool, OrmConn, create_orm_conn};

#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub orm: OrmConn,
    pub auth: Arc<AuthSettings>,
}

/// Token signing parameters shared by the login service and the auth extractor.
#[derive(Debug)]
pub struct AuthSettings {
    pub jwt_secret: String,
    pub jwt_ttl_hours: i64,
}

impl AppState {
    pub fn new(pool: DbPool, jwt_secret: impl Into<String>, jwt_ttl_hours: i64) -> Self {
        let orm = create_orm_conn(&pool);
        Self {
            pool,
            orm,
            auth: Arc::new(AuthSettings {
                jwt_secret: jwt_secret.into(),
                jwt_ttl_hours,
            }),
        }
    }
}
