pub mod config;
pub mod dao;
pub mod dates;
pub mod db;
pub mod entity;
pub mod error;
pub mod models;
pub mod response;
pub mod routes;
pub mod state;

pub mod dto {
    pub mod auth;
    pub mod cart;
    pub mod products;
    pub mod reviews;
    pub mod users;
    pub mod validation;
}

pub mod middleware {
    pub mod auth;
}

pub mod services {
    pub mod auth_service;
    pub mod cart_service;
    pub mod product_service;
    pub mod review_service;
    pub mod user_service;
}
