use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        auth::{LoginRequest, LoginResponse},
        cart::AddToCartRequest,
        products::{
            ChangeQuantityRequest, CreateProductRequest, ProductQuery, QuantityResponse,
            SellProductRequest,
        },
        reviews::AddReviewRequest,
        users::{CreateUserRequest, UpdateUserRequest},
    },
    error::ErrorBody,
    models::{Cart, Category, Product, ProductInCart, ProductReview, Role, User},
    response::{ApiResponse, Meta},
    routes::{auth, cart, health, products, reviews, users},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::login,
        auth::current_user,
        auth::logout,
        users::create_user,
        users::list_users,
        users::list_users_by_role,
        users::get_user,
        users::update_user,
        users::delete_user,
        users::delete_all_users,
        products::create_product,
        products::list_products,
        products::list_available_products,
        products::change_quantity,
        products::sell_product,
        products::delete_product,
        products::delete_all_products,
        cart::get_cart,
        cart::add_to_cart,
        cart::checkout_cart,
        cart::cart_history,
        cart::remove_from_cart,
        cart::clear_cart,
        cart::list_all_carts,
        cart::delete_all_carts,
        reviews::add_review,
        reviews::list_reviews,
        reviews::delete_review,
        reviews::delete_reviews_of_product,
        reviews::delete_all_reviews
    ),
    components(
        schemas(
            User,
            Role,
            Category,
            Product,
            ProductInCart,
            Cart,
            ProductReview,
            LoginRequest,
            LoginResponse,
            CreateUserRequest,
            UpdateUserRequest,
            CreateProductRequest,
            ChangeQuantityRequest,
            SellProductRequest,
            QuantityResponse,
            ProductQuery,
            AddToCartRequest,
            AddReviewRequest,
            ErrorBody,
            Meta,
            ApiResponse<User>,
            ApiResponse<Cart>,
            ApiResponse<QuantityResponse>
        )
    ),
    security(
        ("bearer_auth" = [])
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Sessions", description = "Login and session endpoints"),
        (name = "Users", description = "User account endpoints"),
        (name = "Products", description = "Product catalog and stock endpoints"),
        (name = "Carts", description = "Shopping cart endpoints"),
        (name = "Reviews", description = "Product review endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
