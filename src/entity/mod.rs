pub mod carts;
pub mod products;
pub mod products_in_carts;
pub mod reviews;
pub mod users;

pub use carts::Entity as Carts;
pub use products::Entity as Products;
pub use products_in_carts::Entity as ProductsInCarts;
pub use reviews::Entity as Reviews;
pub use users::Entity as Users;
