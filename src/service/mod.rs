//! Gateway services and the validation layer in front of them.

mod admins;
mod password;
mod products;
mod validation;

pub use admins::{AdminService, ADMIN_NOT_FOUND};
pub use password::Passwords;
pub use products::{ProductService, PRODUCT_NOT_FOUND};
pub use validation::{normalize_email, RequestValidator};
