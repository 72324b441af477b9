//! Entity and input types for products and admin accounts.

pub mod admin;
pub mod product;

pub use admin::*;
pub use product::*;
