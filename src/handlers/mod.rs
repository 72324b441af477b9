//! HTTP handlers for products and admin accounts.

pub mod admins;
pub mod products;
