//! Warehouse API: inventory backend for products and admin accounts over PostgreSQL.

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod response;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;

pub use config::Settings;
pub use error::{AppError, ConfigError};
pub use models::{Admin, Product, ProductInput};
pub use routes::{admin_routes, app_router, common_routes_with_ready, product_routes};
pub use service::{AdminService, Passwords, ProductService, RequestValidator};
pub use state::AppState;
pub use store::{ensure_database_exists, InventoryStore, PgStore};
