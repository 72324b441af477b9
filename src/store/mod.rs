//! Persistence seam. `InventoryStore` is the row-level contract the gateway services run on;
//! `PgStore` is the PostgreSQL implementation.

mod postgres;

use crate::error::AppError;
use crate::models::{AdminChanges, AdminRecord, NewAdmin, Product, ProductInput};
use async_trait::async_trait;
use sqlx::ConnectOptions;
use std::str::FromStr;

pub use postgres::PgStore;

/// Conflict message when registering an email that already exists.
pub const EMAIL_REGISTERED: &str = "Email already registered";
/// Conflict message when moving an admin onto another admin's email.
pub const EMAIL_IN_USE: &str = "Email already in use";

/// Row-level access to products and admins. Each write is one atomic unit of work.
/// Implementations translate a unique-constraint violation on admin email into
/// `AppError::Conflict`; every other store failure surfaces as `AppError::Db`.
#[async_trait]
pub trait InventoryStore: Send + Sync {
    /// Round-trip to the store; used by readiness checks.
    async fn ping(&self) -> Result<(), AppError>;

    async fn list_products(&self) -> Result<Vec<Product>, AppError>;

    async fn find_product(&self, id: i32) -> Result<Option<Product>, AppError>;

    async fn insert_product(&self, input: &ProductInput) -> Result<Product, AppError>;

    /// Overwrite every mutable column. `None` when no row has this id.
    async fn replace_product(&self, id: i32, input: &ProductInput) -> Result<Option<Product>, AppError>;

    /// `false` when no row has this id.
    async fn delete_product(&self, id: i32) -> Result<bool, AppError>;

    async fn list_admins(&self) -> Result<Vec<AdminRecord>, AppError>;

    async fn find_admin(&self, id: i32) -> Result<Option<AdminRecord>, AppError>;

    async fn find_admin_by_email(&self, email: &str) -> Result<Option<AdminRecord>, AppError>;

    async fn insert_admin(&self, admin: &NewAdmin) -> Result<AdminRecord, AppError>;

    /// Apply only the `Some` columns. `None` when no row has this id.
    async fn update_admin(&self, id: i32, changes: &AdminChanges) -> Result<Option<AdminRecord>, AppError>;

    /// `false` when no row has this id.
    async fn delete_admin(&self, id: i32) -> Result<bool, AppError>;
}

/// Ensure the database in `database_url` exists; create it if not. Connects to the
/// default `postgres` database to run CREATE DATABASE. Call before creating the main pool.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin_url, db_name) = parse_db_name_from_url(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = sqlx::postgres::PgConnectOptions::from_str(&admin_url)
        .map_err(|e| AppError::BadRequest(format!("invalid DATABASE_URL: {}", e)))?;
    let mut conn: sqlx::PgConnection = opts.connect().await.map_err(AppError::Db)?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await
        .map_err(AppError::Db)?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await
            .map_err(AppError::Db)?;
    }
    Ok(())
}

fn parse_db_name_from_url(url: &str) -> Result<(String, String), AppError> {
    let path_start = url.rfind('/').ok_or_else(|| AppError::BadRequest("DATABASE_URL: no path".into()))? + 1;
    let path_and_query = url.get(path_start..).unwrap_or("");
    let db_name = path_and_query.split('?').next().unwrap_or("").trim();
    let base = url.get(..path_start).unwrap_or(url);
    let admin_url = format!("{}postgres", base);
    Ok((admin_url, db_name.to_string()))
}

/// Quote an identifier for PostgreSQL. Only used with names from configuration.
pub(crate) fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
