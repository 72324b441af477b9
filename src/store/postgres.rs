//! PostgreSQL-backed `InventoryStore`. Tables live in a configurable schema; every write
//! runs in its own transaction, which rolls back on drop if not committed.

use super::{quote_ident, InventoryStore, EMAIL_IN_USE, EMAIL_REGISTERED};
use crate::error::AppError;
use crate::models::{AdminChanges, AdminRecord, NewAdmin, Product, ProductInput};
use async_trait::async_trait;
use sqlx::PgPool;

const PRODUCT_COLUMNS: &str = "id, name, description, price, quantity, company, delivery_partner";
const ADMIN_COLUMNS: &str = "id, email, name, hashed_password";

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
    schema: String,
    products: String,
    admins: String,
}

impl PgStore {
    /// Wrap a pool. `schema` must already be a validated identifier (see `Settings`).
    pub fn new(pool: PgPool, schema: &str) -> Self {
        let q_schema = quote_ident(schema);
        PgStore {
            products: format!("{}.{}", q_schema, quote_ident("products")),
            admins: format!("{}.{}", q_schema, quote_ident("admins")),
            schema: schema.to_string(),
            pool,
        }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Create the schema and both tables if missing. Idempotent.
    pub async fn ensure_schema(&self) -> Result<(), AppError> {
        sqlx::query(&format!("CREATE SCHEMA IF NOT EXISTS {}", quote_ident(&self.schema)))
            .execute(&self.pool)
            .await?;

        let products_ddl = format!(
            r#"
            CREATE TABLE IF NOT EXISTS {} (
                id SERIAL PRIMARY KEY,
                name VARCHAR(255) NOT NULL,
                description VARCHAR(1024),
                price DOUBLE PRECISION NOT NULL,
                quantity INTEGER NOT NULL,
                company VARCHAR(255),
                delivery_partner VARCHAR(255)
            )
            "#,
            self.products
        );
        sqlx::query(&products_ddl).execute(&self.pool).await?;
        sqlx::query(&format!(
            "CREATE INDEX IF NOT EXISTS products_name_idx ON {} (name)",
            self.products
        ))
        .execute(&self.pool)
        .await?;

        let admins_ddl = format!(
            r#"
            CREATE TABLE IF NOT EXISTS {} (
                id SERIAL PRIMARY KEY,
                email VARCHAR(255) NOT NULL,
                name VARCHAR(255),
                hashed_password VARCHAR(255) NOT NULL,
                CONSTRAINT admins_email_key UNIQUE (email)
            )
            "#,
            self.admins
        );
        sqlx::query(&admins_ddl).execute(&self.pool).await?;

        tracing::info!(schema = %self.schema, "warehouse tables ensured");
        Ok(())
    }

    /// Close the pool, waiting for checked-out connections to return.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

/// Unique violations on admin email are the authoritative source of a conflict.
fn email_conflict(message: &'static str) -> impl FnOnce(sqlx::Error) -> AppError {
    move |e| {
        if let sqlx::Error::Database(ref db_err) = e {
            if db_err.is_unique_violation() {
                return AppError::Conflict(message.to_string());
            }
        }
        AppError::Db(e)
    }
}

#[async_trait]
impl InventoryStore for PgStore {
    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }

    async fn list_products(&self) -> Result<Vec<Product>, AppError> {
        let sql = format!("SELECT {} FROM {} ORDER BY id", PRODUCT_COLUMNS, self.products);
        tracing::debug!(sql = %sql, "query");
        let rows = sqlx::query_as::<_, Product>(&sql).fetch_all(&self.pool).await?;
        Ok(rows)
    }

    async fn find_product(&self, id: i32) -> Result<Option<Product>, AppError> {
        let sql = format!("SELECT {} FROM {} WHERE id = $1", PRODUCT_COLUMNS, self.products);
        tracing::debug!(sql = %sql, id, "query");
        let row = sqlx::query_as::<_, Product>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn insert_product(&self, input: &ProductInput) -> Result<Product, AppError> {
        let sql = format!(
            "INSERT INTO {} (name, description, price, quantity, company, delivery_partner) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING {}",
            self.products, PRODUCT_COLUMNS
        );
        tracing::debug!(sql = %sql, "query (tx)");
        let mut tx = self.pool.begin().await?;
        let row = sqlx::query_as::<_, Product>(&sql)
            .bind(&input.name)
            .bind(input.description.as_deref())
            .bind(input.price)
            .bind(input.quantity)
            .bind(input.company.as_deref())
            .bind(input.delivery_partner.as_deref())
            .fetch_one(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(row)
    }

    async fn replace_product(&self, id: i32, input: &ProductInput) -> Result<Option<Product>, AppError> {
        let sql = format!(
            "UPDATE {} SET name = $1, description = $2, price = $3, quantity = $4, \
             company = $5, delivery_partner = $6 WHERE id = $7 RETURNING {}",
            self.products, PRODUCT_COLUMNS
        );
        tracing::debug!(sql = %sql, id, "query (tx)");
        let mut tx = self.pool.begin().await?;
        let row = sqlx::query_as::<_, Product>(&sql)
            .bind(&input.name)
            .bind(input.description.as_deref())
            .bind(input.price)
            .bind(input.quantity)
            .bind(input.company.as_deref())
            .bind(input.delivery_partner.as_deref())
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(row)
    }

    async fn delete_product(&self, id: i32) -> Result<bool, AppError> {
        let sql = format!("DELETE FROM {} WHERE id = $1", self.products);
        tracing::debug!(sql = %sql, id, "query (tx)");
        let mut tx = self.pool.begin().await?;
        let result = sqlx::query(&sql).bind(id).execute(&mut *tx).await?;
        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_admins(&self) -> Result<Vec<AdminRecord>, AppError> {
        let sql = format!("SELECT {} FROM {} ORDER BY id", ADMIN_COLUMNS, self.admins);
        tracing::debug!(sql = %sql, "query");
        let rows = sqlx::query_as::<_, AdminRecord>(&sql).fetch_all(&self.pool).await?;
        Ok(rows)
    }

    async fn find_admin(&self, id: i32) -> Result<Option<AdminRecord>, AppError> {
        let sql = format!("SELECT {} FROM {} WHERE id = $1", ADMIN_COLUMNS, self.admins);
        tracing::debug!(sql = %sql, id, "query");
        let row = sqlx::query_as::<_, AdminRecord>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn find_admin_by_email(&self, email: &str) -> Result<Option<AdminRecord>, AppError> {
        let sql = format!("SELECT {} FROM {} WHERE email = $1", ADMIN_COLUMNS, self.admins);
        tracing::debug!(sql = %sql, "query");
        let row = sqlx::query_as::<_, AdminRecord>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn insert_admin(&self, admin: &NewAdmin) -> Result<AdminRecord, AppError> {
        let sql = format!(
            "INSERT INTO {} (email, name, hashed_password) VALUES ($1, $2, $3) RETURNING {}",
            self.admins, ADMIN_COLUMNS
        );
        tracing::debug!(sql = %sql, "query (tx)");
        let mut tx = self.pool.begin().await?;
        let row = sqlx::query_as::<_, AdminRecord>(&sql)
            .bind(&admin.email)
            .bind(admin.name.as_deref())
            .bind(&admin.hashed_password)
            .fetch_one(&mut *tx)
            .await
            .map_err(email_conflict(EMAIL_REGISTERED))?;
        tx.commit().await?;
        Ok(row)
    }

    async fn update_admin(&self, id: i32, changes: &AdminChanges) -> Result<Option<AdminRecord>, AppError> {
        let sql = format!(
            "UPDATE {} SET email = COALESCE($1, email), name = COALESCE($2, name), \
             hashed_password = COALESCE($3, hashed_password) WHERE id = $4 RETURNING {}",
            self.admins, ADMIN_COLUMNS
        );
        tracing::debug!(sql = %sql, id, "query (tx)");
        let mut tx = self.pool.begin().await?;
        let row = sqlx::query_as::<_, AdminRecord>(&sql)
            .bind(changes.email.as_deref())
            .bind(changes.name.as_deref())
            .bind(changes.hashed_password.as_deref())
            .bind(id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(email_conflict(EMAIL_IN_USE))?;
        tx.commit().await?;
        Ok(row)
    }

    async fn delete_admin(&self, id: i32) -> Result<bool, AppError> {
        let sql = format!("DELETE FROM {} WHERE id = $1", self.admins);
        tracing::debug!(sql = %sql, id, "query (tx)");
        let mut tx = self.pool.begin().await?;
        let result = sqlx::query(&sql).bind(id).execute(&mut *tx).await?;
        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }
}
