//! Product gateway: lifecycle operations over the injected store.

use crate::error::AppError;
use crate::models::{Product, ProductInput};
use crate::store::InventoryStore;

pub const PRODUCT_NOT_FOUND: &str = "Product not found";

pub struct ProductService<'a> {
    store: &'a dyn InventoryStore,
}

impl<'a> ProductService<'a> {
    pub fn new(store: &'a dyn InventoryStore) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<Product>, AppError> {
        self.store
            .list_products()
            .await
            .map_err(AppError::storage("Failed to fetch products"))
    }

    pub async fn get(&self, id: i32) -> Result<Product, AppError> {
        self.store
            .find_product(id)
            .await
            .map_err(AppError::storage("Failed to fetch product"))?
            .ok_or_else(|| AppError::NotFound(PRODUCT_NOT_FOUND.into()))
    }

    /// Insert; the store assigns the id.
    pub async fn create(&self, input: &ProductInput) -> Result<Product, AppError> {
        let product = self
            .store
            .insert_product(input)
            .await
            .map_err(AppError::storage("Product creation failed"))?;
        tracing::debug!(product_id = product.id, "product created");
        Ok(product)
    }

    /// Full replace: every mutable field takes the supplied value.
    pub async fn update(&self, id: i32, input: &ProductInput) -> Result<Product, AppError> {
        let product = self
            .store
            .replace_product(id, input)
            .await
            .map_err(AppError::storage("Product update failed"))?
            .ok_or_else(|| AppError::NotFound(PRODUCT_NOT_FOUND.into()))?;
        tracing::debug!(product_id = id, "product updated");
        Ok(product)
    }

    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        let deleted = self
            .store
            .delete_product(id)
            .await
            .map_err(AppError::storage("Product deletion failed"))?;
        if !deleted {
            return Err(AppError::NotFound(PRODUCT_NOT_FOUND.into()));
        }
        tracing::debug!(product_id = id, "product deleted");
        Ok(())
    }
}
