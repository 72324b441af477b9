//! Product entity and its validated input.

use serde::{Deserialize, Serialize};

/// A stored product, as returned to callers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub quantity: i32,
    pub company: Option<String>,
    pub delivery_partner: Option<String>,
}

/// Validated product fields. Used for both create and full-replace update.
#[derive(Clone, Debug, PartialEq)]
pub struct ProductInput {
    pub name: String,
    pub description: Option<String>,
    /// Negative values are accepted as-is.
    pub price: f64,
    pub quantity: i32,
    pub company: Option<String>,
    pub delivery_partner: Option<String>,
}

impl ProductInput {
    /// Materialize a stored product under the given id.
    pub fn into_product(self, id: i32) -> Product {
        Product {
            id,
            name: self.name,
            description: self.description,
            price: self.price,
            quantity: self.quantity,
            company: self.company,
            delivery_partner: self.delivery_partner,
        }
    }
}
