// tests/common/mod.rs
#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use warehouse_api::models::{AdminChanges, AdminRecord, NewAdmin, Product, ProductInput};
use warehouse_api::store::{InventoryStore, EMAIL_IN_USE, EMAIL_REGISTERED};
use warehouse_api::{AppError, AppState, Passwords};

#[derive(Default)]
struct Tables {
    next_product_id: i32,
    next_admin_id: i32,
    products: BTreeMap<i32, Product>,
    admins: BTreeMap<i32, AdminRecord>,
}

/// In-memory store with the same contract as the PostgreSQL one: ids assigned on insert,
/// unique admin emails enforced at write time, rows listed by id.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
    /// Every call fails as if the database were unreachable.
    pub fail_all: AtomicBool,
    /// Email lookups report nothing, as when a concurrent writer slips past the pre-check.
    pub blind_email_lookups: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn product_count(&self) -> usize {
        self.tables.lock().unwrap().products.len()
    }

    pub fn admin_record(&self, id: i32) -> Option<AdminRecord> {
        self.tables.lock().unwrap().admins.get(&id).cloned()
    }

    pub fn set_failing(&self, failing: bool) {
        self.fail_all.store(failing, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), AppError> {
        if self.fail_all.load(Ordering::SeqCst) {
            return Err(AppError::Db(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}

#[async_trait]
impl InventoryStore for MemoryStore {
    async fn ping(&self) -> Result<(), AppError> {
        self.check()
    }

    async fn list_products(&self) -> Result<Vec<Product>, AppError> {
        self.check()?;
        Ok(self.tables.lock().unwrap().products.values().cloned().collect())
    }

    async fn find_product(&self, id: i32) -> Result<Option<Product>, AppError> {
        self.check()?;
        Ok(self.tables.lock().unwrap().products.get(&id).cloned())
    }

    async fn insert_product(&self, input: &ProductInput) -> Result<Product, AppError> {
        self.check()?;
        let mut t = self.tables.lock().unwrap();
        t.next_product_id += 1;
        let product = input.clone().into_product(t.next_product_id);
        t.products.insert(product.id, product.clone());
        Ok(product)
    }

    async fn replace_product(&self, id: i32, input: &ProductInput) -> Result<Option<Product>, AppError> {
        self.check()?;
        let mut t = self.tables.lock().unwrap();
        Ok(t.products.get_mut(&id).map(|row| {
            *row = input.clone().into_product(id);
            row.clone()
        }))
    }

    async fn delete_product(&self, id: i32) -> Result<bool, AppError> {
        self.check()?;
        Ok(self.tables.lock().unwrap().products.remove(&id).is_some())
    }

    async fn list_admins(&self) -> Result<Vec<AdminRecord>, AppError> {
        self.check()?;
        Ok(self.tables.lock().unwrap().admins.values().cloned().collect())
    }

    async fn find_admin(&self, id: i32) -> Result<Option<AdminRecord>, AppError> {
        self.check()?;
        Ok(self.tables.lock().unwrap().admins.get(&id).cloned())
    }

    async fn find_admin_by_email(&self, email: &str) -> Result<Option<AdminRecord>, AppError> {
        self.check()?;
        if self.blind_email_lookups.load(Ordering::SeqCst) {
            return Ok(None);
        }
        Ok(self
            .tables
            .lock()
            .unwrap()
            .admins
            .values()
            .find(|a| a.email == email)
            .cloned())
    }

    async fn insert_admin(&self, admin: &NewAdmin) -> Result<AdminRecord, AppError> {
        self.check()?;
        let mut t = self.tables.lock().unwrap();
        if t.admins.values().any(|a| a.email == admin.email) {
            return Err(AppError::Conflict(EMAIL_REGISTERED.into()));
        }
        t.next_admin_id += 1;
        let record = AdminRecord {
            id: t.next_admin_id,
            email: admin.email.clone(),
            name: admin.name.clone(),
            hashed_password: admin.hashed_password.clone(),
        };
        t.admins.insert(record.id, record.clone());
        Ok(record)
    }

    async fn update_admin(&self, id: i32, changes: &AdminChanges) -> Result<Option<AdminRecord>, AppError> {
        self.check()?;
        let mut t = self.tables.lock().unwrap();
        if let Some(email) = &changes.email {
            if t.admins.values().any(|a| a.id != id && &a.email == email) {
                return Err(AppError::Conflict(EMAIL_IN_USE.into()));
            }
        }
        Ok(t.admins.get_mut(&id).map(|row| {
            if let Some(email) = &changes.email {
                row.email = email.clone();
            }
            if let Some(name) = &changes.name {
                row.name = Some(name.clone());
            }
            if let Some(hash) = &changes.hashed_password {
                row.hashed_password = hash.clone();
            }
            row.clone()
        }))
    }

    async fn delete_admin(&self, id: i32) -> Result<bool, AppError> {
        self.check()?;
        Ok(self.tables.lock().unwrap().admins.remove(&id).is_some())
    }
}

/// Cheap Argon2id parameters so tests do not spend seconds per hash.
pub fn fast_passwords() -> Passwords {
    Passwords::new(8, 1, 1).unwrap()
}

pub fn test_state(store: Arc<MemoryStore>) -> AppState {
    AppState::new(store, fast_passwords())
}

pub fn product_input(name: &str, price: f64, quantity: i32) -> ProductInput {
    ProductInput {
        name: name.to_string(),
        description: Some(format!("{} description", name)),
        price,
        quantity,
        company: Some("Acme".into()),
        delivery_partner: None,
    }
}
