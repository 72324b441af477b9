//! Shared application state for all routes.

use crate::service::{AdminService, Passwords, ProductService};
use crate::store::InventoryStore;
use std::sync::Arc;

/// The injected persistence handle plus the password hasher. Built once at process start.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn InventoryStore>,
    pub passwords: Arc<Passwords>,
}

impl AppState {
    pub fn new(store: Arc<dyn InventoryStore>, passwords: Passwords) -> Self {
        AppState {
            store,
            passwords: Arc::new(passwords),
        }
    }

    pub fn products(&self) -> ProductService<'_> {
        ProductService::new(&*self.store)
    }

    pub fn admins(&self) -> AdminService<'_> {
        AdminService::new(&*self.store, &self.passwords)
    }
}
