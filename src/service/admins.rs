//! Admin gateway: registration, authentication and partial updates. Emails are unique;
//! the lookup before a write only produces the friendly error early, the store's unique
//! constraint decides.

use crate::error::AppError;
use crate::models::{Admin, AdminChanges, AdminLogin, AdminRegistration, AdminUpdate, NewAdmin};
use crate::service::Passwords;
use crate::store::{InventoryStore, EMAIL_IN_USE, EMAIL_REGISTERED};

pub const ADMIN_NOT_FOUND: &str = "Admin not found";

pub struct AdminService<'a> {
    store: &'a dyn InventoryStore,
    passwords: &'a Passwords,
}

impl<'a> AdminService<'a> {
    pub fn new(store: &'a dyn InventoryStore, passwords: &'a Passwords) -> Self {
        Self { store, passwords }
    }

    pub async fn register(&self, registration: AdminRegistration) -> Result<Admin, AppError> {
        let existing = self
            .store
            .find_admin_by_email(&registration.email)
            .await
            .map_err(AppError::storage("Admin registration failed"))?;
        if existing.is_some() {
            return Err(AppError::Conflict(EMAIL_REGISTERED.into()));
        }
        let hashed_password = self.passwords.hash(&registration.password)?;
        let record = self
            .store
            .insert_admin(&NewAdmin {
                email: registration.email,
                name: registration.name,
                hashed_password,
            })
            .await
            .map_err(AppError::storage("Admin registration failed"))?;
        tracing::info!(admin_id = record.id, "admin registered");
        Ok(record.into())
    }

    /// Unknown email and wrong password fail with the same `Unauthorized`.
    pub async fn authenticate(&self, login: &AdminLogin) -> Result<Admin, AppError> {
        let record = self
            .store
            .find_admin_by_email(&login.email)
            .await
            .map_err(AppError::storage("Login failed"))?;
        match record {
            Some(record) => {
                if self.passwords.verify(&login.password, &record.hashed_password)? {
                    tracing::debug!(admin_id = record.id, "admin authenticated");
                    Ok(record.into())
                } else {
                    tracing::warn!(email = %login.email, "failed login attempt");
                    Err(AppError::Unauthorized)
                }
            }
            None => {
                self.passwords.verify_dummy(&login.password);
                tracing::warn!(email = %login.email, "failed login attempt");
                Err(AppError::Unauthorized)
            }
        }
    }

    pub async fn list(&self) -> Result<Vec<Admin>, AppError> {
        let records = self
            .store
            .list_admins()
            .await
            .map_err(AppError::storage("Failed to fetch admins"))?;
        Ok(records.into_iter().map(Admin::from).collect())
    }

    pub async fn get(&self, id: i32) -> Result<Admin, AppError> {
        self.store
            .find_admin(id)
            .await
            .map_err(AppError::storage("Failed to fetch admin"))?
            .map(Admin::from)
            .ok_or_else(|| AppError::NotFound(ADMIN_NOT_FOUND.into()))
    }

    /// Only supplied fields change. The password is re-hashed only when a new one is given.
    pub async fn update(&self, id: i32, update: AdminUpdate) -> Result<Admin, AppError> {
        let current = self
            .store
            .find_admin(id)
            .await
            .map_err(AppError::storage("Admin update failed"))?
            .ok_or_else(|| AppError::NotFound(ADMIN_NOT_FOUND.into()))?;

        let mut changes = AdminChanges::default();
        if let Some(email) = update.email {
            if email != current.email {
                let owner = self
                    .store
                    .find_admin_by_email(&email)
                    .await
                    .map_err(AppError::storage("Admin update failed"))?;
                if owner.map(|o| o.id != id).unwrap_or(false) {
                    return Err(AppError::Conflict(EMAIL_IN_USE.into()));
                }
                changes.email = Some(email);
            }
        }
        changes.name = update.name;
        if let Some(password) = update.password {
            changes.hashed_password = Some(self.passwords.hash(&password)?);
        }

        if changes.is_empty() {
            return Ok(current.into());
        }
        let record = self
            .store
            .update_admin(id, &changes)
            .await
            .map_err(AppError::storage("Admin update failed"))?
            .ok_or_else(|| AppError::NotFound(ADMIN_NOT_FOUND.into()))?;
        tracing::info!(admin_id = id, password_changed = changes.hashed_password.is_some(), "admin updated");
        Ok(record.into())
    }

    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        let deleted = self
            .store
            .delete_admin(id)
            .await
            .map_err(AppError::storage("Admin deletion failed"))?;
        if !deleted {
            return Err(AppError::NotFound(ADMIN_NOT_FOUND.into()));
        }
        tracing::info!(admin_id = id, "admin deleted");
        Ok(())
    }
}
