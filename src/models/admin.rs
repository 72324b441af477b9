//! Admin account types. `AdminRecord` carries the password hash and stays behind the
//! service layer; HTTP callers only ever see `Admin`.

use serde::{Deserialize, Serialize};

/// Admin row as stored, including the password hash.
#[derive(Clone, Debug, PartialEq, sqlx::FromRow)]
pub struct AdminRecord {
    pub id: i32,
    pub email: String,
    pub name: Option<String>,
    pub hashed_password: String,
}

/// Public admin representation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Admin {
    pub id: i32,
    pub email: String,
    pub name: Option<String>,
}

impl From<AdminRecord> for Admin {
    fn from(record: AdminRecord) -> Self {
        Admin {
            id: record.id,
            email: record.email,
            name: record.name,
        }
    }
}

/// Validated registration request. The password is still plaintext here.
#[derive(Clone, Debug)]
pub struct AdminRegistration {
    pub email: String,
    pub name: Option<String>,
    pub password: String,
}

/// Validated login request.
#[derive(Clone, Debug)]
pub struct AdminLogin {
    pub email: String,
    pub password: String,
}

/// Validated partial update. `None` means "leave unchanged".
#[derive(Clone, Debug, Default)]
pub struct AdminUpdate {
    pub email: Option<String>,
    pub name: Option<String>,
    pub password: Option<String>,
}

/// Row to insert; the password is already hashed.
#[derive(Clone, Debug)]
pub struct NewAdmin {
    pub email: String,
    pub name: Option<String>,
    pub hashed_password: String,
}

/// Column changes for an admin row; the password is already hashed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AdminChanges {
    pub email: Option<String>,
    pub name: Option<String>,
    pub hashed_password: Option<String>,
}

impl AdminChanges {
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.name.is_none() && self.hashed_password.is_none()
    }
}
