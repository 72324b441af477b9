//! Response envelope helpers.

use axum::{http::StatusCode, Json};
use serde::Serialize;

/// Confirmation message with an optional admin payload, e.g. `{"message": "...", "admin": {...}}`.
#[derive(Serialize)]
pub struct Confirmation<T> {
    pub message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin: Option<T>,
}

pub fn confirmation<T: Serialize>(message: &'static str, admin: T) -> (StatusCode, Json<Confirmation<T>>) {
    (
        StatusCode::OK,
        Json(Confirmation {
            message,
            admin: Some(admin),
        }),
    )
}

pub fn message_only(message: &'static str) -> (StatusCode, Json<Confirmation<()>>) {
    (
        StatusCode::OK,
        Json(Confirmation {
            message,
            admin: None,
        }),
    )
}

pub fn success_one<T: Serialize>(data: T) -> (StatusCode, Json<T>) {
    (StatusCode::OK, Json(data))
}

pub fn success_many<T: Serialize>(data: Vec<T>) -> (StatusCode, Json<Vec<T>>) {
    (StatusCode::OK, Json(data))
}
