//! Admin account handlers. Responses never carry the password hash.

use crate::error::AppError;
use crate::response::{confirmation, message_only, success_many, success_one};
use crate::service::RequestValidator;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use serde_json::Value;

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    let registration = RequestValidator::admin_registration(body)?;
    let admin = state.admins().register(registration).await?;
    Ok(confirmation("Admin registered successfully", admin))
}

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    let credentials = RequestValidator::admin_login(body)?;
    let admin = state.admins().authenticate(&credentials).await?;
    Ok(confirmation("Login successful", admin))
}

pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let admins = state.admins().list().await?;
    Ok(success_many(admins))
}

pub async fn read(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = RequestValidator::parse_id(&id_str)?;
    let admin = state.admins().get(id).await?;
    Ok(success_one(admin))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    let id = RequestValidator::parse_id(&id_str)?;
    let update = RequestValidator::admin_update(body)?;
    let admin = state.admins().update(id, update).await?;
    Ok(confirmation("Admin updated successfully", admin))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = RequestValidator::parse_id(&id_str)?;
    state.admins().delete(id).await?;
    Ok(message_only("Admin deleted successfully"))
}
