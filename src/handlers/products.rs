//! Product handlers: list, read, create, full-replace update, delete. Update and delete take
//! the id from the `?id=` query parameter.

use crate::error::AppError;
use crate::response::{message_only, success_many, success_one};
use crate::service::RequestValidator;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use serde_json::Value;
use std::collections::HashMap;

fn id_from_query(params: &HashMap<String, String>) -> Result<i32, AppError> {
    let raw = params
        .get("id")
        .ok_or_else(|| AppError::Validation("id query parameter is required".into()))?;
    RequestValidator::parse_id(raw)
}

pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let rows = state.products().list().await?;
    Ok(success_many(rows))
}

pub async fn read(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = RequestValidator::parse_id(&id_str)?;
    let product = state.products().get(id).await?;
    Ok(success_one(product))
}

pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    let input = RequestValidator::product_input(body)?;
    let product = state.products().create(&input).await?;
    Ok(success_one(product))
}

pub async fn update(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    let id = id_from_query(&params)?;
    let input = RequestValidator::product_input(body)?;
    let product = state.products().update(id, &input).await?;
    Ok(success_one(product))
}

pub async fn delete(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let id = id_from_query(&params)?;
    state.products().delete(id).await?;
    Ok(message_only("Product deleted successfully"))
}
