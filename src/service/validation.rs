//! Request validation: untrusted JSON bodies and path/query ids into typed inputs.
//! Every check here runs before the store is touched.

use crate::error::AppError;
use crate::models::{AdminLogin, AdminRegistration, AdminUpdate, ProductInput};
use regex::Regex;
use serde_json::{Map, Value};
use std::sync::OnceLock;

/// Column widths of the persisted tables.
pub const NAME_MAX: usize = 255;
pub const DESCRIPTION_MAX: usize = 1024;
pub const EMAIL_MAX: usize = 254;
const EMAIL_LOCAL_MAX: usize = 64;

const EMAIL_PATTERN: &str = r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$";

fn email_regex() -> Result<&'static Regex, AppError> {
    static EMAIL_RE: OnceLock<Result<Regex, regex::Error>> = OnceLock::new();
    EMAIL_RE
        .get_or_init(|| Regex::new(EMAIL_PATTERN))
        .as_ref()
        .map_err(|e| AppError::Internal(format!("email pattern: {}", e)))
}

pub struct RequestValidator;

impl RequestValidator {
    /// Full product body: create and full-replace update share the same rules.
    pub fn product_input(body: Value) -> Result<ProductInput, AppError> {
        let body = body_to_map(body)?;
        Ok(ProductInput {
            name: required_string(&body, "name", NAME_MAX)?,
            description: optional_string(&body, "description", DESCRIPTION_MAX)?,
            price: required_number(&body, "price")?,
            quantity: required_i32(&body, "quantity")?,
            company: optional_string(&body, "company", NAME_MAX)?,
            delivery_partner: optional_string(&body, "delivery_partner", NAME_MAX)?,
        })
    }

    pub fn admin_registration(body: Value) -> Result<AdminRegistration, AppError> {
        let body = body_to_map(body)?;
        let email = normalize_email(&required_string(&body, "email", usize::MAX)?)?;
        let name = optional_string(&body, "name", NAME_MAX)?;
        let password = required_string(&body, "password", usize::MAX)?;
        if password.is_empty() {
            return Err(AppError::Validation("password must not be empty".into()));
        }
        Ok(AdminRegistration { email, name, password })
    }

    pub fn admin_login(body: Value) -> Result<AdminLogin, AppError> {
        let body = body_to_map(body)?;
        let email = normalize_email(&required_string(&body, "email", usize::MAX)?)?;
        let password = required_string(&body, "password", usize::MAX)?;
        Ok(AdminLogin { email, password })
    }

    /// Partial update: absent and `null` fields are left unchanged, and so is an empty password.
    pub fn admin_update(body: Value) -> Result<AdminUpdate, AppError> {
        let body = body_to_map(body)?;
        let email = optional_string(&body, "email", usize::MAX)?
            .map(|e| normalize_email(&e))
            .transpose()?;
        let name = optional_string(&body, "name", NAME_MAX)?;
        let password = optional_string(&body, "password", usize::MAX)?.filter(|p| !p.is_empty());
        Ok(AdminUpdate { email, name, password })
    }

    /// Parse an entity id from a path segment or query value.
    pub fn parse_id(raw: &str) -> Result<i32, AppError> {
        raw.trim()
            .parse::<i32>()
            .map_err(|_| AppError::Validation(format!("id must be an integer, got '{}'", raw)))
    }
}

/// Trim, check against the address grammar, and lowercase the domain part.
pub fn normalize_email(raw: &str) -> Result<String, AppError> {
    let invalid = || AppError::Validation("email must be a valid email address".into());
    let s = raw.trim();
    if s.is_empty() || s.len() > EMAIL_MAX || !email_regex()?.is_match(s) {
        return Err(invalid());
    }
    let (local, domain) = s.split_once('@').ok_or_else(invalid)?;
    if local.len() > EMAIL_LOCAL_MAX || local.starts_with('.') || local.ends_with('.') || local.contains("..") {
        return Err(invalid());
    }
    Ok(format!("{}@{}", local, domain.to_ascii_lowercase()))
}

fn body_to_map(value: Value) -> Result<Map<String, Value>, AppError> {
    match value {
        Value::Object(m) => Ok(m),
        _ => Err(AppError::BadRequest("body must be a JSON object".into())),
    }
}

fn check_length(col: &str, s: &str, max: usize) -> Result<(), AppError> {
    if s.chars().count() > max {
        return Err(AppError::Validation(format!(
            "{} must be at most {} characters",
            col, max
        )));
    }
    Ok(())
}

fn required_string(body: &Map<String, Value>, col: &str, max: usize) -> Result<String, AppError> {
    match body.get(col) {
        None | Some(Value::Null) => Err(AppError::Validation(format!("{} is required", col))),
        Some(Value::String(s)) => {
            check_length(col, s, max)?;
            Ok(s.clone())
        }
        Some(_) => Err(AppError::Validation(format!("{} must be a string", col))),
    }
}

fn optional_string(body: &Map<String, Value>, col: &str, max: usize) -> Result<Option<String>, AppError> {
    match body.get(col) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => {
            check_length(col, s, max)?;
            Ok(Some(s.clone()))
        }
        Some(_) => Err(AppError::Validation(format!("{} must be a string", col))),
    }
}

fn required_number(body: &Map<String, Value>, col: &str) -> Result<f64, AppError> {
    match body.get(col) {
        None | Some(Value::Null) => Err(AppError::Validation(format!("{} is required", col))),
        Some(Value::Number(n)) => n
            .as_f64()
            .ok_or_else(|| AppError::Validation(format!("{} must be a number", col))),
        Some(_) => Err(AppError::Validation(format!("{} must be a number", col))),
    }
}

fn required_i32(body: &Map<String, Value>, col: &str) -> Result<i32, AppError> {
    match body.get(col) {
        None | Some(Value::Null) => Err(AppError::Validation(format!("{} is required", col))),
        Some(Value::Number(n)) => n
            .as_i64()
            .and_then(|i| i32::try_from(i).ok())
            .ok_or_else(|| AppError::Validation(format!("{} must be a 32-bit integer", col))),
        Some(_) => Err(AppError::Validation(format!("{} must be an integer", col))),
    }
}
